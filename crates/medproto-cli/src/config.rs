use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Version stamped on every saved config. Raising it needs a matching
/// step in [`migrate`].
const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedprotoConfig {
    /// 0 (or absent) marks a config written before versioning.
    #[serde(default)]
    pub config_version: u32,
    /// Where norm tables and protocols live. `None` = platform data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Study used when a command does not name one. Added in v1.
    #[serde(default = "default_study")]
    pub default_study: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

fn default_study() -> String {
    "ecg".to_string()
}

impl Default for MedprotoConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            data_dir: None,
            default_study: default_study(),
            log_format: LogFormat::Text,
        }
    }
}

impl MedprotoConfig {
    /// Data directory, falling back to the platform data dir.
    pub fn resolve_data_dir(&self) -> eyre::Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => {
                let base = dirs::data_dir().ok_or_else(|| eyre::eyre!("no data directory found"))?;
                Ok(base.join("medproto"))
            }
        }
    }
}

pub fn config_path() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("medproto").join("config.json"))
}

/// Where a loaded config came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// No file; built-in defaults.
    Defaults,
    /// File already at the current version.
    Current,
    /// File upgraded in memory from an older version.
    Migrated { from: u32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub config: MedprotoConfig,
    pub origin: ConfigOrigin,
}

impl LoadedConfig {
    /// Report how the config was obtained. Loading happens before the
    /// subscriber exists, so the event is emitted separately.
    pub fn log_origin(&self, path: &Path) {
        match self.origin {
            ConfigOrigin::Defaults => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
            }
            ConfigOrigin::Current => {
                tracing::debug!(path = %path.display(), "config loaded");
            }
            ConfigOrigin::Migrated { from } => {
                tracing::info!(
                    path = %path.display(),
                    from,
                    to = CURRENT_VERSION,
                    "config migrated"
                );
            }
        }
    }
}

/// Load the config at `path`, or defaults when the file does not exist.
pub fn load_config(path: &Path) -> eyre::Result<LoadedConfig> {
    if !path.exists() {
        return Ok(LoadedConfig {
            config: MedprotoConfig::default(),
            origin: ConfigOrigin::Defaults,
        });
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Version steps run on the untyped value; typed decoding comes last.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: MedprotoConfig = serde_json::from_value(migrated)?;
    let origin = if on_disk_version < CURRENT_VERSION {
        ConfigOrigin::Migrated {
            from: on_disk_version,
        }
    } else {
        ConfigOrigin::Current
    };
    Ok(LoadedConfig { config, origin })
}

/// Bring a raw config at `from_version` up to [`CURRENT_VERSION`].
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update medproto."
        ));
    }

    // v0 → v1: default_study appears.
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        obj.entry("default_study")
            .or_insert(serde_json::Value::String(default_study()));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
    }

    Ok(json)
}

pub fn save_config(path: &Path, config: &MedprotoConfig) -> eyre::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    // Saved files carry this build's version even if loaded from an older one.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let json = serde_json::to_string_pretty(&stamped)?;

    // Readers only ever see the old file or the complete new one.
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;
    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}
