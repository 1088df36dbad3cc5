use std::path::{Path, PathBuf};

use medproto_core::models::norm_table::NormTable;
use medproto_core::models::protocol::Protocol;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::document::{self, CURRENT_VERSION, ProtocolDocument, TableDocument};
use crate::error::StorageError;
use crate::{NormTableStore, ProtocolStore, remove_by_id, save_protocol_into, upsert_into};

const TABLES_FILE: &str = "norm_tables.json";
const PROTOCOLS_FILE: &str = "protocols.json";

/// JSON-file store under a data directory. Documents are loaded and
/// migrated once at [`FileStore::open`]; every write goes back to disk
/// atomically.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    tables: Vec<NormTable>,
    protocols: Vec<Protocol>,
}

impl FileStore {
    /// Open (or create) a store in `dir`. Legacy documents are migrated and
    /// rewritten in the current format.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;

        let tables_path = dir.join(TABLES_FILE);
        let (tables, tables_migrated) =
            load_document::<TableDocument>(&tables_path, "tables")?
                .map(|(doc, migrated)| (doc.tables, migrated))
                .unwrap_or_default();

        let protocols_path = dir.join(PROTOCOLS_FILE);
        let (protocols, protocols_migrated) =
            load_document::<ProtocolDocument>(&protocols_path, "protocols")?
                .map(|(doc, migrated)| (doc.protocols, migrated))
                .unwrap_or_default();

        if tables_migrated {
            write_tables(&dir, &tables)?;
        }
        if protocols_migrated {
            write_protocols(&dir, &protocols)?;
        }

        tracing::debug!(
            dir = %dir.display(),
            tables = tables.len(),
            protocols = protocols.len(),
            "store opened"
        );
        Ok(Self {
            dir,
            tables,
            protocols,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl NormTableStore for FileStore {
    fn list_tables(&self) -> Result<Vec<NormTable>, StorageError> {
        Ok(self.tables.clone())
    }

    fn upsert_table(&mut self, table: NormTable) -> Result<NormTable, StorageError> {
        let mut tables = self.tables.clone();
        let stored = upsert_into(&mut tables, table);
        write_tables(&self.dir, &tables)?;
        self.tables = tables;
        tracing::info!(table_id = %stored.id, parameter = %stored.parameter_key, "norm table saved");
        Ok(stored)
    }

    fn delete_table(&mut self, id: &str) -> Result<(), StorageError> {
        let mut tables = self.tables.clone();
        remove_by_id(&mut tables, id, |t| t.id.as_str())?;
        write_tables(&self.dir, &tables)?;
        self.tables = tables;
        tracing::info!(table_id = %id, "norm table deleted");
        Ok(())
    }
}

impl ProtocolStore for FileStore {
    fn list_protocols(&self) -> Result<Vec<Protocol>, StorageError> {
        Ok(self.protocols.clone())
    }

    fn save_protocol(&mut self, protocol: Protocol) -> Result<(), StorageError> {
        let id = protocol.id.clone();
        let mut protocols = self.protocols.clone();
        save_protocol_into(&mut protocols, protocol);
        write_protocols(&self.dir, &protocols)?;
        self.protocols = protocols;
        tracing::info!(protocol_id = %id, "protocol saved");
        Ok(())
    }

    fn delete_protocol(&mut self, id: &str) -> Result<(), StorageError> {
        let mut protocols = self.protocols.clone();
        remove_by_id(&mut protocols, id, |p| p.id.as_str())?;
        write_protocols(&self.dir, &protocols)?;
        self.protocols = protocols;
        tracing::info!(protocol_id = %id, "protocol deleted");
        Ok(())
    }
}

/// Load and migrate a document. Returns `None` when the file does not exist;
/// the flag reports whether a migration ran.
fn load_document<T: DeserializeOwned>(
    path: &Path,
    items_key: &str,
) -> Result<Option<(T, bool)>, StorageError> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(path)?;
    // Migrations operate on the untyped value; typed decoding comes last.
    let json: serde_json::Value =
        serde_json::from_str(&contents).map_err(|e| StorageError::InvalidDocument {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    let on_disk_version = document::document_version(&json);
    let migrated = document::migrate(json, on_disk_version, items_key, path)?;
    let doc: T = serde_json::from_value(migrated)?;
    Ok(Some((doc, on_disk_version < CURRENT_VERSION)))
}

// Callers write the candidate list first and only commit it in memory
// once it is on disk.
fn write_tables(dir: &Path, tables: &[NormTable]) -> Result<(), StorageError> {
    let doc = TableDocument {
        version: CURRENT_VERSION,
        tables: tables.to_vec(),
    };
    write_atomic(&dir.join(TABLES_FILE), &doc)
}

fn write_protocols(dir: &Path, protocols: &[Protocol]) -> Result<(), StorageError> {
    let doc = ProtocolDocument {
        version: CURRENT_VERSION,
        protocols: protocols.to_vec(),
    };
    write_atomic(&dir.join(PROTOCOLS_FILE), &doc)
}

/// Write the document next to `path`, then rename it into place.
fn write_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    let json = serde_json::to_vec_pretty(value)?;
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, &json)?;
    std::fs::rename(&tmp_path, path)?;
    tracing::debug!(path = %path.display(), "document written");
    Ok(())
}
