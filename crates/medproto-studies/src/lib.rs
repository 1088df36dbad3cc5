//! medproto-studies
//!
//! Built-in study type catalog. Pure data: each study lists its measurable
//! parameters together with the static normal range used when no clinician
//! norm table applies.

pub mod error;
pub mod studies;

use indexmap::IndexMap;
use medproto_core::models::study::ParameterDefinition;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use error::StudyError;

/// Trait implemented by each supported diagnostic study.
pub trait Study: Send + Sync {
    /// Unique identifier for this study (e.g., "ecg", "echo").
    fn id(&self) -> &str;

    /// Display name used in conclusions (e.g., "ЭКГ").
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Measurable parameters in form order.
    fn parameters(&self) -> &[ParameterDefinition];

    fn parameter(&self, id: &str) -> Option<&ParameterDefinition> {
        self.parameters().iter().find(|p| p.id == id)
    }

    /// Parameter id → display name, in form order.
    fn display_names(&self) -> IndexMap<String, String> {
        self.parameters()
            .iter()
            .map(|p| (p.id.clone(), p.name.clone()))
            .collect()
    }

    /// Check that every measured key names one of this study's parameters.
    /// Range companions (`<id>_min` / `<id>_max`) are accepted.
    fn validate_keys(&self, keys: &[&str]) -> Result<(), StudyError> {
        for &key in keys {
            let base = key
                .strip_suffix("_min")
                .or_else(|| key.strip_suffix("_max"))
                .unwrap_or(key);
            if self.parameter(base).is_none() {
                return Err(StudyError::UnknownParameter {
                    study_id: self.id().to_string(),
                    parameter_id: key.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Serializable snapshot for the frontend.
    fn summary(&self) -> StudySummary {
        StudySummary {
            id: self.id().to_string(),
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters().to_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StudySummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub parameters: Vec<ParameterDefinition>,
}

/// Return all registered studies.
pub fn all_studies() -> Vec<Box<dyn Study>> {
    vec![
        Box::new(studies::ecg::Ecg),
        Box::new(studies::echo::Echo),
        Box::new(studies::spirometry::Spirometry),
    ]
}

/// Look up a study by ID.
pub fn get_study(id: &str) -> Option<Box<dyn Study>> {
    all_studies().into_iter().find(|s| s.id() == id)
}

/// Look up a study by ID, falling back to its display name. Archived
/// protocols from the browser client record the name ("ЭКГ").
pub fn find_study(key: &str) -> Option<Box<dyn Study>> {
    let key = key.trim();
    let studies = all_studies();
    let by_id = studies.iter().position(|s| s.id() == key);
    let index = by_id.or_else(|| studies.iter().position(|s| s.name() == key))?;
    studies.into_iter().nth(index)
}

/// Resolve a study by ID or display name, failing with
/// [`StudyError::UnknownStudy`].
pub fn require_study(key: &str) -> Result<Box<dyn Study>, StudyError> {
    find_study(key).ok_or_else(|| StudyError::UnknownStudy(key.to_string()))
}
