use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::norm_table::NormalRange;

/// A measurable parameter of a study type, with the static range used when
/// no clinician norm table applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ParameterDefinition {
    pub id: String,
    pub name: String,
    pub unit: String,
    pub normal_range: NormalRange,
}

impl ParameterDefinition {
    pub fn new(id: &str, name: &str, unit: &str, min: f64, max: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            unit: unit.to_string(),
            normal_range: NormalRange::new(min, max),
        }
    }
}
