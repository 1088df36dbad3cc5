use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::ecg::{EcgPosition, EcgPositionType};
use super::patient::PatientData;

/// Bounds entered for a parameter measured as a range.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MeasuredRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// A finished diagnostic report for one patient and one study.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Protocol {
    pub id: String,
    /// Study type id ("ecg") or, for protocols archived by the browser
    /// client, the study's display name ("ЭКГ").
    pub study_type: String,
    pub date: String,
    pub patient_name: String,
    pub patient_data: PatientData,
    #[serde(default)]
    pub results: IndexMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results_min_max: Option<IndexMap<String, MeasuredRange>>,
    #[serde(default)]
    pub conclusion: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ecg_position_type: Option<EcgPositionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ecg_positions: Option<Vec<EcgPosition>>,
}

impl Protocol {
    pub fn new(study_type: impl Into<String>, patient_data: PatientData) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            study_type: study_type.into(),
            date: jiff::Zoned::now().strftime("%d.%m.%Y, %H:%M:%S").to_string(),
            patient_name: patient_data.name.clone(),
            patient_data,
            results: IndexMap::new(),
            results_min_max: None,
            conclusion: String::new(),
            signed: None,
            ecg_position_type: None,
            ecg_positions: None,
        }
    }

    pub fn is_signed(&self) -> bool {
        self.signed.unwrap_or(false)
    }
}
