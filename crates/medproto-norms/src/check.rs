use medproto_core::models::norm_table::{NormRangeRow, NormTable, NormalRange};
use medproto_core::models::patient::PatientProfile;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::category::classify_patient_category;
use crate::matcher::find_row;

/// Classification of a measured value against its norm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum NormStatus {
    /// Within range, or no opinion.
    #[default]
    Normal,
    Below,
    Above,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NormCheckResult {
    pub status: NormStatus,
    /// Parameter bounds of the matched row.
    pub effective_range: Option<NormalRange>,
    /// Table template for the deviation, when one is authored.
    pub conclusion_text: Option<String>,
    pub matched_row: Option<NormRangeRow>,
}

impl NormCheckResult {
    /// No opinion: used whenever a norm cannot be determined.
    pub fn normal() -> Self {
        Self::default()
    }

    pub fn is_normal(&self) -> bool {
        self.status == NormStatus::Normal
    }
}

/// Classify `value` for `parameter_key` against the clinician norm tables.
///
/// Candidate tables are those for the study, parameter and the patient's
/// category, tried in stored order; the first one with a row covering the
/// patient wins. When no norm applies the result is `Normal` without a
/// range, and the caller falls back to the study's default range.
pub fn check_parameter_norms(
    parameter_key: &str,
    value: f64,
    patient: &PatientProfile,
    tables: &[NormTable],
    study_type_id: &str,
) -> NormCheckResult {
    if !value.is_finite() {
        return NormCheckResult::normal();
    }

    let Some(category) = classify_patient_category(patient.sex, patient.age.as_ref()) else {
        tracing::debug!(parameter_key, "patient has no category (missing sex or age)");
        return NormCheckResult::normal();
    };

    let mut candidates = tables
        .iter()
        .filter(|t| t.applies_to(study_type_id, parameter_key, category))
        .peekable();

    if candidates.peek().is_none() {
        tracing::debug!(study_type_id, parameter_key, ?category, "no norm table");
        return NormCheckResult::normal();
    }

    let Some((table, row)) =
        candidates.find_map(|table| find_row(table, patient).map(|row| (table, row)))
    else {
        tracing::debug!(study_type_id, parameter_key, ?category, "no norm row covers patient");
        return NormCheckResult::normal();
    };

    let Some(range) = row.parameter_range() else {
        tracing::debug!(table_id = %table.id, row_id = %row.id, "norm row bounds are not numbers");
        return NormCheckResult::normal();
    };

    let (status, template) = if value < range.min {
        (NormStatus::Below, table.conclusion_below.as_str())
    } else if value > range.max {
        (NormStatus::Above, table.conclusion_above.as_str())
    } else {
        (NormStatus::Normal, "")
    };

    tracing::debug!(
        parameter_key,
        value,
        min = range.min,
        max = range.max,
        ?status,
        "norm check"
    );

    NormCheckResult {
        status,
        effective_range: Some(range),
        conclusion_text: (!template.trim().is_empty()).then(|| template.to_string()),
        matched_row: Some(row.clone()),
    }
}
