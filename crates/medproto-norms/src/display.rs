use medproto_core::models::norm_table::NormalRange;
use medproto_core::models::study::ParameterDefinition;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::check::{NormCheckResult, NormStatus};

/// Traffic-light status shown next to a measured value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DisplayStatus {
    Success,
    Warning,
    Danger,
}

/// Range and status to show for one measured parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ParameterDisplay {
    pub range: NormalRange,
    /// The range came from a clinician norm table rather than the study
    /// default.
    pub from_table: bool,
    pub status: DisplayStatus,
}

/// Status against a static range: outside is danger, within 10% of either
/// bound is a warning.
pub fn default_status(value: f64, range: NormalRange) -> DisplayStatus {
    if value < range.min || value > range.max {
        DisplayStatus::Danger
    } else if value < range.min * 1.1 || value > range.max * 0.9 {
        DisplayStatus::Warning
    } else {
        DisplayStatus::Success
    }
}

/// Choose the table range when the check matched one, the parameter's
/// default range otherwise.
pub fn resolve_display(
    definition: &ParameterDefinition,
    value: f64,
    check: Option<&NormCheckResult>,
) -> ParameterDisplay {
    match check.and_then(|c| c.effective_range.map(|range| (c.status, range))) {
        Some((status, range)) => ParameterDisplay {
            range,
            from_table: true,
            status: match status {
                NormStatus::Normal => DisplayStatus::Success,
                NormStatus::Below => DisplayStatus::Warning,
                NormStatus::Above => DisplayStatus::Danger,
            },
        },
        None => ParameterDisplay {
            range: definition.normal_range,
            from_table: false,
            status: default_status(value, definition.normal_range),
        },
    }
}
