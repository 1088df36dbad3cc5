use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use super::patient::{AgeUnit, Sex, parse_measurement};

/// Coarse patient bucket a norm table applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PatientCategory {
    AdultMale,
    AdultFemale,
    ChildMale,
    ChildFemale,
}

impl PatientCategory {
    pub const ALL: [PatientCategory; 4] = [
        PatientCategory::AdultMale,
        PatientCategory::AdultFemale,
        PatientCategory::ChildMale,
        PatientCategory::ChildFemale,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PatientCategory::AdultMale => "Взрослые (мужчины)",
            PatientCategory::AdultFemale => "Взрослые (женщины)",
            PatientCategory::ChildMale => "Дети (мальчики)",
            PatientCategory::ChildFemale => "Дети (девочки)",
        }
    }

    pub fn is_child(&self) -> bool {
        matches!(self, PatientCategory::ChildMale | PatientCategory::ChildFemale)
    }

    pub fn sex(&self) -> Sex {
        match self {
            PatientCategory::AdultMale | PatientCategory::ChildMale => Sex::Male,
            PatientCategory::AdultFemale | PatientCategory::ChildFemale => Sex::Female,
        }
    }
}

/// Patient attribute a table's rows are keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum NormalizationAxis {
    Age,
    Weight,
    Height,
    Bsa,
}

impl NormalizationAxis {
    pub fn label(&self) -> &'static str {
        match self {
            NormalizationAxis::Age => "По возрасту",
            NormalizationAxis::Weight => "По массе тела (кг)",
            NormalizationAxis::Height => "По росту (см)",
            NormalizationAxis::Bsa => "По площади поверхности тела (м²)",
        }
    }
}

/// Closed numeric interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NormalRange {
    pub min: f64,
    pub max: f64,
}

impl NormalRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// One row of a norm table. Bounds are kept as entered so the stored
/// document round-trips; they are parsed when the row is used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NormRangeRow {
    pub id: String,
    pub range_from: String,
    pub range_to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_unit: Option<AgeUnit>,
    pub parameter_from: String,
    pub parameter_to: String,
}

impl NormRangeRow {
    pub fn new(
        range: (f64, f64),
        range_unit: Option<AgeUnit>,
        parameter: (f64, f64),
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            range_from: range.0.to_string(),
            range_to: range.1.to_string(),
            range_unit,
            parameter_from: parameter.0.to_string(),
            parameter_to: parameter.1.to_string(),
        }
    }

    /// Axis interval covered by this row, if both bounds parse.
    pub fn axis_range(&self) -> Option<NormalRange> {
        Some(NormalRange::new(
            parse_measurement(&self.range_from)?,
            parse_measurement(&self.range_to)?,
        ))
    }

    /// Accepted parameter interval for this row, if both bounds parse.
    pub fn parameter_range(&self) -> Option<NormalRange> {
        Some(NormalRange::new(
            parse_measurement(&self.parameter_from)?,
            parse_measurement(&self.parameter_to)?,
        ))
    }
}

/// A clinician-authored normative table for one study parameter and one
/// patient category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NormTable {
    pub id: String,
    #[serde(rename = "studyType")]
    pub study_type_id: String,
    pub category: PatientCategory,
    /// Parameter identifier; callers must use a single key scheme.
    #[serde(rename = "parameter")]
    pub parameter_key: String,
    #[serde(rename = "normType")]
    pub axis: NormalizationAxis,
    pub rows: Vec<NormRangeRow>,
    #[serde(default = "default_show_in_report")]
    pub show_in_report: bool,
    #[serde(default)]
    pub conclusion_below: String,
    #[serde(default)]
    pub conclusion_above: String,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

fn default_show_in_report() -> bool {
    true
}

impl NormTable {
    pub fn new(
        study_type_id: impl Into<String>,
        category: PatientCategory,
        parameter_key: impl Into<String>,
        axis: NormalizationAxis,
    ) -> Self {
        let now = jiff::Timestamp::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            study_type_id: study_type_id.into(),
            category,
            parameter_key: parameter_key.into(),
            axis,
            rows: Vec::new(),
            show_in_report: true,
            conclusion_below: String::new(),
            conclusion_above: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this table applies to the `(study, parameter, category)` triple.
    pub fn applies_to(&self, study_type_id: &str, parameter_key: &str, category: PatientCategory) -> bool {
        self.study_type_id == study_type_id
            && self.parameter_key == parameter_key
            && self.category == category
    }

    /// Unit used for every row of an age table. Only the first row is
    /// consulted.
    pub fn age_unit(&self) -> Option<AgeUnit> {
        self.rows.first().and_then(|row| row.range_unit)
    }

    /// Authoring problems in this table. Advisory only: matching still
    /// takes the first applicable row regardless of what is reported here.
    pub fn lint(&self) -> Vec<TableIssue> {
        let mut issues = Vec::new();

        if self.rows.is_empty() {
            issues.push(TableIssue::NoRows {
                table_id: self.id.clone(),
            });
            return issues;
        }

        if self.axis == NormalizationAxis::Age {
            match self.age_unit() {
                None => issues.push(TableIssue::MissingAgeUnit {
                    table_id: self.id.clone(),
                }),
                Some(unit) => {
                    for row in self.rows.iter().skip(1) {
                        if row.range_unit.is_some_and(|u| u != unit) {
                            issues.push(TableIssue::MixedAgeUnits {
                                row_id: row.id.clone(),
                            });
                        }
                    }
                }
            }
        }

        let mut parsed: Vec<(&NormRangeRow, NormalRange)> = Vec::new();
        for row in &self.rows {
            let (Some(axis), Some(param)) = (row.axis_range(), row.parameter_range()) else {
                issues.push(TableIssue::UnparsableBounds {
                    row_id: row.id.clone(),
                });
                continue;
            };
            if axis.min > axis.max || param.min > param.max {
                issues.push(TableIssue::InvertedRange {
                    row_id: row.id.clone(),
                });
            }
            for (earlier, earlier_axis) in &parsed {
                if axis.min <= earlier_axis.max && earlier_axis.min <= axis.max {
                    issues.push(TableIssue::OverlappingRows {
                        first: earlier.id.clone(),
                        second: row.id.clone(),
                    });
                }
            }
            parsed.push((row, axis));
        }

        issues
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum TableIssue {
    #[error("table {table_id} has no rows")]
    NoRows { table_id: String },

    #[error("table {table_id} is age-normalized but its first row has no unit")]
    MissingAgeUnit { table_id: String },

    #[error("row {row_id} uses a different age unit than the first row")]
    MixedAgeUnits { row_id: String },

    #[error("row {row_id} has a bound that is not a number")]
    UnparsableBounds { row_id: String },

    #[error("row {row_id} has a lower bound above its upper bound")]
    InvertedRange { row_id: String },

    #[error("rows {first} and {second} overlap; {first} takes precedence")]
    OverlappingRows { first: String, second: String },
}
