#![allow(dead_code)]

use indexmap::IndexMap;
use medproto_core::models::norm_table::{
    NormRangeRow, NormTable, NormalizationAxis, PatientCategory,
};
use medproto_core::models::patient::{AgeUnit, PatientAge, PatientProfile, Sex};

pub fn row(range: (f64, f64), unit: Option<AgeUnit>, parameter: (f64, f64)) -> NormRangeRow {
    NormRangeRow::new(range, unit, parameter)
}

/// Adult male heart-rate table: 18–120 years → 60–90 bpm.
pub fn hr_table() -> NormTable {
    let mut table = NormTable::new("ecg", PatientCategory::AdultMale, "hr", NormalizationAxis::Age);
    table.rows = vec![row((18.0, 120.0), Some(AgeUnit::Years), (60.0, 90.0))];
    table.conclusion_below = "Брадикардия".to_string();
    table.conclusion_above = "Тахикардия".to_string();
    table
}

pub fn patient(sex: Sex, years: u32) -> PatientProfile {
    PatientProfile::new(sex, Some(PatientAge::new(years, 0, 0)), Some(70.0), Some(175.0))
}

pub fn params(entries: &[(&str, f64)]) -> IndexMap<String, f64> {
    entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}
