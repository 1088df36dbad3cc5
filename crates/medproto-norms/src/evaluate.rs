use indexmap::IndexMap;
use medproto_core::models::norm_table::NormTable;
use medproto_core::models::patient::PatientProfile;
use medproto_core::models::protocol::Protocol;
use medproto_studies::Study;

use crate::check::{NormCheckResult, check_parameter_norms};
use crate::conclusion::synthesize;
use crate::ecg::generate_ecg_conclusion;

/// Check every measured parameter. The result keeps the order of
/// `parameters`.
pub fn evaluate_all(
    parameters: &IndexMap<String, f64>,
    patient: &PatientProfile,
    tables: &[NormTable],
    study_type_id: &str,
) -> IndexMap<String, NormCheckResult> {
    parameters
        .iter()
        .map(|(key, value)| {
            let check = check_parameter_norms(key, *value, patient, tables, study_type_id);
            (key.clone(), check)
        })
        .collect()
}

/// Alias of [`evaluate_all`] under the name the forms use.
pub fn get_all_parameter_checks(
    parameters: &IndexMap<String, f64>,
    patient: &PatientProfile,
    tables: &[NormTable],
    study_type_id: &str,
) -> IndexMap<String, NormCheckResult> {
    evaluate_all(parameters, patient, tables, study_type_id)
}

/// Conclusion for a set of measurements.
///
/// Table-authored deviations are preferred. When they produce no text the
/// measurements are compared against the study's default ranges instead,
/// yielding either a list of deviations or the all-normal sentence. No
/// measurements yields an empty conclusion.
pub fn generate_conclusion(
    parameters: &IndexMap<String, f64>,
    patient: &PatientProfile,
    tables: &[NormTable],
    study: &dyn Study,
) -> String {
    if parameters.is_empty() {
        return String::new();
    }

    let checks = evaluate_all(parameters, patient, tables, study.id());
    let text = synthesize(&checks);
    if !text.is_empty() {
        return text;
    }

    default_range_conclusion(parameters, study)
}

/// Threshold summary against the study's static ranges, in catalog order.
pub fn default_range_conclusion(parameters: &IndexMap<String, f64>, study: &dyn Study) -> String {
    let issues: Vec<String> = study
        .parameters()
        .iter()
        .filter_map(|param| {
            let value = parameters.get(&param.id).copied().filter(|v| v.is_finite())?;
            let range = param.normal_range;
            if value < range.min {
                Some(format!("снижение {} до {} {}", param.name, value, param.unit))
            } else if value > range.max {
                Some(format!("повышение {} до {} {}", param.name, value, param.unit))
            } else {
                None
            }
        })
        .collect();

    if issues.is_empty() {
        return format!(
            "{}: Все показатели в пределах нормы. Патологии не выявлено.",
            study.name()
        );
    }

    format!(
        "{}: Выявлены отклонения - {}. Рекомендована консультация специалиста.",
        study.name(),
        issues.join(", ")
    )
}

/// Fill in `<id>` with the rounded mean of `<id>_min` and `<id>_max` when
/// both are positive. Other entries are copied unchanged.
pub fn average_range_results(results: &IndexMap<String, f64>) -> IndexMap<String, f64> {
    let mut averaged = results.clone();
    for (key, min) in results {
        let Some(base) = key.strip_suffix("_min") else {
            continue;
        };
        let Some(max) = results.get(&format!("{base}_max")) else {
            continue;
        };
        if *min > 0.0 && *max > 0.0 {
            averaged.insert(base.to_string(), ((min + max) / 2.0).round());
        }
    }
    averaged
}

/// Conclusion for a stored protocol: ECG protocols with recorded positions
/// get the positional conclusion, everything else the measurement one.
pub fn protocol_conclusion(protocol: &Protocol, tables: &[NormTable], study: &dyn Study) -> String {
    let patient = protocol.patient_data.profile();
    match protocol.ecg_positions.as_deref() {
        Some(positions) if !positions.is_empty() => {
            generate_ecg_conclusion(positions, &patient, tables, study)
        }
        _ => {
            let results = average_range_results(&protocol.results);
            generate_conclusion(&results, &patient, tables, study)
        }
    }
}
