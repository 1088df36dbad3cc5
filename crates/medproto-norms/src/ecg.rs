use medproto_core::models::ecg::{EcgPosition, EcgPositionKind};
use medproto_core::models::norm_table::NormTable;
use medproto_core::models::patient::PatientProfile;
use medproto_studies::Study;

use crate::conclusion::{compose_ecg_conclusion, synthesize};
use crate::evaluate::{average_range_results, evaluate_all};

/// Rhythm sentence per position; the electrical axis is only described for
/// the lying position. Positions are separated by a blank line.
pub fn generate_ecg_positional_text(positions: &[EcgPosition]) -> String {
    positions
        .iter()
        .map(|position| {
            let mut text = format!(
                "{} - ритм {}.",
                position.position.label(),
                position.rhythm_text()
            );
            if position.position == EcgPositionKind::Lying {
                text.push_str(&format!(" ЭОС: {}.", position.axis_text()));
            }
            text
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Full ECG conclusion: positional description followed by the
/// norm-derived deviations of every position. A deviation reported in
/// several positions appears once.
pub fn generate_ecg_conclusion(
    positions: &[EcgPosition],
    patient: &PatientProfile,
    tables: &[NormTable],
    study: &dyn Study,
) -> String {
    let positional = generate_ecg_positional_text(positions);

    let mut lines: Vec<String> = Vec::new();
    for position in positions {
        let results = average_range_results(&position.results);
        let checks = evaluate_all(&results, patient, tables, study.id());
        for line in synthesize(&checks).lines() {
            if !lines.iter().any(|l| l == line) {
                lines.push(line.to_string());
            }
        }
    }

    compose_ecg_conclusion(&positional, &lines.join("\n"))
}
