mod common;

use common::{hr_table, params, patient};
use indexmap::IndexMap;
use medproto_core::models::norm_table::NormalRange;
use medproto_core::models::patient::{PatientProfile, Sex};
use medproto_norms::conclusion::{format_number, parameter_summary};
use medproto_norms::evaluate::default_range_conclusion;
use medproto_norms::{
    NormCheckResult, NormStatus, compose_ecg_conclusion, evaluate_all, generate_conclusion,
    synthesize,
};
use medproto_studies::studies::ecg::Ecg;
use medproto_studies::studies::spirometry::Spirometry;
use medproto_studies::Study;

fn deviation(status: NormStatus, text: Option<&str>) -> NormCheckResult {
    NormCheckResult {
        status,
        effective_range: Some(NormalRange::new(1.0, 2.0)),
        conclusion_text: text.map(str::to_string),
        matched_row: None,
    }
}

#[test]
fn synthesize_joins_deviations_in_order() {
    let mut checks = IndexMap::new();
    checks.insert("qt".to_string(), deviation(NormStatus::Above, Some("Удлинение QT")));
    checks.insert("hr".to_string(), deviation(NormStatus::Normal, Some("never shown")));
    checks.insert("pq".to_string(), deviation(NormStatus::Below, None));
    checks.insert("qrs".to_string(), deviation(NormStatus::Below, Some("Укорочение QRS")));

    assert_eq!(synthesize(&checks), "Удлинение QT\nУкорочение QRS");
}

#[test]
fn synthesize_of_nothing_is_empty() {
    assert_eq!(synthesize(&IndexMap::new()), "");
}

#[test]
fn compose_separates_with_blank_line() {
    assert_eq!(compose_ecg_conclusion("Лежа - ритм синусовый.", "Тахикардия"), "Лежа - ритм синусовый.\n\nТахикардия");
    assert_eq!(compose_ecg_conclusion("Лежа - ритм синусовый.", ""), "Лежа - ритм синусовый.");
    assert_eq!(compose_ecg_conclusion("", "Тахикардия"), "Тахикардия");
    assert_eq!(compose_ecg_conclusion("", ""), "");
}

#[test]
fn fallback_lists_default_range_deviations() {
    let mut table = hr_table();
    table.conclusion_above.clear();
    let measured = params(&[("hr", 95.0), ("qt", 300.0), ("pq", 150.0)]);

    let text = generate_conclusion(&measured, &patient(Sex::Male, 30), &[table], &Ecg);
    assert_eq!(
        text,
        "ЭКГ: Выявлены отклонения - повышение ЧСС до 95 уд/мин, снижение QT интервал до 300 мс. \
         Рекомендована консультация специалиста."
    );
}

#[test]
fn fallback_ignores_table_opinion() {
    // Table says 95 is fine for this patient, the default range disagrees.
    let mut table = hr_table();
    table.rows[0].parameter_to = "100".to_string();
    let measured = params(&[("hr", 95.0)]);
    let text = generate_conclusion(&measured, &patient(Sex::Male, 30), &[table], &Ecg);
    assert!(text.contains("повышение ЧСС до 95 уд/мин"));
}

#[test]
fn fallback_prints_fractional_values() {
    let measured = params(&[("fvc", 3.2)]);
    let text = default_range_conclusion(&measured, &Spirometry);
    assert!(text.contains("снижение ФЖЕЛ до 3.2 л"), "{text}");
}

#[test]
fn fallback_without_measurements_is_empty() {
    let nobody = PatientProfile::default();
    assert_eq!(generate_conclusion(&params(&[]), &nobody, &[], &Ecg), "");
}

#[test]
fn summary_lists_values_with_ranges() {
    let measured = params(&[("hr", 95.0), ("qt", 401.5)]);
    let checks = evaluate_all(&measured, &patient(Sex::Male, 30), &[hr_table()], "ecg");

    let text = parameter_summary(&checks, &measured, &Ecg.display_names());
    assert_eq!(
        text,
        "ЧСС: 95 (норма 60-90)\nQT интервал: 401.5\n\nЗаключение:\nТахикардия"
    );
}

#[test]
fn summary_without_deviations_has_no_conclusion_block() {
    let measured = params(&[("hr", 70.0)]);
    let checks = evaluate_all(&measured, &patient(Sex::Male, 30), &[hr_table()], "ecg");
    let text = parameter_summary(&checks, &measured, &IndexMap::new());
    assert_eq!(text, "hr: 70 (норма 60-90)");
}

#[test]
fn number_formatting() {
    assert_eq!(format_number(95.0), "95");
    assert_eq!(format_number(3.26), "3.3");
    assert_eq!(format_number(0.5), "0.5");
}

#[test]
fn number_formatting_rounds_ties_up() {
    assert_eq!(format_number(2.25), "2.3");
    assert_eq!(format_number(36.25), "36.3");
    assert_eq!(format_number(0.25), "0.3");
    assert_eq!(format_number(-2.25), "-2.3");
    assert_eq!(format_number(1.96), "2.0");
}
