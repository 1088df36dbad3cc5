mod common;

use common::{hr_table, params, patient};
use medproto_core::models::ecg::{EcgAxis, EcgPosition, EcgPositionKind, EcgPositionType, EcgRhythm};
use medproto_core::models::patient::Sex;
use medproto_norms::ecg::{generate_ecg_conclusion, generate_ecg_positional_text};
use medproto_norms::evaluate::average_range_results;
use medproto_studies::studies::ecg::Ecg;

#[test]
fn axis_is_described_for_lying_only() {
    let lying = EcgPosition::new(EcgPositionKind::Lying);
    let mut standing = EcgPosition::new(EcgPositionKind::Standing);
    standing.axis = EcgAxis::Left;

    assert_eq!(
        generate_ecg_positional_text(&[lying, standing]),
        "Лежа - ритм синусовый. ЭОС: нормальное положение.\n\nСтоя - ритм синусовый."
    );
}

#[test]
fn custom_rhythm_and_axis_text() {
    let mut lying = EcgPosition::new(EcgPositionKind::Lying);
    lying.rhythm = EcgRhythm::Custom;
    lying.rhythm_custom = Some("эктопический предсердный".to_string());
    lying.axis = EcgAxis::Custom;
    lying.axis_custom = Some("  ".to_string());

    assert_eq!(
        generate_ecg_positional_text(&[lying]),
        "Лежа - ритм эктопический предсердный. ЭОС: Другое (ввести вручную)."
    );
}

#[test]
fn preset_positions() {
    assert_eq!(
        EcgPositionType::LyingStandingExercise.positions(),
        vec![EcgPositionKind::Lying, EcgPositionKind::Standing, EcgPositionKind::Exercise]
    );
    assert_eq!(EcgPositionType::Custom.positions(), vec![EcgPositionKind::Lying]);
}

#[test]
fn conclusion_appends_norm_deviations_once() {
    let mut lying = EcgPosition::new(EcgPositionKind::Lying);
    lying.results = params(&[("hr_min", 92.0), ("hr_max", 100.0)]);
    let mut standing = EcgPosition::new(EcgPositionKind::Standing);
    standing.results = params(&[("hr", 110.0)]);

    let text = generate_ecg_conclusion(
        &[lying, standing],
        &patient(Sex::Male, 30),
        &[hr_table()],
        &Ecg,
    );
    assert_eq!(
        text,
        "Лежа - ритм синусовый. ЭОС: нормальное положение.\n\nСтоя - ритм синусовый.\n\nТахикардия"
    );
}

#[test]
fn conclusion_without_deviations_is_positional_only() {
    let mut lying = EcgPosition::new(EcgPositionKind::Lying);
    lying.results = params(&[("hr", 72.0)]);
    let text = generate_ecg_conclusion(&[lying], &patient(Sex::Male, 30), &[hr_table()], &Ecg);
    assert_eq!(text, "Лежа - ритм синусовый. ЭОС: нормальное положение.");
}

#[test]
fn range_pairs_are_averaged() {
    let averaged = average_range_results(&params(&[("hr_min", 61.0), ("hr_max", 70.0), ("qt", 400.0)]));
    assert_eq!(averaged["hr"], 66.0);
    assert_eq!(averaged["qt"], 400.0);
    assert_eq!(averaged["hr_min"], 61.0);

    let incomplete = average_range_results(&params(&[("pq_min", 0.0), ("pq_max", 180.0)]));
    assert!(!incomplete.contains_key("pq"));
}
