use jiff::civil::date;
use medproto_core::models::patient::{
    AgeUnit, PatientAge, PatientData, Sex, age_in_unit, compute_age, compute_bsa, parse_date,
};

#[test]
fn day_before_anniversary_borrows_a_month() {
    let age = compute_age("2000-03-15", Some(date(2024, 3, 14)));
    assert_eq!(age, PatientAge::new(23, 11, 28));
}

#[test]
fn exact_anniversary_is_whole_years() {
    let age = compute_age("2000-03-15", Some(date(2024, 3, 15)));
    assert_eq!(age, PatientAge::new(24, 0, 0));
}

#[test]
fn january_reference_borrows_from_december() {
    let age = compute_age("2020-06-20", Some(date(2024, 1, 10)));
    // Dec has 31 days: 10 - 20 + 31 = 21
    assert_eq!(age, PatientAge::new(3, 6, 21));
}

#[test]
fn empty_birth_date_is_zero_age() {
    assert_eq!(compute_age("", Some(date(2024, 1, 1))), PatientAge::default());
    assert_eq!(compute_age("   ", None), PatientAge::default());
    assert_eq!(compute_age("not a date", None), PatientAge::default());
}

#[test]
fn birth_after_reference_is_zero_age() {
    assert_eq!(
        compute_age("2025-01-01", Some(date(2024, 1, 1))),
        PatientAge::default()
    );
}

#[test]
fn timestamp_birth_dates_are_accepted() {
    let age = compute_age("2000-03-15T00:00:00Z", Some(date(2001, 3, 15)));
    assert_eq!(age, PatientAge::new(1, 0, 0));
    assert_eq!(parse_date("2000-03-15T08:30:00").unwrap(), date(2000, 3, 15));
}

#[test]
fn age_in_unit_uses_average_lengths() {
    let age = PatientAge::new(1, 6, 15);
    let years = age_in_unit(&age, AgeUnit::Years);
    assert!((years - (1.0 + 6.0 / 12.0 + 15.0 / 365.25)).abs() < 1e-12);

    let months = age_in_unit(&age, AgeUnit::Months);
    assert!((months - (18.0 + 15.0 / 30.44)).abs() < 1e-12);

    let days = age_in_unit(&age, AgeUnit::Days);
    assert!((days - (365.25 + 6.0 * 30.44 + 15.0)).abs() < 1e-9);
}

#[test]
fn bsa_follows_formula() {
    let bsa = compute_bsa(Some(70.0), Some(175.0)).unwrap();
    assert!((bsa - 1.8447).abs() < 1e-3);
    assert!((bsa - (70.0_f64 * 175.0 / 3600.0).sqrt()).abs() < 1e-12);
}

#[test]
fn bsa_undefined_for_missing_or_non_positive_inputs() {
    assert_eq!(compute_bsa(Some(0.0), Some(175.0)), None);
    assert_eq!(compute_bsa(Some(70.0), Some(-1.0)), None);
    assert_eq!(compute_bsa(None, Some(175.0)), None);
    assert_eq!(compute_bsa(Some(f64::NAN), Some(175.0)), None);
}

#[test]
fn profile_derives_age_from_study_date() {
    let data = PatientData {
        name: "Иванов".to_string(),
        gender: Sex::Male,
        birth_date: "2000-03-15".to_string(),
        weight: "70".to_string(),
        height: "175,0".to_string(),
        study_date: "2024-03-14".to_string(),
        ..Default::default()
    };

    let profile = data.profile();
    assert_eq!(profile.sex, Sex::Male);
    assert_eq!(profile.age, Some(PatientAge::new(23, 11, 28)));
    assert_eq!(profile.weight_kg, Some(70.0));
    assert_eq!(profile.height_cm, Some(175.0));
    assert!(profile.bsa_m2.is_some());
}

#[test]
fn profile_without_birth_date_has_no_age() {
    let data = PatientData {
        gender: Sex::Female,
        weight: "abc".to_string(),
        ..Default::default()
    };

    let profile = data.profile();
    assert_eq!(profile.age, None);
    assert_eq!(profile.weight_kg, None);
    assert_eq!(profile.bsa_m2, None);
}

#[test]
fn patient_data_reads_form_json() {
    let json = r#"{
        "name": "Петрова",
        "gender": "",
        "birthDate": "2015-05-01",
        "weight": "30",
        "height": "130",
        "ultrasoundDevice": "",
        "studyDate": "2024-05-01"
    }"#;

    let data: PatientData = serde_json::from_str(json).unwrap();
    assert_eq!(data.gender, Sex::Unknown);
    assert_eq!(data.profile().age, Some(PatientAge::new(9, 0, 0)));
}
