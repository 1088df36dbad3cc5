use medproto_studies::error::StudyError;
use medproto_studies::studies::ecg::Ecg;
use medproto_studies::{Study, all_studies, find_study, get_study, require_study};

#[test]
fn catalog_lists_three_studies() {
    let ids: Vec<_> = all_studies().iter().map(|s| s.id().to_string()).collect();
    assert_eq!(ids, vec!["ecg", "echo", "spirometry"]);
}

#[test]
fn lookup_by_id() {
    let study = get_study("echo").unwrap();
    assert_eq!(study.name(), "ЭхоКГ");
    assert!(get_study("mri").is_none());
    assert!(matches!(require_study("mri"), Err(StudyError::UnknownStudy(_))));
}

#[test]
fn lookup_falls_back_to_display_name() {
    assert_eq!(find_study("ЭКГ").unwrap().id(), "ecg");
    assert_eq!(find_study("ЭхоКГ").unwrap().id(), "echo");
    assert_eq!(require_study("Спирометрия").unwrap().id(), "spirometry");
    assert_eq!(find_study("ecg").unwrap().name(), "ЭКГ");
    // Display names never resolve through the id-only lookup.
    assert!(get_study("ЭКГ").is_none());
    assert!(find_study("экг").is_none());
}

#[test]
fn ecg_default_ranges() {
    let hr = Ecg.parameter("hr").unwrap();
    assert_eq!(hr.unit, "уд/мин");
    assert_eq!((hr.normal_range.min, hr.normal_range.max), (60.0, 90.0));
}

#[test]
fn display_names_follow_form_order() {
    let names = Ecg.display_names();
    let keys: Vec<_> = names.keys().cloned().collect();
    assert_eq!(keys, vec!["hr", "pq", "qrs", "qt"]);
    assert_eq!(names["qt"], "QT интервал");
}

#[test]
fn validate_keys_accepts_range_companions() {
    assert!(Ecg.validate_keys(&["hr", "hr_min", "qt_max"]).is_ok());
    let err = Ecg.validate_keys(&["hr", "lvef"]).unwrap_err();
    assert!(err.to_string().contains("lvef"));
}

#[test]
fn validate_keys_through_catalog_object() {
    let study = require_study("echo").unwrap();
    assert!(study.validate_keys(&["lvef", "lvef_min"]).is_ok());
    assert!(matches!(
        study.validate_keys(&["hr"]),
        Err(StudyError::UnknownParameter { ref parameter_id, .. }) if parameter_id == "hr"
    ));
}

#[test]
fn summary_serializes_parameters() {
    let value = serde_json::to_value(get_study("spirometry").unwrap().summary()).unwrap();
    assert_eq!(value["parameters"][2]["normalRange"]["min"], 70.0);
}
