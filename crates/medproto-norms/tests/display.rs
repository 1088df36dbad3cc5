mod common;

use common::{hr_table, patient};
use medproto_core::models::norm_table::NormalRange;
use medproto_core::models::patient::Sex;
use medproto_norms::check_parameter_norms;
use medproto_norms::display::{DisplayStatus, default_status, resolve_display};
use medproto_studies::Study;
use medproto_studies::studies::ecg::Ecg;

#[test]
fn default_status_thresholds() {
    let range = NormalRange::new(60.0, 90.0);
    assert_eq!(default_status(59.0, range), DisplayStatus::Danger);
    assert_eq!(default_status(91.0, range), DisplayStatus::Danger);
    assert_eq!(default_status(62.0, range), DisplayStatus::Warning);
    assert_eq!(default_status(85.0, range), DisplayStatus::Warning);
    assert_eq!(default_status(75.0, range), DisplayStatus::Success);
}

#[test]
fn table_range_preferred_when_matched() {
    let hr = Ecg.parameter("hr").unwrap();
    let mut table = hr_table();
    table.rows[0].parameter_from = "50".to_string();
    let check = check_parameter_norms("hr", 55.0, &patient(Sex::Male, 30), &[table], "ecg");

    let display = resolve_display(hr, 55.0, Some(&check));
    assert!(display.from_table);
    assert_eq!(display.range, NormalRange::new(50.0, 90.0));
    assert_eq!(display.status, DisplayStatus::Success);

    let above = check_parameter_norms("hr", 95.0, &patient(Sex::Male, 30), &[hr_table()], "ecg");
    assert_eq!(resolve_display(hr, 95.0, Some(&above)).status, DisplayStatus::Danger);
    let below = check_parameter_norms("hr", 40.0, &patient(Sex::Male, 30), &[hr_table()], "ecg");
    assert_eq!(resolve_display(hr, 40.0, Some(&below)).status, DisplayStatus::Warning);
}

#[test]
fn default_range_without_table_match() {
    let hr = Ecg.parameter("hr").unwrap();
    let check = check_parameter_norms("hr", 55.0, &patient(Sex::Male, 30), &[], "ecg");

    let display = resolve_display(hr, 55.0, Some(&check));
    assert!(!display.from_table);
    assert_eq!(display.range, NormalRange::new(60.0, 90.0));
    assert_eq!(display.status, DisplayStatus::Danger);

    assert_eq!(resolve_display(hr, 75.0, None).status, DisplayStatus::Success);
}
