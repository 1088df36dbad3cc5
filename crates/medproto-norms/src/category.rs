use medproto_core::models::norm_table::PatientCategory;
use medproto_core::models::patient::{PatientAge, Sex};

/// Age (in whole years) from which a patient is an adult.
pub const ADULT_AGE_YEARS: u32 = 18;

/// Map sex and age to a norm table category.
///
/// Returns `None` when the sex is unknown or the age is missing.
pub fn classify_patient_category(sex: Sex, age: Option<&PatientAge>) -> Option<PatientCategory> {
    let child = age?.years < ADULT_AGE_YEARS;
    match (sex, child) {
        (Sex::Male, true) => Some(PatientCategory::ChildMale),
        (Sex::Male, false) => Some(PatientCategory::AdultMale),
        (Sex::Female, true) => Some(PatientCategory::ChildFemale),
        (Sex::Female, false) => Some(PatientCategory::AdultFemale),
        (Sex::Unknown, _) => None,
    }
}
