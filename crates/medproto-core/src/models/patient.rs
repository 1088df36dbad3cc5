use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Patient sex as captured on the intake form. An unanswered field is
/// stored as an empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Sex {
    #[serde(rename = "male")]
    Male,
    #[serde(rename = "female")]
    Female,
    #[default]
    #[serde(rename = "")]
    Unknown,
}

/// Chronological age split into calendar components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientAge {
    pub years: u32,
    /// 0–11.
    pub months: u32,
    /// 0–30.
    pub days: u32,
}

/// Unit granularity of an age-normalized table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AgeUnit {
    Years,
    Months,
    Days,
}

impl AgeUnit {
    pub fn label(&self) -> &'static str {
        match self {
            AgeUnit::Years => "лет",
            AgeUnit::Months => "месяцев",
            AgeUnit::Days => "дней",
        }
    }
}

const DAYS_PER_YEAR: f64 = 365.25;
const DAYS_PER_MONTH: f64 = 30.44;

impl PatientAge {
    pub fn new(years: u32, months: u32, days: u32) -> Self {
        Self {
            years,
            months,
            days,
        }
    }

    /// Calendar difference between `birth` and `reference`.
    ///
    /// A negative day difference borrows the length of the month preceding
    /// the reference month; a negative month difference borrows a year.
    /// A birth date after the reference yields a zero age.
    pub fn between(birth: Date, reference: Date) -> Self {
        if birth > reference {
            return Self::default();
        }

        let mut years = i32::from(reference.year()) - i32::from(birth.year());
        let mut months = i32::from(reference.month()) - i32::from(birth.month());
        let mut days = i32::from(reference.day()) - i32::from(birth.day());

        if days < 0 {
            months -= 1;
            days += i32::from(days_in_previous_month(reference));
        }

        if months < 0 {
            years -= 1;
            months += 12;
        }

        Self {
            years: years.max(0) as u32,
            months: months.max(0) as u32,
            // Borrowing a short month (e.g. Jan 31 -> Mar 1) can still leave
            // the day count negative.
            days: days.max(0) as u32,
        }
    }

    /// Scalar age along `unit`, using 30.44-day months and 365.25-day years.
    pub fn in_unit(&self, unit: AgeUnit) -> f64 {
        let years = f64::from(self.years);
        let months = f64::from(self.months);
        let days = f64::from(self.days);
        match unit {
            AgeUnit::Years => years + months / 12.0 + days / DAYS_PER_YEAR,
            AgeUnit::Months => years * 12.0 + months + days / DAYS_PER_MONTH,
            AgeUnit::Days => years * DAYS_PER_YEAR + months * DAYS_PER_MONTH + days,
        }
    }
}

fn days_in_previous_month(reference: Date) -> i8 {
    let (year, month) = if reference.month() == 1 {
        (reference.year() - 1, 12)
    } else {
        (reference.year(), reference.month() - 1)
    };
    Date::new(year, month, 1)
        .map(|d| d.days_in_month())
        .unwrap_or(31)
}

/// Parse a date as entered on a form or stored by the archive. Accepts a
/// plain `YYYY-MM-DD`, a civil datetime, or an RFC 3339 timestamp.
pub fn parse_date(value: &str) -> Result<Date, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::MissingField("date".to_string()));
    }

    let date_err = match trimmed.parse::<Date>() {
        Ok(date) => return Ok(date),
        Err(e) => e,
    };
    if let Ok(dt) = trimmed.parse::<jiff::civil::DateTime>() {
        return Ok(dt.date());
    }
    if let Ok(ts) = trimmed.parse::<jiff::Timestamp>() {
        return Ok(ts.to_zoned(jiff::tz::TimeZone::UTC).date());
    }

    Err(CoreError::InvalidDate {
        value: trimmed.to_string(),
        source: date_err,
    })
}

/// Age at `reference` (today when absent). An empty or unparsable birth
/// date yields a zero age.
pub fn compute_age(birth_date: &str, reference: Option<Date>) -> PatientAge {
    let Ok(birth) = parse_date(birth_date) else {
        return PatientAge::default();
    };
    let reference = reference.unwrap_or_else(|| jiff::Zoned::now().date());
    PatientAge::between(birth, reference)
}

/// Scalar age along `unit`. See [`PatientAge::in_unit`].
pub fn age_in_unit(age: &PatientAge, unit: AgeUnit) -> f64 {
    age.in_unit(unit)
}

/// Body surface area in m², `sqrt(weight * height / 3600)`.
///
/// Returns `None` when either input is missing, non-finite or non-positive.
pub fn compute_bsa(weight_kg: Option<f64>, height_cm: Option<f64>) -> Option<f64> {
    let weight = weight_kg.filter(|w| w.is_finite() && *w > 0.0)?;
    let height = height_cm.filter(|h| h.is_finite() && *h > 0.0)?;
    Some((weight * height / 3600.0).sqrt())
}

/// Parse a numeric form field. Accepts a comma as decimal separator.
pub fn parse_measurement(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// The subset of patient attributes that norm selection depends on.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PatientProfile {
    pub sex: Sex,
    pub age: Option<PatientAge>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub bsa_m2: Option<f64>,
}

impl PatientProfile {
    /// Build a profile, deriving BSA from weight and height.
    pub fn new(
        sex: Sex,
        age: Option<PatientAge>,
        weight_kg: Option<f64>,
        height_cm: Option<f64>,
    ) -> Self {
        Self {
            sex,
            age,
            weight_kg,
            height_cm,
            bsa_m2: compute_bsa(weight_kg, height_cm),
        }
    }
}

/// Patient block of a protocol, as captured by the intake form.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PatientData {
    pub name: String,
    pub gender: Sex,
    #[serde(default)]
    pub birth_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<PatientAge>,
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub height: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bsa: Option<f64>,
    #[serde(default)]
    pub ultrasound_device: String,
    #[serde(default)]
    pub study_date: String,
}

impl PatientData {
    /// Derive the norm-selection profile.
    ///
    /// A stored age wins; otherwise the age is computed from the birth date
    /// relative to the study date (today when the study date is unusable).
    /// No birth date means no age.
    pub fn profile(&self) -> PatientProfile {
        let age = self.age.or_else(|| {
            let birth = parse_date(&self.birth_date).ok()?;
            let reference = parse_date(&self.study_date)
                .unwrap_or_else(|_| jiff::Zoned::now().date());
            Some(PatientAge::between(birth, reference))
        });

        let weight = parse_measurement(&self.weight);
        let height = parse_measurement(&self.height);
        let mut profile = PatientProfile::new(self.gender, age, weight, height);
        if profile.bsa_m2.is_none() {
            profile.bsa_m2 = self.bsa.filter(|b| b.is_finite() && *b > 0.0);
        }
        profile
    }
}
