use indexmap::IndexMap;

use crate::check::NormCheckResult;

/// Join the authored conclusion of every deviating parameter, one per line,
/// in map order. Deviations without a template are skipped. An empty string
/// means nothing deviated (or nothing had a template); wording for the
/// all-normal case is left to the caller.
pub fn synthesize(checks: &IndexMap<String, NormCheckResult>) -> String {
    checks
        .values()
        .filter(|check| !check.is_normal())
        .filter_map(|check| check.conclusion_text.as_deref())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Conclusion paragraph derived from norm checks. See [`synthesize`].
pub fn generate_conclusion_from_norms(checks: &IndexMap<String, NormCheckResult>) -> String {
    synthesize(checks)
}

/// Combine the descriptive ECG text with the norm-derived paragraph,
/// separated by a blank line when both are present.
pub fn compose_ecg_conclusion(positional: &str, norms: &str) -> String {
    match (positional.trim().is_empty(), norms.trim().is_empty()) {
        (false, false) => format!("{positional}\n\n{norms}"),
        (false, true) => positional.to_string(),
        (true, false) => norms.to_string(),
        (true, true) => String::new(),
    }
}

/// Detailed listing of every measured parameter with the range it was
/// judged against, followed by the authored deviations.
///
/// ```text
/// ЧСС: 95 (норма 60-90)
/// QT интервал: 400
///
/// Заключение:
/// Тахикардия
/// ```
pub fn parameter_summary(
    checks: &IndexMap<String, NormCheckResult>,
    parameters: &IndexMap<String, f64>,
    display_names: &IndexMap<String, String>,
) -> String {
    let mut lines = Vec::new();

    for (key, check) in checks {
        let Some(value) = parameters.get(key).copied().filter(|v| v.is_finite()) else {
            continue;
        };
        let name = display_names.get(key).map(String::as_str).unwrap_or(key.as_str());
        match check.effective_range {
            Some(range) => lines.push(format!(
                "{name}: {} (норма {}-{})",
                format_number(value),
                format_number(range.min),
                format_number(range.max)
            )),
            None => lines.push(format!("{name}: {}", format_number(value))),
        }
    }

    let deviations = synthesize(checks);
    if !deviations.is_empty() {
        lines.push(String::new());
        lines.push("Заключение:".to_string());
        lines.push(deviations);
    }

    lines.join("\n")
}

/// Integers print bare, anything else with one decimal. Ties round away
/// from zero (2.25 prints as 2.3).
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value}")
    } else {
        let rounded = (value * 10.0).round() / 10.0;
        format!("{rounded:.1}")
    }
}
