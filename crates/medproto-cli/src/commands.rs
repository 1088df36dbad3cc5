use indexmap::IndexMap;
use medproto_core::models::norm_table::NormTable;
use medproto_core::models::patient::{PatientAge, compute_age, compute_bsa, parse_date};
use medproto_core::models::protocol::Protocol;
use medproto_norms::conclusion::parameter_summary;
use medproto_norms::evaluate::{average_range_results, protocol_conclusion};
use medproto_norms::{NormCheckResult, evaluate_all};
use medproto_storage::{NormTableStore, ProtocolStore};
use medproto_studies::{all_studies, require_study};
use serde::{Deserialize, Serialize};

/// Outcome of evaluating one protocol.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationReport {
    pub protocol_id: String,
    pub study_type: String,
    pub checks: IndexMap<String, NormCheckResult>,
    /// Every measured parameter with the range it was judged against.
    pub summary: String,
    pub conclusion: String,
}

pub fn age(birth_date: &str, on: Option<&str>) -> eyre::Result<PatientAge> {
    parse_date(birth_date)?;
    let reference = on.map(parse_date).transpose()?;
    Ok(compute_age(birth_date, reference))
}

pub fn bsa(weight_kg: f64, height_cm: f64) -> Option<f64> {
    compute_bsa(Some(weight_kg), Some(height_cm))
}

pub fn list_studies() -> String {
    let mut out = String::new();
    for study in all_studies() {
        out.push_str(&format!("{}: {} ({})\n", study.id(), study.name(), study.description()));
        for param in study.parameters() {
            out.push_str(&format!(
                "  {}: {} [{}-{} {}]\n",
                param.id, param.name, param.normal_range.min, param.normal_range.max, param.unit
            ));
        }
    }
    out
}

pub fn list_tables(store: &impl NormTableStore, study: Option<&str>) -> eyre::Result<String> {
    let tables = match study {
        Some(id) => store.tables_for_study(id)?,
        None => store.list_tables()?,
    };

    let lines: Vec<String> = tables
        .iter()
        .map(|t| {
            format!(
                "{}\t{}\t{}\t{}\t{}\t{} rows",
                t.id,
                t.study_type_id,
                t.category.label(),
                t.parameter_key,
                t.axis.label(),
                t.rows.len()
            )
        })
        .collect();
    Ok(lines.join("\n"))
}

/// Import one table or an array of tables. Authoring problems are logged,
/// not rejected.
pub fn import_tables(store: &mut impl NormTableStore, json: &str) -> eyre::Result<usize> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let tables: Vec<NormTable> = match value {
        serde_json::Value::Array(_) => serde_json::from_value(value)?,
        _ => vec![serde_json::from_value(value)?],
    };

    let count = tables.len();
    for table in tables {
        for issue in table.lint() {
            tracing::warn!(table_id = %table.id, %issue, "norm table issue");
        }
        store.upsert_table(table)?;
    }
    Ok(count)
}

pub fn lint_tables(store: &impl NormTableStore) -> eyre::Result<Vec<String>> {
    Ok(store
        .list_tables()?
        .iter()
        .flat_map(|t| {
            t.lint()
                .into_iter()
                .map(move |issue| format!("{} ({}/{}): {issue}", t.id, t.study_type_id, t.parameter_key))
        })
        .collect())
}

/// Evaluate a protocol against the stored norm tables. With `save`, the
/// conclusion is written into the protocol and the protocol archived.
pub fn evaluate<S>(store: &mut S, protocol_json: &str, save: bool) -> eyre::Result<EvaluationReport>
where
    S: NormTableStore + ProtocolStore,
{
    let mut protocol: Protocol = serde_json::from_str(protocol_json)?;
    let study = require_study(&protocol.study_type)?;
    let tables = store.tables_for_study(study.id())?;
    let patient = protocol.patient_data.profile();

    let results = average_range_results(&protocol.results);
    let keys: Vec<&str> = results.keys().map(String::as_str).collect();
    if let Err(error) = study.validate_keys(&keys) {
        tracing::warn!(%error, "protocol has parameters outside the study catalog");
    }

    let checks = evaluate_all(&results, &patient, &tables, study.id());
    let summary = parameter_summary(&checks, &results, &study.display_names());
    let conclusion = protocol_conclusion(&protocol, &tables, study.as_ref());

    tracing::info!(
        protocol_id = %protocol.id,
        study = %study.id(),
        parameters = results.len(),
        deviations = checks.values().filter(|c| !c.is_normal()).count(),
        "protocol evaluated"
    );

    if save {
        protocol.conclusion = conclusion.clone();
        store.save_protocol(protocol.clone())?;
    }

    Ok(EvaluationReport {
        protocol_id: protocol.id,
        study_type: study.id().to_string(),
        checks,
        summary,
        conclusion,
    })
}
