use medproto_core::models::norm_table::{NormRangeRow, NormTable, NormalizationAxis};
use medproto_core::models::patient::PatientProfile;

/// The patient's position on the table's normalization axis.
///
/// Age tables take their unit from the first row only; a first row without
/// a unit makes the whole table unusable.
pub fn axis_value(table: &NormTable, patient: &PatientProfile) -> Option<f64> {
    match table.axis {
        NormalizationAxis::Age => {
            let unit = table.age_unit()?;
            let age = patient.age.as_ref()?;
            Some(age.in_unit(unit))
        }
        NormalizationAxis::Weight => patient.weight_kg.filter(|w| w.is_finite()),
        NormalizationAxis::Height => patient.height_cm.filter(|h| h.is_finite()),
        NormalizationAxis::Bsa => patient.bsa_m2.filter(|b| b.is_finite() && *b != 0.0),
    }
}

/// First row, in stored order, whose inclusive axis interval contains the
/// patient's axis value. Rows with unparsable bounds are skipped.
pub fn find_row<'a>(table: &'a NormTable, patient: &PatientProfile) -> Option<&'a NormRangeRow> {
    let value = axis_value(table, patient)?;
    let row = table
        .rows
        .iter()
        .find(|row| row.axis_range().is_some_and(|range| range.contains(value)));

    tracing::trace!(
        table_id = %table.id,
        axis = ?table.axis,
        value,
        row_id = row.map(|r| r.id.as_str()),
        "norm row lookup"
    );
    row
}
