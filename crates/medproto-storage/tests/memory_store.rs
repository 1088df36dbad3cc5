use medproto_core::models::norm_table::{NormTable, NormalizationAxis, PatientCategory};
use medproto_storage::memory::MemoryStore;
use medproto_storage::NormTableStore;

#[test]
fn snapshots_are_independent_of_later_writes() {
    let mut store = MemoryStore::new();
    let table = store
        .upsert_table(NormTable::new("ecg", PatientCategory::AdultFemale, "qt", NormalizationAxis::Age))
        .unwrap();

    let snapshot = store.list_tables().unwrap();
    store.delete_table(&table.id).unwrap();

    assert_eq!(snapshot.len(), 1);
    assert!(store.list_tables().unwrap().is_empty());
}

#[test]
fn preloaded_tables_keep_order() {
    let a = NormTable::new("ecg", PatientCategory::AdultMale, "hr", NormalizationAxis::Age);
    let b = NormTable::new("ecg", PatientCategory::AdultMale, "hr", NormalizationAxis::Weight);
    let store = MemoryStore::with_tables(vec![a.clone(), b.clone()]);

    let ids: Vec<_> = store.list_tables().unwrap().into_iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![a.id, b.id]);
}
