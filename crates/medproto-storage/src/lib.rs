//! medproto-storage
//!
//! Repository for norm tables and protocols. Readers always receive owned
//! snapshots so an evaluation never observes a concurrent edit.

pub mod document;
pub mod error;
pub mod file;
pub mod memory;

use medproto_core::models::norm_table::NormTable;
use medproto_core::models::protocol::Protocol;

use error::StorageError;

/// Norm tables belonging to one clinician account.
pub trait NormTableStore {
    /// Every stored table, in stored order.
    fn list_tables(&self) -> Result<Vec<NormTable>, StorageError>;

    fn get_table(&self, id: &str) -> Result<NormTable, StorageError> {
        self.list_tables()?
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| StorageError::NotFound { id: id.to_string() })
    }

    /// Insert a new table or replace the one with the same id. Replacing
    /// keeps the original `created_at`; `updated_at` is always refreshed.
    fn upsert_table(&mut self, table: NormTable) -> Result<NormTable, StorageError>;

    fn delete_table(&mut self, id: &str) -> Result<(), StorageError>;

    /// Tables for one study type, in stored order.
    fn tables_for_study(&self, study_type_id: &str) -> Result<Vec<NormTable>, StorageError> {
        Ok(self
            .list_tables()?
            .into_iter()
            .filter(|t| t.study_type_id == study_type_id)
            .collect())
    }
}

/// Archive of generated protocols, newest first.
pub trait ProtocolStore {
    fn list_protocols(&self) -> Result<Vec<Protocol>, StorageError>;

    /// Insert at the front, or replace in place when the id exists.
    fn save_protocol(&mut self, protocol: Protocol) -> Result<(), StorageError>;

    fn delete_protocol(&mut self, id: &str) -> Result<(), StorageError>;
}

pub(crate) fn upsert_into(tables: &mut Vec<NormTable>, mut table: NormTable) -> NormTable {
    table.updated_at = jiff::Timestamp::now();
    match tables.iter_mut().find(|t| t.id == table.id) {
        Some(existing) => {
            table.created_at = existing.created_at;
            *existing = table.clone();
        }
        None => tables.push(table.clone()),
    }
    table
}

pub(crate) fn save_protocol_into(protocols: &mut Vec<Protocol>, protocol: Protocol) {
    match protocols.iter_mut().find(|p| p.id == protocol.id) {
        Some(existing) => *existing = protocol,
        None => protocols.insert(0, protocol),
    }
}

pub(crate) fn remove_by_id<T>(
    items: &mut Vec<T>,
    id: &str,
    id_of: impl Fn(&T) -> &str,
) -> Result<(), StorageError> {
    let before = items.len();
    items.retain(|item| id_of(item) != id);
    if items.len() == before {
        return Err(StorageError::NotFound { id: id.to_string() });
    }
    Ok(())
}
