use medproto_core::models::norm_table::NormTable;
use medproto_core::models::protocol::Protocol;

use crate::error::StorageError;
use crate::{NormTableStore, ProtocolStore, remove_by_id, save_protocol_into, upsert_into};

/// Store kept entirely in memory. Used by tests and by hosts that load
/// tables from elsewhere.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Vec<NormTable>,
    protocols: Vec<Protocol>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tables(tables: Vec<NormTable>) -> Self {
        Self {
            tables,
            protocols: Vec::new(),
        }
    }
}

impl NormTableStore for MemoryStore {
    fn list_tables(&self) -> Result<Vec<NormTable>, StorageError> {
        Ok(self.tables.clone())
    }

    fn upsert_table(&mut self, table: NormTable) -> Result<NormTable, StorageError> {
        Ok(upsert_into(&mut self.tables, table))
    }

    fn delete_table(&mut self, id: &str) -> Result<(), StorageError> {
        remove_by_id(&mut self.tables, id, |t| t.id.as_str())
    }
}

impl ProtocolStore for MemoryStore {
    fn list_protocols(&self) -> Result<Vec<Protocol>, StorageError> {
        Ok(self.protocols.clone())
    }

    fn save_protocol(&mut self, protocol: Protocol) -> Result<(), StorageError> {
        save_protocol_into(&mut self.protocols, protocol);
        Ok(())
    }

    fn delete_protocol(&mut self, id: &str) -> Result<(), StorageError> {
        remove_by_id(&mut self.protocols, id, |p| p.id.as_str())
    }
}
