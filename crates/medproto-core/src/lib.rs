//! medproto-core
//!
//! Pure domain types for diagnostic protocols: patient attributes, norm
//! tables, protocols and ECG positions. No I/O; this is the shared
//! vocabulary of the medproto system.

pub mod error;
pub mod models;
