//! medproto-norms
//!
//! Norm evaluation engine. Selects the applicable norm table row for a
//! patient, classifies measured values against it and turns the
//! classifications into conclusion text.
//!
//! Every operation is a pure function over borrowed snapshots. Missing or
//! malformed input never fails: it degrades to a `Normal` classification so
//! a protocol can always be generated.

pub mod category;
pub mod check;
pub mod conclusion;
pub mod display;
pub mod ecg;
pub mod evaluate;
pub mod matcher;

pub use category::classify_patient_category;
pub use check::{NormCheckResult, NormStatus, check_parameter_norms};
pub use conclusion::{compose_ecg_conclusion, generate_conclusion_from_norms, synthesize};
pub use evaluate::{evaluate_all, generate_conclusion, get_all_parameter_checks};
pub use matcher::find_row;
