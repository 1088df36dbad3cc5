pub mod ecg;
pub mod norm_table;
pub mod patient;
pub mod protocol;
pub mod study;
