pub mod ecg;
pub mod echo;
pub mod spirometry;
