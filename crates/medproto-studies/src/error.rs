use thiserror::Error;

#[derive(Debug, Error)]
pub enum StudyError {
    #[error("unknown study type: {0}")]
    UnknownStudy(String),

    #[error("unknown parameter '{parameter_id}' for study '{study_id}'")]
    UnknownParameter {
        study_id: String,
        parameter_id: String,
    },
}
