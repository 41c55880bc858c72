use thiserror::Error;

#[derive(Error, Debug)]
pub enum DrillError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),

    #[error("Unknown sequence '{0}'")]
    UnknownSequence(String),

    #[error("Terminal Error: {0}")]
    Terminal(String),
}

impl From<tempfile::PersistError> for DrillError {
    fn from(e: tempfile::PersistError) -> Self {
        DrillError::Io(e.error)
    }
}

pub type DrResult<T> = Result<T, DrillError>;
