use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Request rejections raised before the pipeline runs. No-match conditions inside the
/// pipeline are valid outcomes, never errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Missing message in request")]
    MissingMessage,
}

pub type Result<T> = std::result::Result<T, EngineError>;
