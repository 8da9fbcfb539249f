use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Connection already exists: {0}")]
    DuplicateKey(String),

    #[error("Index out of range: {0}")]
    IndexOutOfRange(usize),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("External process error: {0}")]
    ExternalProcess(String),
}

/// Application result type alias
pub type Result<T> = std::result::Result<T, AppError>;
