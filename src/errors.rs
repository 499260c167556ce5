use thiserror::Error;

/// Main error type for the class-observer crate
#[derive(Debug, Error)]
pub enum ObserverError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("observer is already started")]
    AlreadyStarted,

    #[error("observer is not started")]
    NotStarted,

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

pub type Result<T> = std::result::Result<T, ObserverError>;
