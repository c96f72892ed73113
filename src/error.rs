use crate::domain::track::TrackBuildError;

/// Top-level error for the wordtape binary and its collaborators
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Export failed: {0}")]
    Export(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<TrackBuildError> for AppError {
    fn from(err: TrackBuildError) -> Self {
        match err {
            TrackBuildError::InvalidConfig(msg) => AppError::BadRequest(msg),
            TrackBuildError::EmptyInput => AppError::BadRequest("no rows to speak".to_string()),
            TrackBuildError::Export(msg) => AppError::Export(msg),
        }
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
