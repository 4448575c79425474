/// Failure categories surfaced to the session layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request could not complete or the service rejected it
    NetworkFailure,
    /// The payload could not be parsed as the expected shape
    DecodeFailure,
    /// A recommendation request was made with nothing liked
    EmptyInput,
}

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Please like at least one book first")]
    EmptyInput,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::HttpClient(_) | AppError::ExternalApi(_) => ErrorKind::NetworkFailure,
            AppError::Decode(_) => ErrorKind::DecodeFailure,
            AppError::EmptyInput => ErrorKind::EmptyInput,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decode(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
