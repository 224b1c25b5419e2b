use thiserror::Error;

#[derive(Error, Debug)]
pub enum GamedayError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data source unavailable: {0}")]
    DataSourceUnavailable(String),

    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl GamedayError {
    /// Whether trying the same request again could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            GamedayError::DataSourceUnavailable(_)
            | GamedayError::Http(_)
            | GamedayError::Io(_) => true,
            GamedayError::InvalidInput(_)
            | GamedayError::Database(_)
            | GamedayError::Config(_)
            | GamedayError::Json(_)
            | GamedayError::Rejected(_)
            | GamedayError::NotFound(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, GamedayError>;
