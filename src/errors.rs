use thiserror::Error;

/// Application-wide error types
#[derive(Debug, Error)]
pub enum AppError {
    // Ledger
    #[error("Malformed ledger line: {line:?}")]
    Format { line: String },

    // Feed retrieval and parsing
    #[error("Unable to fetch feed {url}: {message}")]
    Fetch { url: String, message: String },

    // Message builder misuse
    #[error("Message builder error: {0}")]
    State(String),

    // Chat API delivery
    #[error("Delivery to room {room} failed: {message}")]
    Delivery { room: String, message: String },

    // Configuration
    #[error("Configuration error: {0}")]
    Config(String),

    // Filesystem
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // First configuration load, nothing to fall back on
    #[error("Unable to start: {0}")]
    FatalStartup(Box<AppError>),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

/// Helper functions for common error conversions
impl AppError {
    pub fn format(line: &str) -> Self {
        AppError::Format {
            line: line.to_string(),
        }
    }

    pub fn fetch(url: &str, message: impl ToString) -> Self {
        AppError::Fetch {
            url: url.to_string(),
            message: message.to_string(),
        }
    }

    pub fn state(message: &str) -> Self {
        AppError::State(message.to_string())
    }

    pub fn delivery(room: &str, message: impl ToString) -> Self {
        AppError::Delivery {
            room: room.to_string(),
            message: message.to_string(),
        }
    }

    pub fn fatal(err: AppError) -> Self {
        match err {
            AppError::FatalStartup(_) => err,
            other => AppError::FatalStartup(Box::new(other)),
        }
    }
}

/// Convert JSON errors (config parsing)
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Config(format!("invalid JSON: {err}"))
    }
}

/// Convert URL errors (config validation)
impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::Config(format!("invalid URL: {err}"))
    }
}
