//! Error types shared across chabatch crates.

/// Top-level error type for chabatch operations.
#[derive(Debug, thiserror::Error)]
pub enum ChabatchError {
    #[error("Tool invocation error: {message}")]
    Tool { message: String },

    #[error("Pipeline error: {message}")]
    Pipeline { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using ChabatchError.
pub type ChabatchResult<T> = Result<T, ChabatchError>;

impl ChabatchError {
    pub fn tool(msg: impl Into<String>) -> Self {
        Self::Tool {
            message: msg.into(),
        }
    }

    pub fn pipeline(msg: impl Into<String>) -> Self {
        Self::Pipeline {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}
