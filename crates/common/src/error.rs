//! Error types shared across sentry-stack crates.

use std::path::PathBuf;

/// Top-level error type for sentry-stack operations.
#[derive(Debug, thiserror::Error)]
pub enum StackError {
    #[error("Scan error: {message}")]
    Scan { message: String },

    #[error("Encoder error: {message}")]
    Encoder { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias using StackError.
pub type StackResult<T> = Result<T, StackError>;

impl StackError {
    pub fn scan(msg: impl Into<String>) -> Self {
        Self::Scan {
            message: msg.into(),
        }
    }

    pub fn encoder(msg: impl Into<String>) -> Self {
        Self::Encoder {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_message() {
        let err = StackError::encoder("ffmpeg exited with status 1");
        assert_eq!(
            err.to_string(),
            "Encoder error: ffmpeg exited with status 1"
        );
    }

    #[test]
    fn test_io_error_is_transparent() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: StackError = io.into();
        assert_eq!(err.to_string(), "gone");
    }
}
