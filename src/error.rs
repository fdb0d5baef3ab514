//! Error types for the JoseAI server and client.

/// Top-level error type for start-up and serving.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// HTTP server bind or serve error.
    #[error("server error: {0}")]
    Server(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_config() {
        let err = AppError::Config("max_tokens must be greater than 0".into());
        assert_eq!(
            err.to_string(),
            "config error: max_tokens must be greater than 0"
        );
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: AppError = io.into();
        assert!(matches!(err, AppError::Io(_)));
        assert_eq!(err.to_string(), "I/O error: missing");
    }
}
