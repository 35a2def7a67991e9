use thiserror::Error;

/// Unified error type for the review pipeline.
///
/// AI failures are deliberately absent: they are recovered inside the
/// runner (heuristic fallback) and never reach the top-level boundary.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("configuration error: {message}")]
    Config { message: String },

    #[error("GitHub error during {operation}: {message}")]
    Github { message: String, operation: String },

    #[error("IO error: {message}")]
    Io { message: String },
}

impl AppError {
    /// Create a configuration error (missing/invalid env value or event file)
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a GitHub error with operation context
    pub fn github(message: impl Into<String>, operation: impl Into<String>) -> Self {
        Self::Github {
            message: message.into(),
            operation: operation.into(),
        }
    }

    /// Create an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helper_constructors() {
        let err = AppError::github("rate limited", "list-files");
        match err {
            AppError::Github { message, operation } => {
                assert_eq!(message, "rate limited");
                assert_eq!(operation, "list-files");
            }
            _ => panic!("Wrong variant"),
        }

        let err = AppError::config("missing GITHUB_TOKEN");
        assert!(err.to_string().contains("missing GITHUB_TOKEN"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: AppError = io.into();
        assert!(matches!(err, AppError::Io { .. }));
    }
}
