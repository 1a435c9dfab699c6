pub type AppResult<T> = Result<T, AppError>;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("I/O error: {context}")]
    Io {
        #[source]
        source: std::io::Error,
        context: String,
    },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("invalid config: {0}")]
    Config(String),
    #[error("record store failed: {reason}")]
    Store { reason: String },
    #[error("replay failed at step {step}: {message}")]
    Replay { step: usize, message: String },
}

impl From<std::io::Error> for AppError {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            source,
            context: "I/O operation failed".to_string(),
        }
    }
}

impl AppError {
    pub fn io_with_context(source: std::io::Error, context: impl Into<String>) -> Self {
        Self::Io {
            source,
            context: context.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn store(reason: impl Into<String>) -> Self {
        Self::Store {
            reason: reason.into(),
        }
    }

    pub fn replay(step: usize, message: impl Into<String>) -> Self {
        Self::Replay {
            step,
            message: message.into(),
        }
    }

    /// Human-readable reason without the variant prefix, for user-facing alerts.
    pub fn reason(&self) -> String {
        match self {
            Self::Store { reason } => reason.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn store_error_exposes_bare_reason() {
        let err = AppError::store("permission denied");
        assert_eq!(err.to_string(), "record store failed: permission denied");
        assert_eq!(err.reason(), "permission denied");
    }

    #[test]
    fn replay_error_names_step() {
        let err = AppError::replay(4, "unknown element");
        assert!(matches!(err, AppError::Replay { step: 4, .. }));
        assert_eq!(err.to_string(), "replay failed at step 4: unknown element");
    }
}
