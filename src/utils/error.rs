use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("XML error: {0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Upstream returned HTTP {status}: {message}")]
    UpstreamError { status: u16, message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Upstream,
    Io,
    Processing,
}

impl DirectoryError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DirectoryError::MissingConfigError { .. }
            | DirectoryError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            DirectoryError::ApiError(_) | DirectoryError::UpstreamError { .. } => {
                ErrorCategory::Upstream
            }
            DirectoryError::IoError(_) => ErrorCategory::Io,
            DirectoryError::SerializationError(_)
            | DirectoryError::XmlError(_)
            | DirectoryError::ProcessingError { .. } => ErrorCategory::Processing,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DirectoryError::MissingConfigError { field } => {
                format!("Required setting {} is not set", field)
            }
            DirectoryError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting {} is invalid: {}", field, reason)
            }
            DirectoryError::ApiError(e) => format!("Could not reach the data store: {}", e),
            DirectoryError::UpstreamError { status, message } => {
                format!("Data store query failed (HTTP {}): {}", status, message)
            }
            DirectoryError::IoError(e) => format!("File operation failed: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Set SUPABASE_URL and SUPABASE_SERVICE_ROLE_KEY (or put them in .env.local)"
            }
            ErrorCategory::Upstream => {
                "Check the store URL, the API key role and network access, then re-run"
            }
            ErrorCategory::Io => "Check that the output directory exists and is writable",
            ErrorCategory::Processing => "Inspect the input data for malformed rows",
        }
    }

    /// Every failure is a hard stop for a scheduled run.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

pub type Result<T> = std::result::Result<T, DirectoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_is_configuration_category() {
        let err = DirectoryError::MissingConfigError {
            field: "SUPABASE_URL".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.user_friendly_message().contains("SUPABASE_URL"));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_upstream_error_message_keeps_body() {
        let err = DirectoryError::UpstreamError {
            status: 503,
            message: "service unavailable".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Upstream);
        assert!(err.to_string().contains("503"));
        assert!(err.user_friendly_message().contains("service unavailable"));
    }
}
