use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("SMTP transport failed: {0}")]
    SmtpError(#[from] lettre::transport::smtp::Error),

    #[error("Email message build failed: {0}")]
    MessageBuildError(#[from] lettre::error::Error),

    #[error("Invalid email address: {0}")]
    AddressError(#[from] lettre::address::AddressError),

    #[error("Mail delivery timed out after {0:?}")]
    DeliveryTimeout(Duration),

    #[error("Mail delivery failed: {message}")]
    DeliveryError { message: String },

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Delivery,
    Network,
    Configuration,
    Input,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RelayError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RelayError::SmtpError(_)
            | RelayError::MessageBuildError(_)
            | RelayError::AddressError(_)
            | RelayError::DeliveryTimeout(_)
            | RelayError::DeliveryError { .. } => ErrorCategory::Delivery,
            RelayError::HttpError(_) => ErrorCategory::Network,
            RelayError::ConfigError { .. }
            | RelayError::ConfigValidationError { .. }
            | RelayError::InvalidConfigValueError { .. }
            | RelayError::MissingConfigError { .. } => ErrorCategory::Configuration,
            RelayError::SerializationError(_) | RelayError::ValidationError { .. } => {
                ErrorCategory::Input
            }
            RelayError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Delivery | ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的訊息，不含傳輸層細節
    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Delivery => "Failed to send email".to_string(),
            ErrorCategory::Network => "Could not reach the contact relay".to_string(),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Input => format!("Invalid input: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            RelayError::SmtpError(_) => {
                "Check SMTP host, port, security mode and credentials (Gmail needs an app password)"
            }
            RelayError::DeliveryTimeout(_) => {
                "The mail server did not answer in time; check connectivity or raise smtp.timeout_seconds"
            }
            RelayError::AddressError(_) | RelayError::MessageBuildError(_) => {
                "Check the sender and inbox addresses"
            }
            RelayError::DeliveryError { .. } => "Retry later or check the mail server logs",
            RelayError::HttpError(_) => "Make sure the relay server is running and the endpoint URL is correct",
            RelayError::MissingConfigError { .. } => {
                "Set the missing value in the config file or environment (EMAIL_USER / EMAIL_PASS)"
            }
            RelayError::ConfigError { .. }
            | RelayError::ConfigValidationError { .. }
            | RelayError::InvalidConfigValueError { .. } => "Fix the configuration and restart",
            RelayError::ValidationError { .. } | RelayError::SerializationError(_) => {
                "Fill in name, a valid email and a message"
            }
            RelayError::IoError(_) => "Check file paths and permissions",
        }
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;
