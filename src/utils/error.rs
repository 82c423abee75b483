use crate::domain::model::Source;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{source_site} responded with HTTP {status}")]
    Status {
        source_site: Source,
        status: reqwest::StatusCode,
    },

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV output error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid command '{input}': {reason}")]
    InvalidCommand { input: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Parsing,
    Configuration,
    Output,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ScoutError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Http(_) | Self::Status { .. } => ErrorCategory::Network,
            Self::Selector { .. } => ErrorCategory::Parsing,
            Self::Url(_) | Self::ConfigError { .. } | Self::InvalidConfigValue { .. } => {
                ErrorCategory::Configuration
            }
            Self::Io(_) | Self::Serialization(_) | Self::Csv(_) => ErrorCategory::Output,
            Self::InvalidCommand { .. } => ErrorCategory::Input,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidCommand { .. } => ErrorSeverity::Low,
            Self::Http(_) | Self::Status { .. } => ErrorSeverity::Medium,
            Self::Url(_)
            | Self::ConfigError { .. }
            | Self::InvalidConfigValue { .. }
            | Self::Serialization(_)
            | Self::Csv(_) => ErrorSeverity::High,
            Self::Selector { .. } | Self::Io(_) => ErrorSeverity::Critical,
        }
    }

    /// 使用者看得懂的錯誤描述
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Http(e) if e.is_timeout() => "A job site took too long to respond".to_string(),
            Self::Http(_) => "Could not reach a job site".to_string(),
            Self::Status {
                source_site,
                status,
            } => format!("{} returned an error page ({})", source_site, status),
            Self::Url(e) => format!("A configured site address is not a valid URL: {}", e),
            Self::Selector { selector, .. } => {
                format!("Internal selector '{}' could not be compiled", selector)
            }
            Self::Io(e) => format!("Could not read or write a file: {}", e),
            Self::Serialization(_) | Self::Csv(_) => "Could not format the results".to_string(),
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::InvalidConfigValue { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            Self::InvalidCommand { input, reason } => format!("'{}': {}", input, reason),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check your internet connection or try again later",
            ErrorCategory::Parsing => "Please report this as a bug",
            ErrorCategory::Configuration => "Review the configuration file and command-line flags",
            ErrorCategory::Output => "Check that stdout is writable and try another --format",
            ErrorCategory::Input => "Type 'help' to list the available commands",
        }
    }
}

pub type Result<T> = std::result::Result<T, ScoutError>;
