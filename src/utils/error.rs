use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuakeError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("CSV output error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Feed parsing error: {message}")]
    ParseError { message: String },

    #[error("Presentation error: {message}")]
    PresentationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl QuakeError {
    pub fn parse(message: impl Into<String>) -> Self {
        QuakeError::ParseError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            QuakeError::HttpError(_) => ErrorCategory::Network,
            QuakeError::JsonError(_) | QuakeError::ParseError { .. } => ErrorCategory::Data,
            QuakeError::ConfigError { .. } | QuakeError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            QuakeError::IoError(_)
            | QuakeError::CsvError(_)
            | QuakeError::PresentationError { .. } => ErrorCategory::Output,
        }
    }

    /// Network and data failures degrade to the empty state, so they never
    /// rank above `Medium`.
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::Low,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            QuakeError::HttpError(_) => "Could not reach the earthquake service.".to_string(),
            QuakeError::JsonError(_) | QuakeError::ParseError { .. } => {
                "The earthquake feed could not be read.".to_string()
            }
            QuakeError::InvalidConfigValueError { field, value, .. } => {
                format!("'{}' is not a valid value for {}.", value, field)
            }
            QuakeError::ConfigError { message } => format!("Configuration problem: {}", message),
            QuakeError::IoError(_) | QuakeError::CsvError(_) => {
                "Could not write the earthquake list.".to_string()
            }
            QuakeError::PresentationError { message } => message.clone(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check your internet connection and the endpoint URL",
            ErrorCategory::Data => "The service may be returning an unexpected format; try again later",
            ErrorCategory::Configuration => {
                "Check the command line flags and the settings file (--config)"
            }
            ErrorCategory::Output => "Make sure standard output is writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, QuakeError>;
