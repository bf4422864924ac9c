use thiserror::Error;

#[derive(Error, Debug)]
pub enum PosError {
    /// Bad user input tied to a single form field.
    #[error("{field}: {message}")]
    Validation { field: String, message: String },
    #[error("{0}")]
    Application(String),
    #[error("{0}")]
    Auth(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PosError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn application(message: impl Into<String>) -> Self {
        Self::Application(message.into())
    }

    /// Short machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation",
            Self::Application(_) => "application",
            Self::Auth(_) => "auth",
            Self::Config(_) => "config",
            Self::Csv(_) | Self::Io(_) | Self::Json(_) => "internal",
        }
    }

    /// The offending form field, for errors shown inline.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Message shown to the kiosk operator.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PosError>;
