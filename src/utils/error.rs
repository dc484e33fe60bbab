use crate::core::encoder::EncodingError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PredictorError {
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error("No model was loaded from '{path}'")]
    PredictorUnavailable { path: String },

    #[error("Classifier failed: {message}")]
    ClassifierError { message: String },

    #[error("Invalid model file: {message}")]
    ModelFormatError { message: String },

    #[error("Model download failed: {0}")]
    DownloadError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Model,
    Network,
    System,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PredictorError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Encoding(_) => ErrorCategory::Input,
            Self::PredictorUnavailable { .. }
            | Self::ClassifierError { .. }
            | Self::ModelFormatError { .. } => ErrorCategory::Model,
            Self::DownloadError(_) => ErrorCategory::Network,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::System,
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Encoding(_) => ErrorSeverity::Low,
            Self::PredictorUnavailable { .. } | Self::DownloadError(_) => ErrorSeverity::Medium,
            Self::ClassifierError { .. }
            | Self::ModelFormatError { .. }
            | Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorSeverity::High,
            Self::IoError(_) | Self::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Check the submitted passenger fields and try again",
            ErrorCategory::Model => {
                "Make sure a valid model file exists at the configured path or set a model URL"
            }
            ErrorCategory::Network => "Check the model URL and network connectivity",
            ErrorCategory::System => "Check file permissions and available disk space",
            ErrorCategory::Configuration => "Review the command line flags and the TOML config",
        }
    }

    /// Single-line message shown to the person using the form.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Encoding(e) => format!("Error processing input: {}", e),
            Self::PredictorUnavailable { path } => {
                format!("The model '{}' was not found, predictions are disabled", path)
            }
            Self::ClassifierError { message } => {
                format!("Error processing input: classifier failed: {}", message)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PredictorError>;
