//! Error types and handling for the Ecosanté export tool

use thiserror::Error;

/// Main error type for the export tool
#[derive(Error, Debug)]
pub enum EcosanteError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// API communication errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Malformed delimited input
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// A column the form variant relies on is absent from the header row
    #[error("Missing column '{column}' in input header")]
    MissingColumn { column: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl EcosanteError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new parse error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    pub fn missing_column<S: Into<String>>(column: S) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            EcosanteError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            EcosanteError::Api { .. } => {
                "Unable to connect to external services. Please check your internet connection."
                    .to_string()
            }
            EcosanteError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            EcosanteError::Parse { message } => {
                format!("The input file could not be read: {message}")
            }
            EcosanteError::MissingColumn { column } => {
                format!("The input file has no '{column}' column. Is this the right form export?")
            }
            EcosanteError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            EcosanteError::General { message } => message.clone(),
        }
    }
}

impl From<csv::Error> for EcosanteError {
    fn from(err: csv::Error) -> Self {
        EcosanteError::parse(err.to_string())
    }
}

impl From<reqwest::Error> for EcosanteError {
    fn from(err: reqwest::Error) -> Self {
        EcosanteError::api(err.to_string())
    }
}
