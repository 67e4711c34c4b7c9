//! Error types for NTGS configuration

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NtgsError {
    // State errors
    #[error("Unknown data type '{data_type}'")]
    UnknownDataType { data_type: String },

    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl NtgsError {
    pub(crate) fn unknown_data_type(data_type: impl Into<String>) -> Self {
        NtgsError::UnknownDataType { data_type: data_type.into() }
    }
}

pub type Result<T> = std::result::Result<T, NtgsError>;
