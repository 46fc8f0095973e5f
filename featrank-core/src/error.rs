//! Error types for the featrank-core crate.

use thiserror::Error;

use crate::model::ModelKind;

/// Top-level error type for importance resolution.
#[derive(Debug, Error)]
pub enum ImportanceError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error(
        "{model} doesn't have feature importances. You should specify one of {}",
        ModelKind::supported_list()
    )]
    UnsupportedModelType { model: String },

    #[error("Column not found in schema: {0}")]
    ColumnNotFound(String),

    #[error("Column '{column}' has no usable attribute metadata: {detail}")]
    MissingAttributeMetadata { column: String, detail: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),
}

impl ImportanceError {
    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn unsupported_model(model: impl Into<String>) -> Self {
        Self::UnsupportedModelType {
            model: model.into(),
        }
    }

    pub fn column_not_found(column: impl Into<String>) -> Self {
        Self::ColumnNotFound(column.into())
    }

    pub fn missing_metadata(column: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::MissingAttributeMetadata {
            column: column.into(),
            detail: detail.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ImportanceError>;
