//! Error types for lumina-core
//!
//! Analysis itself never fails: malformed cells, sparse samples and
//! degenerate ranges all resolve to documented defaults. Errors exist only
//! at the edges:
//! - Dataset lookup and ingestion
//! - Configuration loading and validation
//! - Serialized collections

use lumina_io::IoError;
use thiserror::Error;

/// Main error type for lumina operations
#[derive(Error, Debug)]
pub enum LuminaError {
    /// Dataset errors
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Grid ingestion errors
    #[error("Failed to read data: {0}")]
    Io(#[from] IoError),

    /// JSON (de)serialization errors
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors related to dataset operations
#[derive(Error, Debug)]
pub enum DatasetError {
    /// No dataset with this id
    #[error("Dataset not found: {id}")]
    NotFound { id: String },

    /// Field not found
    #[error("Field '{field}' not found in dataset")]
    FieldNotFound { field: String },
}

/// Configuration validation and loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Value is out of valid range
    #[error("Value out of range: {0}")]
    OutOfRange(String),

    /// File could not be read
    #[error("Failed to read config file {path}: {message}")]
    Read { path: String, message: String },

    /// TOML parsing failed
    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization failed
    #[error("Failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Result type alias for lumina operations
pub type LuminaResult<T> = Result<T, LuminaError>;

/// Result type alias for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;

/// Validation utilities
pub mod validation {
    use super::*;

    /// Validate field exists
    pub fn validate_field_exists(field: &str, available: &[String]) -> DatasetResult<()> {
        if !available.iter().any(|f| f == field) {
            return Err(DatasetError::FieldNotFound {
                field: field.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lumina_error_display() {
        let err = LuminaError::from(ConfigError::OutOfRange("bins".to_string()));
        assert!(err.to_string().contains("bins"));
    }

    #[test]
    fn test_dataset_error_display() {
        let err = DatasetError::NotFound {
            id: "abc".to_string(),
        };
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn test_validate_field_exists() {
        let fields = vec!["x".to_string(), "y".to_string()];
        assert!(validation::validate_field_exists("x", &fields).is_ok());
        assert!(validation::validate_field_exists("w", &fields).is_err());
    }
}
