//! # Error Types
//!
//! Structured errors for the fallible edges of takeoff_core: reading input
//! files and (de)serializing them. The fence engine itself never errors; it
//! returns `None` when the input describes nothing it can lay out.
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::errors::{TakeoffError, TakeoffResult};
//!
//! fn check_extension(ext: &str) -> TakeoffResult<()> {
//!     if ext != "json" && ext != "toml" {
//!         return Err(TakeoffError::invalid_input(
//!             "path",
//!             ext,
//!             "Expected a .json or .toml input file",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_extension("csv").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for takeoff_core operations
pub type TakeoffResult<T> = Result<T, TakeoffError>;

/// Structured error type for input handling.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum TakeoffError {
    /// An input value is unusable (unknown format, wrong shape, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON/TOML serialization or deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl TakeoffError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        TakeoffError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        TakeoffError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        TakeoffError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            TakeoffError::InvalidInput { .. } => "INVALID_INPUT",
            TakeoffError::FileError { .. } => "FILE_ERROR",
            TakeoffError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for TakeoffError {
    fn from(e: serde_json::Error) -> Self {
        TakeoffError::serialization(e.to_string())
    }
}

impl From<toml::de::Error> for TakeoffError {
    fn from(e: toml::de::Error) -> Self {
        TakeoffError::serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = TakeoffError::invalid_input("path", "fence.csv", "Unsupported extension");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: TakeoffError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(TakeoffError::serialization("bad").error_code(), "SERIALIZATION_ERROR");
        assert_eq!(
            TakeoffError::file_error("read", "a.json", "missing").error_code(),
            "FILE_ERROR"
        );
    }

    #[test]
    fn test_from_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        let converted: TakeoffError = err.into();
        assert_eq!(converted.error_code(), "SERIALIZATION_ERROR");
    }
}
