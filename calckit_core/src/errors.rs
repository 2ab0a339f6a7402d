//! # Error Types
//!
//! Structured error types for calckit_core. Only *authoring* defects and
//! configuration problems are errors: coercion failures and domain violations
//! never leave a computation (they become sentinel values instead).
//!
//! ## Example
//!
//! ```rust
//! use calckit_core::errors::{CatalogError, CatalogResult};
//!
//! fn check_id(id: &str) -> CatalogResult<()> {
//!     if id.is_empty() {
//!         return Err(CatalogError::invalid_definition(id, "Identifier must not be empty"));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for calckit_core operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Structured error type for catalogue construction and configuration.
///
/// Every variant names the calculator (and field or output, where relevant)
/// so the owner of the data can find the defect without a debugger.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CatalogError {
    /// Two definitions registered under the same identifier
    #[error("Duplicate calculator identifier: '{id}'")]
    DuplicateCalculator { id: String },

    /// Two inputs of one definition share an identifier
    #[error("Calculator '{calculator}' declares input '{field}' more than once")]
    DuplicateInput { calculator: String, field: String },

    /// A select field without any choices
    #[error("Calculator '{calculator}': select field '{field}' has no choices")]
    MissingChoices { calculator: String, field: String },

    /// A default value that does not fit the field's kind
    #[error("Calculator '{calculator}': default for '{field}' is invalid - {reason}")]
    DefaultMismatch {
        calculator: String,
        field: String,
        reason: String,
    },

    /// A visibility condition names an input that does not exist
    #[error("Calculator '{calculator}': visibility of '{field}' depends on undeclared input '{dependency}'")]
    UnknownDependency {
        calculator: String,
        field: String,
        dependency: String,
    },

    /// A visibility condition names itself or an input declared later
    #[error("Calculator '{calculator}': visibility of '{field}' depends on '{dependency}', which is not declared before it")]
    ForwardDependency {
        calculator: String,
        field: String,
        dependency: String,
    },

    /// An output reads an input that is not declared
    #[error("Calculator '{calculator}': output '{output}' reads undeclared input '{input}'")]
    UndeclaredRead {
        calculator: String,
        output: String,
        input: String,
    },

    /// An output reads a conditionally visible input without declaring that it honours the condition
    #[error("Calculator '{calculator}': output '{output}' reads conditionally visible input '{input}' without checking its condition")]
    HiddenValueRead {
        calculator: String,
        output: String,
        input: String,
    },

    /// Any other structural problem with a definition
    #[error("Invalid calculator '{calculator}': {reason}")]
    InvalidDefinition { calculator: String, reason: String },

    /// Several defects found while building a registry
    #[error("Catalogue has {} defect(s); first: {}", errors.len(), errors.first().map(|e| e.to_string()).unwrap_or_default())]
    InvalidCatalog { errors: Vec<CatalogError> },

    /// A category name that matches no known category
    #[error("Unknown category: '{name}'")]
    UnknownCategory { name: String },

    /// Configuration file could not be read or parsed
    #[error("Configuration error in '{path}': {reason}")]
    ConfigError { path: String, reason: String },
}

impl CatalogError {
    /// Create a DuplicateCalculator error
    pub fn duplicate_calculator(id: impl Into<String>) -> Self {
        CatalogError::DuplicateCalculator { id: id.into() }
    }

    /// Create an InvalidDefinition error
    pub fn invalid_definition(calculator: impl Into<String>, reason: impl Into<String>) -> Self {
        CatalogError::InvalidDefinition {
            calculator: calculator.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnknownCategory error
    pub fn unknown_category(name: impl Into<String>) -> Self {
        CatalogError::UnknownCategory { name: name.into() }
    }

    /// Create a ConfigError
    pub fn config(path: impl Into<String>, reason: impl Into<String>) -> Self {
        CatalogError::ConfigError {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Collapse a list of defects into a single error.
    ///
    /// Returns `None` for an empty list and the defect itself when there is
    /// exactly one.
    pub fn from_many(mut errors: Vec<CatalogError>) -> Option<Self> {
        match errors.len() {
            0 => None,
            1 => errors.pop(),
            _ => Some(CatalogError::InvalidCatalog { errors }),
        }
    }

    /// True for defects that only exist because of a strict validation policy
    pub fn is_warning(&self) -> bool {
        matches!(self, CatalogError::HiddenValueRead { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CatalogError::DuplicateCalculator { .. } => "DUPLICATE_CALCULATOR",
            CatalogError::DuplicateInput { .. } => "DUPLICATE_INPUT",
            CatalogError::MissingChoices { .. } => "MISSING_CHOICES",
            CatalogError::DefaultMismatch { .. } => "DEFAULT_MISMATCH",
            CatalogError::UnknownDependency { .. } => "UNKNOWN_DEPENDENCY",
            CatalogError::ForwardDependency { .. } => "FORWARD_DEPENDENCY",
            CatalogError::UndeclaredRead { .. } => "UNDECLARED_READ",
            CatalogError::HiddenValueRead { .. } => "HIDDEN_VALUE_READ",
            CatalogError::InvalidDefinition { .. } => "INVALID_DEFINITION",
            CatalogError::InvalidCatalog { .. } => "INVALID_CATALOG",
            CatalogError::UnknownCategory { .. } => "UNKNOWN_CATEGORY",
            CatalogError::ConfigError { .. } => "CONFIG_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CatalogError::UndeclaredRead {
            calculator: "bmi-calculator".to_string(),
            output: "BMI".to_string(),
            input: "waist".to_string(),
        };
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"UndeclaredRead\""));
        let roundtrip: CatalogError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CatalogError::duplicate_calculator("x").error_code(), "DUPLICATE_CALCULATOR");
        assert_eq!(CatalogError::config("a.toml", "bad").error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_from_many() {
        assert!(CatalogError::from_many(vec![]).is_none());

        let single = CatalogError::from_many(vec![CatalogError::duplicate_calculator("a")]).unwrap();
        assert_eq!(single.error_code(), "DUPLICATE_CALCULATOR");

        let many = CatalogError::from_many(vec![
            CatalogError::duplicate_calculator("a"),
            CatalogError::duplicate_calculator("b"),
        ])
        .unwrap();
        assert_eq!(many.error_code(), "INVALID_CATALOG");
        assert!(many.to_string().starts_with("Catalogue has 2 defect(s)"));
    }
}
