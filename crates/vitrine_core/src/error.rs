//! Configuration error types

use thiserror::Error;

/// Errors produced while reading widget configuration from the tree
///
/// A *missing* attribute is never an error (widgets fall back to their
/// defaults); these cover values that are present but unusable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Attribute is present but its value does not parse
    #[error("invalid value '{value}' for {attr}: expected {expected}")]
    InvalidAttribute {
        attr: String,
        value: String,
        expected: &'static str,
    },

    /// Numeric attribute parsed to NaN or infinity
    #[error("non-finite value for {attr}")]
    NonFinite { attr: String },
}

/// Result type for configuration reads
pub type Result<T> = std::result::Result<T, ConfigError>;
