//! Core error types for formkit.
//!
//! Two kinds of failure exist. A [`ValidationError`] describes a single
//! problem with a single attribute value and is collected, never raised.
//! A [`FormError`] describes a structural problem (an undeclared attribute,
//! a configuration file that does not parse) and is returned through
//! [`FormResult`].

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

/// Represents a validation error with optional field-level errors.
///
/// Validation errors can be either simple (a single message) or compound
/// (containing per-attribute error lists).
///
/// # Examples
///
/// ```
/// use formkit_core::error::ValidationError;
///
/// // Simple validation error
/// let err = ValidationError::new("is not a date", "not_a_date");
///
/// // Attribute-level validation errors
/// let mut field_errors = std::collections::HashMap::new();
/// field_errors.insert(
///     "start_on".to_string(),
///     vec![ValidationError::new("is too early", "too_early")],
/// );
/// let err = ValidationError::with_field_errors(field_errors);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The primary error message.
    pub message: String,
    /// A short code identifying the type of validation failure (e.g. "blank", "too_early").
    pub code: String,
    /// Additional parameters providing context for the error message.
    pub params: HashMap<String, String>,
    /// Per-attribute validation errors, keyed by attribute name.
    pub field_errors: HashMap<String, Vec<Self>>,
}

impl ValidationError {
    /// Creates a new `ValidationError` with a message and code.
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
            params: HashMap::new(),
            field_errors: HashMap::new(),
        }
    }

    /// Creates a `ValidationError` containing per-attribute errors.
    pub fn with_field_errors(field_errors: HashMap<String, Vec<Self>>) -> Self {
        Self {
            message: String::new(),
            code: String::new(),
            params: HashMap::new(),
            field_errors,
        }
    }

    /// Adds a parameter to this validation error.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.message.is_empty() {
            write!(f, "{}", self.message)?;
        } else if !self.field_errors.is_empty() {
            let mut fields: Vec<_> = self.field_errors.iter().collect();
            fields.sort_by(|a, b| a.0.cmp(b.0));
            let mut first = true;
            for (field, errors) in fields {
                for error in errors {
                    if !first {
                        write!(f, "; ")?;
                    }
                    write!(f, "{field}: {error}")?;
                    first = false;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// The structural error type for formkit.
///
/// Coercion failures are deliberately absent: a value that does not parse
/// is kept as raw input and reported later by validation.
#[derive(Error, Debug)]
pub enum FormError {
    /// An attribute name was written or read that the schema does not declare.
    #[error("Unknown attribute: {0}")]
    UnknownAttribute(String),

    /// A stored value could not be extracted as the requested Rust type.
    #[error("Attribute '{attribute}' does not hold a value of type {expected}")]
    TypeMismatch {
        /// The attribute being read.
        attribute: String,
        /// A description of the requested type.
        expected: String,
    },

    /// Validation ran and produced at least one error.
    #[error("Validation failed: {0}")]
    Invalid(ValidationError),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// An error occurred during serialization or deserialization.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A convenience type alias for `Result<T, FormError>`.
pub type FormResult<T> = Result<T, FormError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display_simple() {
        let err = ValidationError::new("is not a date", "not_a_date");
        assert_eq!(err.to_string(), "is not a date");
    }

    #[test]
    fn test_validation_error_display_field_errors() {
        let mut field_errors = HashMap::new();
        field_errors.insert(
            "start_on".to_string(),
            vec![ValidationError::new("is too early", "too_early")],
        );
        let err = ValidationError::with_field_errors(field_errors);
        assert_eq!(err.to_string(), "start_on: is too early");
    }

    #[test]
    fn test_validation_error_display_sorts_fields() {
        let mut field_errors = HashMap::new();
        field_errors.insert(
            "b".to_string(),
            vec![ValidationError::new("can't be blank", "blank")],
        );
        field_errors.insert(
            "a".to_string(),
            vec![ValidationError::new("is invalid", "invalid")],
        );
        let err = ValidationError::with_field_errors(field_errors);
        assert_eq!(err.to_string(), "a: is invalid; b: can't be blank");
    }

    #[test]
    fn test_validation_error_with_param() {
        let err = ValidationError::new("is too short (minimum is 8 characters)", "too_short")
            .with_param("count", "8");
        assert_eq!(err.params.get("count").unwrap(), "8");
    }

    #[test]
    fn test_form_error_display() {
        let err = FormError::UnknownAttribute("nickname".into());
        assert_eq!(err.to_string(), "Unknown attribute: nickname");

        let err = FormError::TypeMismatch {
            attribute: "age".into(),
            expected: "i64".into(),
        };
        assert_eq!(err.to_string(), "Attribute 'age' does not hold a value of type i64");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let form_err: FormError = io_err.into();
        assert!(matches!(form_err, FormError::IoError(_)));
        assert!(form_err.to_string().contains("file missing"));
    }
}
