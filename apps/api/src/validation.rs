//! Field-level form validation shared by every flow input.
//!
//! Each input type implements [`Validate`] by pushing violations into a
//! [`FieldErrors`] collector. Violations are reported together so the client can
//! show them inline next to each field.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// A single field that failed validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    /// Wire name of the field, e.g. `resumeText` or `experience[0].company`.
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Joins violations into one line, for logs and upstream-error messages.
pub fn describe(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(FieldError::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Collector for field violations.
#[derive(Debug, Default)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError::new(field, message));
    }

    /// Requires at least `min` non-whitespace-trimmed characters.
    pub fn min_chars(&mut self, field: &str, value: &str, min: usize, message: &str) {
        if value.trim().chars().count() < min {
            self.push(field, message);
        }
    }

    pub fn required(&mut self, field: &str, value: &str, message: &str) {
        self.min_chars(field, value, 1, message);
    }

    pub fn email(&mut self, field: &str, value: &str) {
        if !EMAIL_RE.is_match(value.trim()) {
            self.push(field, "Invalid email address");
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<FieldError> {
        self.0
    }

    pub fn into_result(self) -> Result<(), AppError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(AppError::InvalidFields(self.0))
        }
    }
}

/// Implemented by every request/response type that carries schema constraints.
pub trait Validate {
    fn validate_into(&self, errors: &mut FieldErrors);

    fn validate(&self) -> Result<(), AppError> {
        let mut errors = FieldErrors::new();
        self.validate_into(&mut errors);
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_chars_counts_trimmed_chars() {
        let mut errors = FieldErrors::new();
        errors.min_chars("versionLabel", "  ab  ", 3, "too short");
        assert!(!errors.is_empty());

        let mut errors = FieldErrors::new();
        errors.min_chars("versionLabel", "v1.2", 3, "too short");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_email_shapes() {
        let mut errors = FieldErrors::new();
        errors.email("email", "jane@example.com");
        assert!(errors.is_empty());

        errors.email("email", "jane@example");
        errors.email("email", "not an email");
        assert!(matches!(
            errors.into_result(),
            Err(AppError::InvalidFields(fields)) if fields.len() == 2
        ));
    }

    #[test]
    fn test_describe_joins_fields() {
        let fields = vec![
            FieldError::new("matchScore", "must be between 0 and 100"),
            FieldError::new("tailoredMd", "must not be empty"),
        ];
        assert_eq!(
            describe(&fields),
            "matchScore: must be between 0 and 100; tailoredMd: must not be empty"
        );
    }

    #[test]
    fn test_empty_collector_is_ok() {
        assert!(FieldErrors::new().into_result().is_ok());
    }
}
