use std::fmt;

use serde::Serialize;
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Validation failed: {0}")]
    InvalidField(FieldError),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// A delete refused because other rows still reference the target.
    #[error("Integrity refusal: {0}")]
    IntegrityRefusal(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// A validation failure tied to one input field.
///
/// `invalid` lists the offending values (e.g. unknown scientific names) so the
/// caller can correct exactly those entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub invalid: Vec<String>,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            invalid: Vec::new(),
        }
    }

    pub fn with_invalid(mut self, invalid: Vec<String>) -> Self {
        self.invalid = invalid;
        self
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Collapse `validator` derive output into a single [`CoreError::InvalidField`].
///
/// Nested (flattened) structs are searched too. Fields are reported in name
/// order so the reported field is deterministic when several fail at once.
impl From<ValidationErrors> for CoreError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = Vec::new();
        collect_field_errors(&errors, &mut fields);
        fields.sort();

        match fields.into_iter().next() {
            Some((field, message)) => CoreError::InvalidField(FieldError::new(field, message)),
            None => CoreError::Validation("Invalid input".into()),
        }
    }
}

fn collect_field_errors(errors: &ValidationErrors, out: &mut Vec<(String, String)>) {
    for (field, kind) in errors.errors() {
        match kind {
            ValidationErrorsKind::Field(errs) => {
                if let Some(e) = errs.first() {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("invalid value ({})", e.code));
                    out.push((field.to_string(), message));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_field_errors(inner, out),
            ValidationErrorsKind::List(items) => {
                for inner in items.values() {
                    collect_field_errors(inner, out);
                }
            }
        }
    }
}
