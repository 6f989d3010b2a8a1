//! Validation utilities.

use crate::{FieldError, TasklaneError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `TasklaneError` on failure.
    fn validate_request(&self) -> Result<(), TasklaneError> {
        self.validate().map_err(validation_errors_to_tasklane_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Flattens `validator::ValidationErrors` into field errors.
#[must_use]
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: (*field).to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), |m| m.to_string()),
                code: error.code.to_string(),
            })
        })
        .collect()
}

/// Converts `validator::ValidationErrors` to `TasklaneError`.
#[must_use]
pub fn validation_errors_to_tasklane_error(errors: ValidationErrors) -> TasklaneError {
    TasklaneError::InvalidFields(field_errors(&errors))
}
