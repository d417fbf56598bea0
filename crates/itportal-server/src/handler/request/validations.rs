//! Shared validator functions.

use std::str::FromStr;

use itportal_postgres::types::TransferTarget;
use validator::ValidationError;

pub fn validation_error(code: &'static str, message: &str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.to_owned().into());
    error
}

/// Rejects empty and whitespace-only strings.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(validation_error("not_blank", "is required and cannot be blank"));
    }

    Ok(())
}

pub fn validate_transfer_target(value: &str) -> Result<(), ValidationError> {
    TransferTarget::from_str(value)
        .map(|_| ())
        .map_err(|_| validation_error("transfer_target", "must be one of TSA, TSM or Manager"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_strings_fail() {
        assert!(not_blank("Active").is_ok());
        assert!(not_blank("").is_err());
        assert!(not_blank(" \t").is_err());
    }

    #[test]
    fn transfer_targets_are_case_sensitive() {
        assert!(validate_transfer_target("TSM").is_ok());
        assert!(validate_transfer_target("Manager").is_ok());
        assert!(validate_transfer_target("manager").is_err());
    }
}
