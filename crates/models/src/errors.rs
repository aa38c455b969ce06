use thiserror::Error;

/// Rejections raised by the field rules in `subscription`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: &'static str },
}
