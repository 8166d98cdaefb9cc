//! Error types for the `alpha-models` crate.
//!
//! The estimators return [`ModelError`]; its `Display` text is the message
//! shown to the visitor.

/// Errors produced when parsing or validating model inputs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// Weight or height was missing, non-numeric, zero or negative.
    #[error("Please enter valid weight and height.")]
    InvalidBodyMeasurements,

    /// Activity duration was missing, non-numeric, zero or negative.
    #[error("Please enter duration in minutes (greater than 0).")]
    InvalidDuration,
}
