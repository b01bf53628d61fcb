//! Error types for vital-sign computations.

use thiserror::Error;

/// Errors raised by classification, evaluation and series generation.
///
/// Every operation in this crate is pure; the only failure is a caller
/// passing a value outside the accepted domain.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VitalError {
    /// An argument was negative, non-finite or otherwise out of domain.
    #[error("invalid argument `{name}`: {value}")]
    InvalidArgument {
        /// Name of the offending argument.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
}

impl VitalError {
    pub(crate) fn invalid(name: &'static str, value: f64) -> Self {
        VitalError::InvalidArgument { name, value }
    }
}

/// Convenience alias for results in this crate.
pub type Result<T> = core::result::Result<T, VitalError>;
