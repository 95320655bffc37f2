//! Errors raised while parsing units or converting values

use thiserror::Error;
use crate::Signature;

/// Errors that can occur during unit conversion.
///
/// Conversions are pure: a failure on given inputs recurs identically, so
/// callers treat every variant as fatal for that single call only.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// A base name that is neither registered nor a prefixed registered unit
    #[error("unknown unit: {0}")]
    UnknownUnit(String),

    /// A unit expression or token with no base name at all
    #[error("malformed unit expression: {0:?}")]
    MalformedUnit(String),

    /// A transform needs a reference quantity the caller did not supply
    #[error("{transform} needs a reference quantity ({expected}) that was not given")]
    MissingReference {
        transform: &'static str,
        expected: &'static str,
    },

    /// No registered transform bridges the two signatures
    #[error("cannot convert [{from}] to [{to}]: no transform between these dimensions")]
    UnsupportedConversion { from: Signature, to: Signature },

    /// A non-linear unit (temperature scale, magnitude) raised to a power or
    /// combined with other units in one expression
    #[error("non-linear unit cannot be combined with powers or other units: {0}")]
    NonLinearCompound(String),

    /// A reference quantity given in a unit that has no linear SI factor
    #[error("reference quantity {key} must use a linear unit, got {unit}")]
    InvalidReference { key: &'static str, unit: String },
}
