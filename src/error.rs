//! Error types for bibliographic conversion.
//!
//! This module provides the [`ConversionError`] type for all conversion
//! operations and the [`Result`] convenience type.

use thiserror::Error;

/// Error type for all conversion operations.
///
/// Every fallible entry point returns exactly one of these; no operation
/// partially populates its output before failing.
#[derive(Error, Debug)]
pub enum ConversionError {
    /// An input that must carry content was empty.
    #[error("Null input: {0}")]
    NullInput(String),

    /// A field required by the target model is absent or blank.
    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    /// A field is present but its value cannot be used.
    #[error("Invalid value for field '{field}': '{value}' ({reason})")]
    InvalidFieldValue {
        /// Name of the offending field.
        field: String,
        /// The raw value that was rejected.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// An identifier failed its checksum or format check.
    #[error("Invalid {kind} in field '{field}': '{value}' (expected {expected_format})")]
    InvalidIdentifier {
        /// Name of the field the identifier came from.
        field: String,
        /// Identifier kind label (e.g. "ISBN-13").
        kind: String,
        /// The raw value that was rejected.
        value: String,
        /// Human-readable description of the expected format.
        expected_format: String,
    },

    /// A year/month/day combination that is not a calendar date.
    #[error("Invalid date: year={year}, month={month:?}, day={day:?}")]
    InvalidDate {
        /// Year component.
        year: i32,
        /// Month component, if any.
        month: Option<u32>,
        /// Day component, if any.
        day: Option<u32>,
    },

    /// Free-form date text from which no year could be extracted.
    #[error("Unparsable date: {0}")]
    UnparsableDate(String),

    /// RDF serialization or parsing failure.
    #[error("RDF error: {0}")]
    Rdf(String),

    /// IO error from the underlying source/destination.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConversionError {
    /// Shorthand for [`ConversionError::InvalidFieldValue`].
    pub fn invalid_field(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidFieldValue {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Convenience type alias for [`std::result::Result`] with [`ConversionError`].
pub type Result<T> = std::result::Result<T, ConversionError>;
