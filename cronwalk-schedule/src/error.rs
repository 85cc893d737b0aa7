//! Error types for cron parsing and trigger search.

use crate::field::FieldKind;
use chrono::NaiveDateTime;
use thiserror::Error;

/// Result type for cron operations.
pub type CronResult<T> = Result<T, CronError>;

/// Cron-specific errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CronError {
    /// The expression does not have exactly six whitespace-separated tokens
    #[error("Invalid cron entry '{expression}': expected {expected} fields, found {found}")]
    Format {
        expression: String,
        expected: usize,
        found: usize,
    },

    /// A field was given an empty value
    #[error("{field} field value cannot be empty")]
    FieldValue { field: FieldKind },

    /// A field value could not be parsed
    #[error("{field} field contains {reason}: '{fragment}'")]
    FieldParse {
        field: FieldKind,
        fragment: String,
        reason: ParseReason,
    },

    /// No trigger instant exists within the search budget or the year range
    #[error("No trigger instant reachable for '{expression}' after {steps} search steps")]
    UnreachableSchedule { expression: String, steps: u32 },

    /// The reference instant cannot be moved by one minute
    #[error("Reference time out of range: {0}")]
    DateOutOfRange(NaiveDateTime),
}

impl CronError {
    /// Field that failed to parse, if this is a field error.
    pub fn field(&self) -> Option<FieldKind> {
        match self {
            Self::FieldValue { field } | Self::FieldParse { field, .. } => Some(*field),
            _ => None,
        }
    }

    /// Parse failure reason, if this is a `FieldParse` error.
    pub fn reason(&self) -> Option<ParseReason> {
        match self {
            Self::FieldParse { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}

/// Why a single comma-separated part of a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ParseReason {
    #[error("empty value")]
    EmptyValue,

    #[error("invalid step")]
    InvalidStep,

    #[error("unexpected character")]
    UnexpectedCharacter,

    #[error("range starting below minimum")]
    RangeBelowMinimum,

    #[error("range ending above maximum")]
    RangeAboveMaximum,

    #[error("reversed range")]
    ReversedRange,

    #[error("value below minimum")]
    ValueBelowMinimum,

    #[error("value above maximum")]
    ValueAboveMaximum,
}
