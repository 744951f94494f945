use thiserror::Error;

use crate::shape::Field;

/// Why an input produced no pattern.
///
/// These are ordinary outcomes of inference, reported as `None` by the
/// `infer_*` entry points and as values by [`crate::inspect`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("input is blank or contains characters outside the supported alphabet")]
    Alphabet,
    #[error("no known shape matches the input")]
    UnknownShape,
    #[error("{field} has {digits} digits, outside its allowed width")]
    FieldWidth { field: Field, digits: usize },
    #[error("{field} value {value} is out of range")]
    FieldOutOfRange { field: Field, value: u32 },
    #[error("legacy patterns cannot carry a zone suffix")]
    ZoneNotAllowed,
}

/// A modern pattern that cannot be compiled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("unterminated quoted literal starting at byte {position}")]
    UnterminatedQuote { position: usize },
    #[error("unmatched ']' at byte {position}")]
    UnmatchedClose { position: usize },
    #[error("optional section opened at byte {position} is never closed")]
    UnclosedOptional { position: usize },
    #[error("unknown pattern letter '{letter}' at byte {position}")]
    UnknownLetter { letter: char, position: usize },
    #[error("pattern letter '{letter}' cannot repeat {count} times (byte {position})")]
    InvalidCount {
        letter: char,
        count: usize,
        position: usize,
    },
}

/// Text that does not conform to a bound pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected {expected} at byte {position}")]
    Mismatch {
        position: usize,
        expected: &'static str,
    },
    #[error("expected '{expected}' at byte {position}")]
    MissingLiteral { position: usize, expected: String },
    #[error("unexpected trailing input at byte {position}")]
    TrailingInput { position: usize },
    #[error("{field} value {value} is out of range")]
    FieldOutOfRange { field: Field, value: u32 },
    #[error("offset '{0}' is out of range")]
    InvalidOffset(String),
    #[error("input has no {0}")]
    MissingField(Field),
    #[error("fields do not form a valid calendar date")]
    InvalidDate,
    #[error("fields do not form a valid time of day")]
    InvalidTime,
    #[error("no offset available for a zoned result")]
    MissingOffset,
}
