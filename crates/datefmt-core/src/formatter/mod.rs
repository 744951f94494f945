//! Binding modern-dialect patterns to reusable formatters.
//!
//! [`bind`] compiles a pattern once; the resulting [`DateFormatter`] is cheap
//! to clone, `Send + Sync`, and parses any number of strings.

mod compile;
mod parse;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use tracing::debug;

use crate::error::{ParseError, PatternError};

use self::compile::Item;
pub use self::parse::Parsed;

/// A compiled modern-dialect pattern.
#[derive(Debug, Clone)]
pub struct DateFormatter {
    pattern: String,
    items: Arc<[Item]>,
    zoned: bool,
}

/// Result of [`DateFormatter::parse_any`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Temporal {
    Local(NaiveDateTime),
    Zoned(DateTime<FixedOffset>),
}

impl fmt::Display for Temporal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(value) => write!(f, "{}", value.format("%Y-%m-%dT%H:%M:%S%.f")),
            Self::Zoned(value) => write!(f, "{}", value.format("%Y-%m-%dT%H:%M:%S%.f%:z")),
        }
    }
}

impl DateFormatter {
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        let items = compile::compile(pattern)?;
        let zoned = items.iter().any(Item::is_zone);
        debug!(pattern, zoned, items = items.len(), "bound pattern");
        Ok(Self {
            pattern: pattern.to_owned(),
            items: items.into(),
            zoned,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Whether the pattern carries a zone label or offset.
    pub fn is_zoned(&self) -> bool {
        self.zoned
    }

    /// Reads the raw fields of `text`; the whole input must be consumed.
    pub fn parse(&self, text: &str) -> Result<Parsed, ParseError> {
        parse::parse(&self.items, text)
    }

    /// Parses `text` as a local date-time, ignoring any zone material.
    pub fn parse_local(&self, text: &str) -> Result<NaiveDateTime, ParseError> {
        self.parse(text)?.naive_datetime()
    }

    pub fn parse_zoned(&self, text: &str) -> Result<DateTime<FixedOffset>, ParseError> {
        self.parse(text)?.datetime()
    }

    /// Parses zoned when the pattern is zoned, local otherwise.
    pub fn parse_any(&self, text: &str) -> Result<Temporal, ParseError> {
        self.temporal(&self.parse(text)?)
    }

    /// Converts fields read by this formatter the way [`Self::parse_any`] does.
    pub fn temporal(&self, parsed: &Parsed) -> Result<Temporal, ParseError> {
        if self.zoned {
            parsed.datetime().map(Temporal::Zoned)
        } else {
            parsed.naive_datetime().map(Temporal::Local)
        }
    }
}

impl FromStr for DateFormatter {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for DateFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

/// Compiles `pattern` into a reusable formatter.
pub fn bind(pattern: &str) -> Result<DateFormatter, PatternError> {
    DateFormatter::new(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn formatter_is_shareable() {
        assert_send_sync::<DateFormatter>();
    }

    #[test]
    fn zoned_follows_zone_items() {
        assert!(bind("y-M-d H:mVV").unwrap().is_zoned());
        assert!(bind("H[XXX]").unwrap().is_zoned());
        assert!(!bind("y-M-d'T'H").unwrap().is_zoned());
    }

    #[test]
    fn parse_any_picks_by_zone() {
        let local = bind("y-M-d H:m").unwrap().parse_any("2020-1-2 6:5").unwrap();
        assert_eq!(local.to_string(), "2020-01-02T06:05:00");

        let zoned = bind("y-M-d H:mXXX").unwrap().parse_any("2020-1-2 6:5+08:00").unwrap();
        assert_eq!(zoned.to_string(), "2020-01-02T06:05:00+08:00");
    }

    #[test]
    fn display_and_from_str_agree() {
        let formatter: DateFormatter = "y/M/d".parse().unwrap();
        assert_eq!(formatter.to_string(), "y/M/d");
        assert_eq!(formatter.pattern(), "y/M/d");
    }
}
