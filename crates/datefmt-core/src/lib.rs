//! Date/time format pattern inference.
//!
//! Given a sample string such as `2020-1-2 6:6:6.6`, this crate infers the
//! pattern that parses it, in two dialects:
//!
//! - **Legacy**: fixed width, no zones (`yyyy-MM-dd HH:mm:ss.SSS`)
//! - **Modern**: flexible width with optional fractions and zone suffixes
//!   (`y-M-d H:m:s[.SSS][.SS][.S]`)
//!
//! Supported inputs are a closed catalogue of shapes: dash, slash or dot
//! separated dates, Chinese-labelled dates (`2020年1月2日`), unbroken digit
//! blocks (`20200102T060606`) and trailing zones (`Z`, `+08:00`,
//! `[Asia/Shanghai +08:00]`). Anything else yields `None`.
//!
//! # Example
//!
//! ```
//! use datefmt_core::{bind, infer_legacy, infer_modern};
//!
//! assert_eq!(infer_legacy("2020-1-2 6:6:6").as_deref(), Some("yyyy-MM-dd HH:mm:ss"));
//! let pattern = infer_modern("2020/01/2T6:16:6Z").unwrap();
//! assert_eq!(pattern, "y/M/d'T'H:m:sVV");
//!
//! let formatter = bind(&pattern).unwrap();
//! let parsed = formatter.parse("2020/01/2T6:16:6Z").unwrap();
//! assert_eq!(parsed.zone.as_deref(), Some("Z"));
//! ```

mod compose;
mod error;
mod formatter;
mod infer;
mod shape;
mod token;
mod validate;
mod zone;

pub use compose::{DOTTED_FRACTION, Dialect};
pub use error::{ParseError, PatternError, Rejection};
pub use formatter::{DateFormatter, Parsed, Temporal, bind};
pub use infer::{Inference, infer, inspect};
pub use shape::{Element, Field, FieldSpec, Grammar, Layout, ShapeTable, Width, shape_table};
pub use token::{Literal, MAX_DIGIT_RUN, Separator, Unit};
pub use zone::{ZoneSuffix, ZoneSuffixKind, is_zone_id};

/// Legacy-dialect pattern for `text`, or `None` when it has no supported
/// shape or carries a zone.
pub fn infer_legacy(text: &str) -> Option<String> {
    infer(text, Dialect::Legacy)
}

/// Modern-dialect pattern for `text`, or `None` when it has no supported shape.
pub fn infer_modern(text: &str) -> Option<String> {
    infer(text, Dialect::Modern)
}
