//! The inference pipeline.
//!
//! tokenize → split off a zone suffix → look up the core shape → validate the
//! fields → render. Every step either narrows the input or rejects it; nothing
//! is retried except the zone split, which falls back to a whole-input lookup.

use tracing::trace;

use crate::compose::{Dialect, render};
use crate::error::Rejection;
use crate::shape::{Layout, shape_table};
use crate::token::{Segment, tokenize};
use crate::validate::validate;
use crate::zone::{self, ZoneSuffix};

/// Everything inference learned about one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inference {
    layout: &'static Layout,
    zone: ZoneSuffix,
    legacy: Option<String>,
    modern: String,
}

impl Inference {
    /// The catalogue layout matched by the core of the input.
    pub fn layout(&self) -> &'static Layout {
        self.layout
    }

    pub fn zone(&self) -> ZoneSuffix {
        self.zone
    }

    /// Legacy pattern; `None` for zoned inputs.
    pub fn legacy(&self) -> Option<&str> {
        self.legacy.as_deref()
    }

    pub fn modern(&self) -> &str {
        &self.modern
    }

    pub fn pattern(&self, dialect: Dialect) -> Option<&str> {
        match dialect {
            Dialect::Legacy => self.legacy(),
            Dialect::Modern => Some(self.modern()),
        }
    }
}

/// Runs the pipeline once, keeping the reason when no pattern exists.
pub fn inspect(text: &str) -> Result<Inference, Rejection> {
    let result = try_inspect(text);
    if let Err(reason) = &result {
        trace!(%reason, len = text.len(), "no pattern");
    }
    result
}

/// The pattern for `text` in `dialect`, or `None`.
pub fn infer(text: &str, dialect: Dialect) -> Option<String> {
    let segments = tokenize(text)?;
    let (layout, core, zone) = match_shape(&segments, text)?;
    let rendered = validate(layout, core).and_then(|()| render(layout, core, zone, dialect));
    match rendered {
        Ok(pattern) => Some(pattern),
        Err(reason) => {
            trace!(%reason, dialect = dialect.name(), "no pattern");
            None
        }
    }
}

fn try_inspect(text: &str) -> Result<Inference, Rejection> {
    let segments = tokenize(text).ok_or(Rejection::Alphabet)?;
    let (layout, core, zone) = match_shape(&segments, text).ok_or(Rejection::UnknownShape)?;
    validate(layout, core)?;
    let modern = render(layout, core, zone, Dialect::Modern)?;
    let legacy = render(layout, core, zone, Dialect::Legacy).ok();
    Ok(Inference {
        layout,
        zone,
        legacy,
        modern,
    })
}

/// Finds the layout for `segments`, preferring a zone split when the core
/// has a time of day.
fn match_shape<'s, 'a>(
    segments: &'s [Segment<'a>],
    text: &'a str,
) -> Option<(&'static Layout, &'s [Segment<'a>], ZoneSuffix)> {
    let table = shape_table();
    if let Some(split) = zone::resolve(segments, text)
        && let Some(layout) = table.lookup(split.core)
        && layout.accepts_zone()
    {
        return Some((layout, split.core, split.zone));
    }
    table
        .lookup(segments)
        .map(|layout| (layout, segments, ZoneSuffix::NONE))
}
