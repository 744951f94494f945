//! Width and range checks for the digit runs bound to a layout.
//!
//! No calendar consistency is checked here: `2020-02-31` passes because the
//! day is within 1–31. Whoever parses the string with the inferred pattern
//! owns that check.

use crate::error::Rejection;
use crate::shape::{Element, FieldSpec, Layout, Width};
use crate::token::Segment;

/// Checks every field of `layout` against the matching segment.
///
/// `segments` must be the sequence the layout was looked up with, so the two
/// line up element for element.
pub fn validate(layout: &Layout, segments: &[Segment<'_>]) -> Result<(), Rejection> {
    debug_assert_eq!(layout.elements().len(), segments.len());
    for (element, segment) in layout.elements().iter().zip(segments) {
        match element {
            Element::Literal(_) => {}
            Element::Field(spec) => check(*spec, segment.text)?,
            Element::Packed(specs) => check_packed(specs, segment.text)?,
        }
    }
    Ok(())
}

fn check_packed(specs: &[FieldSpec], digits: &str) -> Result<(), Rejection> {
    let mut rest = digits;
    for spec in specs {
        // A variable-width member is always alone and takes the whole run.
        let take = match spec.width {
            Width::Fixed(n) => usize::from(n),
            Width::Variable { .. } => rest.len(),
        };
        if take > rest.len() {
            return Err(Rejection::UnknownShape);
        }
        let (field_digits, tail) = rest.split_at(take);
        check(*spec, field_digits)?;
        rest = tail;
    }
    if rest.is_empty() {
        Ok(())
    } else {
        Err(Rejection::UnknownShape)
    }
}

fn check(spec: FieldSpec, digits: &str) -> Result<(), Rejection> {
    if !spec.width.accepts(digits.len()) {
        return Err(Rejection::FieldWidth {
            field: spec.field,
            digits: digits.len(),
        });
    }
    let Some(range) = spec.field.range() else {
        return Ok(());
    };
    // Ranged fields are at most two digits wide.
    let value: u32 = digits.parse().map_err(|_| Rejection::FieldWidth {
        field: spec.field,
        digits: digits.len(),
    })?;
    if range.contains(&value) {
        Ok(())
    } else {
        Err(Rejection::FieldOutOfRange {
            field: spec.field,
            value,
        })
    }
}
