//! Rendering of a matched layout into one of the two pattern dialects.
//!
//! The **legacy** dialect is fixed width: every field is written at its
//! maximum width (`yyyy-MM-dd HH:mm:ss.SSS`) and zone tokens do not exist.
//!
//! The **modern** dialect is flexible: punctuated fields become single letters
//! that accept one or two digits (`y-M-d H:m:s`), fractions become optional
//! groups, and zone suffixes add `VV` / `XXX` tokens. Concatenated blocks stay
//! fixed width in both dialects since their length is what identifies them.

use serde::Serialize;

use crate::error::Rejection;
use crate::shape::{Element, Field, FieldSpec, Layout, Width};
use crate::token::{Literal, Segment, Separator, Unit};
use crate::zone::{ZoneSuffix, ZoneSuffixKind};

/// Cascading optional group that parses `.6`, `.65` and `.600` alike.
pub const DOTTED_FRACTION: &str = "[.SSS][.SS][.S]";

/// Optional millisecond count; `6毫秒`, `60毫秒` and `600毫秒` all bind to it.
pub const LABELLED_MILLIS: &str = "[SSS毫秒]";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Legacy,
    Modern,
}

impl Dialect {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Modern => "modern",
        }
    }
}

/// Renders `layout` in `dialect`.
///
/// `segments` are the core segments the layout matched; the modern dialect
/// reads the width of variable fractions from them.
pub fn render(
    layout: &Layout,
    segments: &[Segment<'_>],
    zone: ZoneSuffix,
    dialect: Dialect,
) -> Result<String, Rejection> {
    let mut out = String::with_capacity(32);
    match dialect {
        Dialect::Legacy => {
            if !zone.is_none() {
                return Err(Rejection::ZoneNotAllowed);
            }
            render_legacy(layout, &mut out);
        }
        Dialect::Modern => {
            render_modern(layout, segments, &mut out);
            push_zone(&mut out, zone);
        }
    }
    Ok(out)
}

fn render_legacy(layout: &Layout, out: &mut String) {
    for element in layout.elements() {
        match element {
            Element::Literal(literal) => push_literal(out, *literal),
            Element::Field(spec) => push_letters(out, spec.field.letter(), spec.field.legacy_width()),
            Element::Packed(specs) => {
                for spec in specs.iter() {
                    let width = match spec.width {
                        Width::Fixed(n) => usize::from(n),
                        Width::Variable { .. } => spec.field.legacy_width(),
                    };
                    push_letters(out, spec.field.letter(), width);
                }
            }
        }
    }
}

fn render_modern(layout: &Layout, segments: &[Segment<'_>], out: &mut String) {
    let elements = layout.elements();
    let mut index = 0;
    while index < elements.len() {
        let next = elements.get(index + 1);
        match (elements[index], next) {
            (Element::Literal(Literal::Sep(Separator::Dot)), Some(Element::Field(spec)))
                if spec.field == Field::Fraction =>
            {
                out.push_str(DOTTED_FRACTION);
                index += 2;
            }
            (Element::Field(spec), Some(Element::Literal(Literal::Unit(Unit::Millis))))
                if spec.field == Field::Fraction =>
            {
                out.push_str(LABELLED_MILLIS);
                index += 2;
            }
            (Element::Field(spec), _) => {
                push_flexible(out, spec, digits_at(segments, index));
                index += 1;
            }
            (Element::Packed(specs), _) => {
                for spec in specs.iter() {
                    push_flexible(out, *spec, spec.width.max());
                }
                index += 1;
            }
            (Element::Literal(literal), _) => {
                push_literal(out, literal);
                index += 1;
            }
        }
    }
}

/// Variable widths collapse to one letter; fixed widths repeat it.
fn push_flexible(out: &mut String, spec: FieldSpec, actual: usize) {
    match (spec.field, spec.width) {
        (_, Width::Fixed(n)) => push_letters(out, spec.field.letter(), usize::from(n)),
        // A fraction letter count is its digit count.
        (Field::Fraction, Width::Variable { .. }) => push_letters(out, 'S', actual),
        (field, Width::Variable { .. }) => out.push(field.letter()),
    }
}

fn digits_at(segments: &[Segment<'_>], index: usize) -> usize {
    segments.get(index).map_or(1, |segment| segment.text.len())
}

fn push_zone(out: &mut String, zone: ZoneSuffix) {
    if zone.is_none() {
        return;
    }
    if zone.gap {
        out.push(' ');
    }
    let offset = if zone.offset_seconds { "XXXXX" } else { "XXX" };
    match zone.kind {
        ZoneSuffixKind::None => {}
        ZoneSuffixKind::BareZ => out.push_str("VV"),
        ZoneSuffixKind::BareOffset => out.push_str(offset),
        ZoneSuffixKind::BracketedIdAndOffset | ZoneSuffixKind::BracketedTextAndOffset => {
            out.push_str("'['VV' '");
            out.push_str(offset);
            out.push_str("']'");
        }
    }
}

fn push_literal(out: &mut String, literal: Literal) {
    match literal {
        Literal::T => out.push_str("'T'"),
        Literal::Open => out.push_str("'['"),
        Literal::Close => out.push_str("']'"),
        other => out.push_str(other.as_str()),
    }
}

fn push_letters(out: &mut String, letter: char, count: usize) {
    out.extend(std::iter::repeat_n(letter, count));
}
