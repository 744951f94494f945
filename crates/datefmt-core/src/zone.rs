//! Recognition of a trailing zone descriptor.
//!
//! The resolver only proposes a split of the segments into core date/time
//! material and a zone suffix. The caller accepts the split when the core
//! matches a layout with a time of day, and otherwise falls back to looking
//! up the whole sequence.

use serde::Serialize;

use crate::token::{Literal, Segment, SegmentKind, Separator};

/// Classification of the zone material at the end of an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneSuffixKind {
    None,
    /// `...Z`
    BareZ,
    /// `...+08:00`
    BareOffset,
    /// `... [Asia/Shanghai +08:00]`
    BracketedIdAndOffset,
    /// `... [GMT+04:00 +04:00]`
    BracketedTextAndOffset,
}

impl ZoneSuffixKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::BareZ => "bare Z",
            Self::BareOffset => "bare offset",
            Self::BracketedIdAndOffset => "bracketed id + offset",
            Self::BracketedTextAndOffset => "bracketed text + offset",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ZoneSuffix {
    pub kind: ZoneSuffixKind,
    /// A single space separates the zone from the time.
    pub gap: bool,
    /// The offset carries a seconds part (`+05:30:15`).
    pub offset_seconds: bool,
}

impl ZoneSuffix {
    pub const NONE: Self = Self {
        kind: ZoneSuffixKind::None,
        gap: false,
        offset_seconds: false,
    };

    pub fn is_none(&self) -> bool {
        self.kind == ZoneSuffixKind::None
    }
}

/// Segments before the zone, plus the zone itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split<'s, 'a> {
    pub core: &'s [Segment<'a>],
    pub zone: ZoneSuffix,
}

/// Proposes a core/zone split when the input ends in zone material.
///
/// `text` is the string the segments were produced from.
pub fn resolve<'s, 'a>(segments: &'s [Segment<'a>], text: &'a str) -> Option<Split<'s, 'a>> {
    let (last, init) = segments.split_last()?;
    match last.kind {
        SegmentKind::Literal(Literal::Z) => Some(split(init, ZoneSuffixKind::BareZ, false)),
        SegmentKind::Digits => {
            let (core, seconds) = strip_offset(segments)?;
            Some(split(core, ZoneSuffixKind::BareOffset, seconds))
        }
        SegmentKind::Literal(Literal::Close) => {
            let open = init
                .iter()
                .rposition(|segment| segment.literal() == Some(Literal::Open))?;
            let (kind, seconds) = classify_bracket(&init[open + 1..], text)?;
            Some(split(&init[..open], kind, seconds))
        }
        _ => None,
    }
}

fn split<'s, 'a>(core: &'s [Segment<'a>], kind: ZoneSuffixKind, offset_seconds: bool) -> Split<'s, 'a> {
    let (core, gap) = match core.split_last() {
        Some((last, rest)) if last.literal() == Some(Literal::Sep(Separator::Space)) => {
            (rest, true)
        }
        _ => (core, false),
    };
    Split {
        core,
        zone: ZoneSuffix {
            kind,
            gap,
            offset_seconds,
        },
    }
}

/// Strips a trailing `±HH:MM` or `±HH:MM:SS`, reporting whether seconds were present.
fn strip_offset<'s, 'a>(segments: &'s [Segment<'a>]) -> Option<(&'s [Segment<'a>], bool)> {
    if let Some(rest) = match_offset(segments, true) {
        return Some((rest, true));
    }
    match_offset(segments, false).map(|rest| (rest, false))
}

fn match_offset<'s, 'a>(segments: &'s [Segment<'a>], with_seconds: bool) -> Option<&'s [Segment<'a>]> {
    let len = if with_seconds { 6 } else { 4 };
    let at = segments.len().checked_sub(len)?;
    let (rest, tail) = segments.split_at(at);
    let sign = tail[0].literal().is_some_and(Literal::is_sign);
    let hours = two_digits(&tail[1], 18);
    let minutes = is_colon(&tail[2]) && two_digits(&tail[3], 59);
    let seconds = !with_seconds || (is_colon(&tail[4]) && two_digits(&tail[5], 59));
    (sign && hours && minutes && seconds).then_some(rest)
}

fn two_digits(segment: &Segment<'_>, max: u32) -> bool {
    segment.is_digits()
        && segment.text.len() == 2
        && segment.text.parse::<u32>().is_ok_and(|value| value <= max)
}

fn is_colon(segment: &Segment<'_>) -> bool {
    segment.literal() == Some(Literal::Sep(Separator::Colon))
}

/// Classifies the interior of `[label offset]`.
fn classify_bracket(interior: &[Segment<'_>], text: &str) -> Option<(ZoneSuffixKind, bool)> {
    let (head, seconds) = strip_offset(interior)?;
    let (space, label) = head.split_last()?;
    if space.literal() != Some(Literal::Sep(Separator::Space)) {
        return None;
    }
    let (first, last) = (label.first()?, label.last()?);
    if first.kind != SegmentKind::Word || !label.iter().all(is_label_segment) {
        return None;
    }
    let raw = &text[first.start..last.end()];
    let kind = if is_zone_id(raw) {
        ZoneSuffixKind::BracketedIdAndOffset
    } else {
        ZoneSuffixKind::BracketedTextAndOffset
    };
    Some((kind, seconds))
}

/// Segments a `VV` token reads back: words, digits, `/`, `+`, `-` and `:`.
fn is_label_segment(segment: &Segment<'_>) -> bool {
    match segment.kind {
        SegmentKind::Word | SegmentKind::Digits => true,
        SegmentKind::Literal(literal) => matches!(
            literal,
            Literal::Plus
                | Literal::Sep(Separator::Slash | Separator::Dash | Separator::Colon)
        ),
    }
}

/// Region/city identifiers (`Asia/Shanghai`, `Etc/GMT+8`) and short
/// upper-case abbreviations (`CST`, `UTC`, `AEST`).
pub fn is_zone_id(label: &str) -> bool {
    if let Some((area, location)) = label.split_once('/') {
        let area_ok = !area.is_empty() && area.bytes().all(|b| b.is_ascii_alphabetic() || b == b'_');
        let location_ok = location.split('/').all(|part| {
            !part.is_empty()
                && part
                    .bytes()
                    .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'+' | b'-'))
        });
        return area_ok && location_ok;
    }
    (3..=4).contains(&label.len()) && label.bytes().all(|b| b.is_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::tokenize;

    fn zone_of(text: &str) -> Option<(ZoneSuffix, String)> {
        let segments = tokenize(text)?;
        let split = resolve(&segments, text)?;
        let core = match (split.core.first(), split.core.last()) {
            (Some(first), Some(last)) => text[first.start..last.end()].to_string(),
            _ => String::new(),
        };
        Some((split.zone, core))
    }

    #[test]
    fn recognises_bare_z() {
        let (zone, core) = zone_of("2020-01-02T06:16:06Z").unwrap();
        assert_eq!(zone.kind, ZoneSuffixKind::BareZ);
        assert!(!zone.gap);
        assert_eq!(core, "2020-01-02T06:16:06");

        let (zone, _) = zone_of("2020-01-02 06:16 Z").unwrap();
        assert!(zone.gap);
    }

    #[test]
    fn recognises_bare_offsets() {
        let (zone, core) = zone_of("2020-01-02 06:06:06-08:00").unwrap();
        assert_eq!(zone.kind, ZoneSuffixKind::BareOffset);
        assert!(!zone.offset_seconds);
        assert_eq!(core, "2020-01-02 06:06:06");

        let (zone, core) = zone_of("2020-01-02 06:06+05:30:15").unwrap();
        assert!(zone.offset_seconds);
        assert_eq!(core, "2020-01-02 06:06");
    }

    #[test]
    fn ignores_out_of_range_offsets() {
        assert!(zone_of("2020-01-02 06:06+19:00").is_none());
        assert!(zone_of("2020-01-02 06:06+08:60").is_none());
    }

    #[test]
    fn does_not_mistake_dates_for_offsets() {
        assert!(zone_of("2020-01-02").is_none());
        assert!(zone_of("2020-01-02 06:06:06").is_none());
    }

    #[test]
    fn classifies_bracketed_labels() {
        let (zone, core) = zone_of("2020-01-02 06:06 [Asia/Shanghai +08:00]").unwrap();
        assert_eq!(zone.kind, ZoneSuffixKind::BracketedIdAndOffset);
        assert!(zone.gap);
        assert_eq!(core, "2020-01-02 06:06");

        let (zone, _) = zone_of("6:6:6 [GMT+04:00 +04:00]").unwrap();
        assert_eq!(zone.kind, ZoneSuffixKind::BracketedTextAndOffset);

        let (zone, _) = zone_of("6:6:6[CST -06:00]").unwrap();
        assert_eq!(zone.kind, ZoneSuffixKind::BracketedIdAndOffset);
        assert!(!zone.gap);
    }

    #[test]
    fn requires_label_and_offset_in_brackets() {
        assert!(zone_of("6:6:6 [Asia/Shanghai]").is_none());
        assert!(zone_of("6:6:6 [+08:00]").is_none());
        assert!(zone_of("6:6:6 [Beijing Time +08:00]").is_none());
        assert!(zone_of("6:6:6 [Asia/Shanghai+08:00]").is_none());
    }

    #[test]
    fn rejects_labels_outside_the_zone_id_alphabet() {
        assert!(zone_of("2020-01-02 06:06 [GMT.x +01:00]").is_none());
        assert!(zone_of("2020-01-02 06:06 [GMT时 +01:00]").is_none());

        let (zone, _) = zone_of("2020-01-02 06:06 [Etc/GMT-8 +08:00]").unwrap();
        assert_eq!(zone.kind, ZoneSuffixKind::BracketedIdAndOffset);
    }

    #[test]
    fn zone_id_syntax() {
        assert!(is_zone_id("Asia/Shanghai"));
        assert!(is_zone_id("America/Argentina/Buenos_Aires"));
        assert!(is_zone_id("Etc/GMT+8"));
        assert!(is_zone_id("UTC"));
        assert!(!is_zone_id("GMT+04:00"));
        assert!(!is_zone_id("Zulu"));
        assert!(!is_zone_id("Asia/"));
    }
}
