//! The shape catalogue.
//!
//! Every input shape the engine understands is a [`Layout`]: an ordered list of
//! elements, one per segment the tokenizer produces. Layouts are indexed by
//! their shape signature in a process-wide [`ShapeTable`] that is built once
//! and only read afterwards.
//!
//! Two grammars coexist:
//!
//! - **Punctuated** inputs (`2020-1-2 6:06`, `2020年1月2日`) identify fields by
//!   position, so every digit run abstracts to [`SigToken::Num`] and widths are
//!   checked later by the validator.
//! - **Concatenated** inputs (`20200102`, `20200102T060606`) identify fields by
//!   length alone, so digit runs abstract to [`SigToken::Digits`].

use std::collections::HashMap;
use std::fmt;
use std::ops::RangeInclusive;
use std::sync::LazyLock;

use serde::Serialize;

use crate::token::{Literal, Segment, SegmentKind, Separator, Unit};

/// Calendar field bound to a digit run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Fraction,
}

impl Field {
    /// Pattern letter shared by both dialects.
    pub const fn letter(self) -> char {
        match self {
            Self::Year => 'y',
            Self::Month => 'M',
            Self::Day => 'd',
            Self::Hour => 'H',
            Self::Minute => 'm',
            Self::Second => 's',
            Self::Fraction => 'S',
        }
    }

    /// Legal values, or `None` when only the width is constrained.
    pub const fn range(self) -> Option<RangeInclusive<u32>> {
        match self {
            Self::Month => Some(1..=12),
            Self::Day => Some(1..=31),
            Self::Hour => Some(0..=23),
            Self::Minute | Self::Second => Some(0..=59),
            Self::Year | Self::Fraction => None,
        }
    }

    /// Width the legacy dialect always renders.
    pub const fn legacy_width(self) -> usize {
        match self {
            Self::Year => 4,
            Self::Fraction => 3,
            _ => 2,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
            Self::Fraction => "fraction",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How many digits a field may occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    Fixed(u8),
    Variable { min: u8, max: u8 },
}

impl Width {
    pub const fn min(self) -> usize {
        match self {
            Self::Fixed(n) => n as usize,
            Self::Variable { min, .. } => min as usize,
        }
    }

    pub const fn max(self) -> usize {
        match self {
            Self::Fixed(n) => n as usize,
            Self::Variable { max, .. } => max as usize,
        }
    }

    pub const fn accepts(self, len: usize) -> bool {
        len >= self.min() && len <= self.max()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: Field,
    pub width: Width,
}

impl FieldSpec {
    pub const fn fixed(field: Field, width: u8) -> Self {
        Self {
            field,
            width: Width::Fixed(width),
        }
    }

    pub const fn variable(field: Field, min: u8, max: u8) -> Self {
        Self {
            field,
            width: Width::Variable { min, max },
        }
    }
}

/// One position of a layout; matches exactly one segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    Literal(Literal),
    /// A single field occupying a whole digit run.
    Field(FieldSpec),
    /// Several fields sharing one unbroken digit run, sliced left to right.
    Packed(&'static [FieldSpec]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Grammar {
    Punctuated,
    Concatenated,
}

/// Abstracted segment used as the lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SigToken {
    /// Digit run in a punctuated input, any length.
    Num,
    /// Digit run in a concatenated input, exact length.
    Digits(u8),
    Lit(Literal),
    Word,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    elements: Vec<Element>,
    grammar: Grammar,
}

impl Layout {
    fn punctuated(elements: Vec<Element>) -> Self {
        Self {
            elements,
            grammar: Grammar::Punctuated,
        }
    }

    fn concatenated(elements: Vec<Element>) -> Self {
        Self {
            elements,
            grammar: Grammar::Concatenated,
        }
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn grammar(&self) -> Grammar {
        self.grammar
    }

    pub fn has_field(&self, field: Field) -> bool {
        self.elements.iter().any(|element| match element {
            Element::Field(spec) => spec.field == field,
            Element::Packed(specs) => specs.iter().any(|spec| spec.field == field),
            Element::Literal(_) => false,
        })
    }

    /// Zone suffixes only follow a time of day.
    pub fn accepts_zone(&self) -> bool {
        self.has_field(Field::Hour)
    }

    /// A representative input for this layout, every field at maximum width.
    pub fn sample(&self) -> String {
        let mut out = String::new();
        for element in &self.elements {
            match element {
                Element::Literal(literal) => out.push_str(literal.as_str()),
                Element::Field(spec) => out.push_str(sample_digits(*spec)),
                Element::Packed(specs) => {
                    for spec in specs.iter() {
                        out.push_str(sample_digits(*spec));
                    }
                }
            }
        }
        out
    }

    /// Every signature this layout answers to.
    fn signatures(&self) -> Vec<Vec<SigToken>> {
        let mut keys: Vec<Vec<SigToken>> = vec![Vec::with_capacity(self.elements.len())];
        for element in &self.elements {
            let choices: Vec<SigToken> = match element {
                Element::Literal(literal) => vec![SigToken::Lit(*literal)],
                Element::Field(_) => vec![SigToken::Num],
                Element::Packed(specs) => {
                    let min: usize = specs.iter().map(|spec| spec.width.min()).sum();
                    let max: usize = specs.iter().map(|spec| spec.width.max()).sum();
                    (min..=max)
                        .filter_map(|len| u8::try_from(len).ok())
                        .map(SigToken::Digits)
                        .collect()
                }
            };
            keys = keys
                .into_iter()
                .flat_map(|prefix| {
                    choices.iter().map(move |choice| {
                        let mut key = prefix.clone();
                        key.push(*choice);
                        key
                    })
                })
                .collect();
        }
        keys
    }
}

fn sample_digits(spec: FieldSpec) -> &'static str {
    let digits = match spec.field {
        Field::Year => "2024",
        Field::Month => "12",
        Field::Day => "31",
        Field::Hour => "23",
        Field::Minute => "59",
        Field::Second => "58",
        Field::Fraction => "123456789",
    };
    &digits[..spec.width.max().min(digits.len())]
}

/// Builds the lookup key for a segment sequence.
pub fn signature_of(segments: &[Segment<'_>]) -> Vec<SigToken> {
    let concatenated = is_concatenated(segments);
    segments
        .iter()
        .map(|segment| match segment.kind {
            SegmentKind::Digits if concatenated => {
                SigToken::Digits(u8::try_from(segment.text.len()).unwrap_or(u8::MAX))
            }
            SegmentKind::Digits => SigToken::Num,
            SegmentKind::Literal(literal) => SigToken::Lit(literal),
            SegmentKind::Word => SigToken::Word,
        })
        .collect()
}

/// A single digit run, or two runs split by `T`.
fn is_concatenated(segments: &[Segment<'_>]) -> bool {
    match segments {
        [run] => run.is_digits(),
        [date, t, time] => {
            date.is_digits() && t.literal() == Some(Literal::T) && time.is_digits()
        }
        _ => false,
    }
}

/// The immutable catalogue of recognised layouts.
#[derive(Debug)]
pub struct ShapeTable {
    layouts: Vec<Layout>,
    index: HashMap<Vec<SigToken>, usize>,
}

impl ShapeTable {
    fn build() -> Self {
        let layouts = catalogue();
        let mut index = HashMap::new();
        for (position, layout) in layouts.iter().enumerate() {
            for key in layout.signatures() {
                let previous = index.insert(key, position);
                debug_assert!(previous.is_none(), "two layouts share a signature");
            }
        }
        Self { layouts, index }
    }

    /// Finds the layout whose signature matches `segments`.
    pub fn lookup(&self, segments: &[Segment<'_>]) -> Option<&Layout> {
        let key = signature_of(segments);
        self.index
            .get(key.as_slice())
            .map(|&position| &self.layouts[position])
    }

    pub fn layouts(&self) -> &[Layout] {
        &self.layouts
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }
}

static SHAPE_TABLE: LazyLock<ShapeTable> = LazyLock::new(ShapeTable::build);

/// Returns the process-wide shape table, building it on first access.
pub fn shape_table() -> &'static ShapeTable {
    &SHAPE_TABLE
}

// Punctuated fields.
const YEAR: FieldSpec = FieldSpec::variable(Field::Year, 1, 4);
const MONTH: FieldSpec = FieldSpec::variable(Field::Month, 1, 2);
const DAY: FieldSpec = FieldSpec::variable(Field::Day, 1, 2);
const HOUR: FieldSpec = FieldSpec::variable(Field::Hour, 1, 2);
const MINUTE: FieldSpec = FieldSpec::variable(Field::Minute, 1, 2);
const SECOND: FieldSpec = FieldSpec::variable(Field::Second, 1, 2);
const FRACTION: FieldSpec = FieldSpec::variable(Field::Fraction, 1, 3);

// Concatenated fields.
const Y4: FieldSpec = FieldSpec::fixed(Field::Year, 4);
const M2: FieldSpec = FieldSpec::fixed(Field::Month, 2);
const D2: FieldSpec = FieldSpec::fixed(Field::Day, 2);
const H2: FieldSpec = FieldSpec::fixed(Field::Hour, 2);
const MIN2: FieldSpec = FieldSpec::fixed(Field::Minute, 2);
const S2: FieldSpec = FieldSpec::fixed(Field::Second, 2);
const S3: FieldSpec = FieldSpec::fixed(Field::Fraction, 3);

const BARE_YEAR: &[FieldSpec] = &[FieldSpec::variable(Field::Year, 3, 4)];
const YMD: &[FieldSpec] = &[Y4, M2, D2];
const HMS: &[FieldSpec] = &[H2, MIN2, S2];
const HMS_MILLI: &[FieldSpec] = &[H2, MIN2, S2, S3];

/// Unbroken digit blocks: 6, 8, 10, 12, 14 and 17 digits.
const CONCATENATED_BLOCKS: &[&[FieldSpec]] = &[
    &[Y4, M2],
    &[Y4, M2, D2],
    &[Y4, M2, D2, H2],
    &[Y4, M2, D2, H2, MIN2],
    &[Y4, M2, D2, H2, MIN2, S2],
    &[Y4, M2, D2, H2, MIN2, S2, S3],
];

fn catalogue() -> Vec<Layout> {
    let mut layouts = vec![Layout::concatenated(vec![Element::Packed(BARE_YEAR)])];
    layouts.extend(
        CONCATENATED_BLOCKS
            .iter()
            .map(|&block| Layout::concatenated(vec![Element::Packed(block)])),
    );
    for time in [HMS, HMS_MILLI] {
        layouts.push(Layout::concatenated(vec![
            Element::Packed(YMD),
            Element::Literal(Literal::T),
            Element::Packed(time),
        ]));
    }

    for sep in [Separator::Dash, Separator::Slash, Separator::Dot] {
        let sep = Element::Literal(Literal::Sep(sep));
        let year_month = vec![Element::Field(YEAR), sep, Element::Field(MONTH)];
        let date = [year_month.as_slice(), &[sep, Element::Field(DAY)]].concat();
        layouts.push(Layout::punctuated(year_month));
        for joiner in [Literal::Sep(Separator::Space), Literal::T] {
            for time in colon_times() {
                layouts.push(Layout::punctuated(joined(&date, Some(joiner), &time)));
            }
        }
        layouts.push(Layout::punctuated(date));
    }

    let year = vec![Element::Field(YEAR), unit(Unit::Year)];
    let year_month = [year.as_slice(), &[Element::Field(MONTH), unit(Unit::Month)]].concat();
    let date = [year_month.as_slice(), &[Element::Field(DAY), unit(Unit::Day)]].concat();
    let times: Vec<Vec<Element>> = colon_times()
        .into_iter()
        .chain(chinese_times(Unit::Hour))
        .chain(chinese_times(Unit::HourAlt))
        .collect();
    for joiner in [None, Some(Literal::Sep(Separator::Space))] {
        for time in &times {
            layouts.push(Layout::punctuated(joined(&date, joiner, time)));
        }
    }
    layouts.push(Layout::punctuated(year));
    layouts.push(Layout::punctuated(year_month));
    layouts.push(Layout::punctuated(date));

    layouts
}

fn unit(unit: Unit) -> Element {
    Element::Literal(Literal::Unit(unit))
}

fn joined(date: &[Element], joiner: Option<Literal>, time: &[Element]) -> Vec<Element> {
    let mut elements = date.to_vec();
    elements.extend(joiner.map(Element::Literal));
    elements.extend_from_slice(time);
    elements
}

/// `H`, `H:m`, `H:m:s` and `H:m:s.S`.
fn colon_times() -> Vec<Vec<Element>> {
    let colon = Element::Literal(Literal::Sep(Separator::Colon));
    let hour = vec![Element::Field(HOUR)];
    let minute = [hour.as_slice(), &[colon, Element::Field(MINUTE)]].concat();
    let second = [minute.as_slice(), &[colon, Element::Field(SECOND)]].concat();
    let fraction = [
        second.as_slice(),
        &[
            Element::Literal(Literal::Sep(Separator::Dot)),
            Element::Field(FRACTION),
        ],
    ]
    .concat();
    vec![hour, minute, second, fraction]
}

/// `H时`, `H时m分`, `H时m分s秒` and `H时m分s秒S毫秒`, with 时 or 点 for the hour.
fn chinese_times(hour_unit: Unit) -> Vec<Vec<Element>> {
    let hour = vec![Element::Field(HOUR), unit(hour_unit)];
    let minute = [hour.as_slice(), &[Element::Field(MINUTE), unit(Unit::Minute)]].concat();
    let second = [minute.as_slice(), &[Element::Field(SECOND), unit(Unit::Second)]].concat();
    let millis = [
        second.as_slice(),
        &[Element::Field(FRACTION), unit(Unit::Millis)],
    ]
    .concat();
    vec![hour, minute, second, millis]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::tokenize;

    fn lookup(text: &str) -> Option<&'static Layout> {
        let segments = tokenize(text)?;
        shape_table().lookup(&segments)
    }

    #[test]
    fn catalogue_has_no_duplicate_signatures() {
        let table = shape_table();
        let keys: usize = table.layouts().iter().map(|l| l.signatures().len()).sum();
        assert_eq!(keys, table.index.len());
        assert_eq!(table.len(), 66);
    }

    #[test]
    fn every_sample_maps_back_to_its_layout() {
        for layout in shape_table().layouts() {
            let sample = layout.sample();
            assert_eq!(lookup(&sample), Some(layout), "sample {sample}");
        }
    }

    #[test]
    fn punctuated_lookup_ignores_digit_width() {
        assert_eq!(lookup("2020-1-2 6:6:6"), lookup("2020-01-02 06:06:06"));
        assert!(lookup("2020-1-2 6:6:6").is_some());
        // Width violations surface in the validator, not here.
        assert!(lookup("20201-111-2").is_some());
    }

    #[test]
    fn concatenated_lookup_depends_on_length() {
        for len in [3, 4, 6, 8, 10, 12, 14, 17] {
            let layout = lookup(&"1".repeat(len)).expect("known length");
            assert_eq!(layout.grammar(), Grammar::Concatenated);
        }
        for len in [1, 2, 5, 7, 9, 11, 13, 15, 16] {
            assert!(lookup(&"1".repeat(len)).is_none(), "length {len}");
        }
    }

    #[test]
    fn t_split_requires_eight_date_digits() {
        assert!(lookup("20200102T060606").is_some());
        assert!(lookup("20200102T060606123").is_some());
        assert!(lookup("2020012T060606").is_none());
        assert!(lookup("20200102T0606").is_none());
    }

    #[test]
    fn mixed_separators_do_not_match() {
        assert!(lookup("2020-01/02").is_none());
        assert!(lookup("2020-01-02 06-06").is_none());
    }

    #[test]
    fn zone_acceptance_follows_the_hour_field() {
        assert!(lookup("2020-01-02 06").unwrap().accepts_zone());
        assert!(!lookup("2020-01-02").unwrap().accepts_zone());
        assert!(lookup("20200102T060606").unwrap().accepts_zone());
    }
}
