//! Single-pass tokenizer for date/time strings.
//!
//! The scanner walks the input once and emits one [`Segment`] per digit run or
//! canonical literal symbol. Brackets are special: on `[` the scanner locates
//! the matching `]` and scans the interior again in bracket mode, where ASCII
//! words (zone labels such as `Asia` or `GMT`) become legal.
//!
//! Anything outside the supported alphabet aborts the scan, which the engine
//! reports as "no pattern".

use serde::Serialize;

/// Longest digit run the tokenizer accepts.
pub const MAX_DIGIT_RUN: usize = 17;

/// ASCII separators that may sit between numeric fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Separator {
    Dash,
    Slash,
    Dot,
    Colon,
    Space,
}

impl Separator {
    /// Canonical text of the separator.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dash => "-",
            Self::Slash => "/",
            Self::Dot => ".",
            Self::Colon => ":",
            Self::Space => " ",
        }
    }

    fn from_char(ch: char) -> Option<Self> {
        match ch {
            '-' => Some(Self::Dash),
            '/' => Some(Self::Slash),
            '.' => Some(Self::Dot),
            ':' => Some(Self::Colon),
            ' ' => Some(Self::Space),
            _ => None,
        }
    }
}

/// Chinese unit glyphs that label the digit run before them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// 年
    Year,
    /// 月
    Month,
    /// 日
    Day,
    /// 时
    Hour,
    /// 点, colloquial hour marker
    HourAlt,
    /// 分
    Minute,
    /// 秒
    Second,
    /// 毫秒
    Millis,
}

impl Unit {
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Year => "年",
            Self::Month => "月",
            Self::Day => "日",
            Self::Hour => "时",
            Self::HourAlt => "点",
            Self::Minute => "分",
            Self::Second => "秒",
            Self::Millis => "毫秒",
        }
    }

    // 毫秒 spans two glyphs and is matched before single characters.
    fn from_char(ch: char) -> Option<Self> {
        match ch {
            '年' => Some(Self::Year),
            '月' => Some(Self::Month),
            '日' => Some(Self::Day),
            '时' => Some(Self::Hour),
            '点' => Some(Self::HourAlt),
            '分' => Some(Self::Minute),
            '秒' => Some(Self::Second),
            _ => None,
        }
    }
}

/// A canonical non-digit symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Literal {
    Sep(Separator),
    /// The ISO date/time designator `T`.
    T,
    /// The UTC designator `Z`.
    Z,
    /// `+`, only meaningful as an offset sign.
    Plus,
    Unit(Unit),
    Open,
    Close,
}

impl Literal {
    /// Canonical text of the symbol, as it appears in the input.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sep(sep) => sep.as_str(),
            Self::T => "T",
            Self::Z => "Z",
            Self::Plus => "+",
            Self::Unit(unit) => unit.glyph(),
            Self::Open => "[",
            Self::Close => "]",
        }
    }

    /// Whether the symbol can start a numeric offset.
    pub const fn is_sign(self) -> bool {
        matches!(self, Self::Plus | Self::Sep(Separator::Dash))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// A maximal run of ASCII digits.
    Digits,
    Literal(Literal),
    /// A run of ASCII letters or underscores; only produced inside brackets.
    Word,
}

/// One token of the input, borrowing its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub kind: SegmentKind,
    pub text: &'a str,
    /// Byte offset of `text` within the scanned string.
    pub start: usize,
}

impl<'a> Segment<'a> {
    fn new(kind: SegmentKind, text: &'a str, start: usize) -> Self {
        Self { kind, text, start }
    }

    pub fn is_digits(&self) -> bool {
        self.kind == SegmentKind::Digits
    }

    pub fn literal(&self) -> Option<Literal> {
        match self.kind {
            SegmentKind::Literal(literal) => Some(literal),
            _ => None,
        }
    }

    /// Byte offset just past the segment.
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }
}

/// Tokenizes `text`, returning `None` when it is blank or leaves the alphabet.
pub fn tokenize(text: &str) -> Option<Vec<Segment<'_>>> {
    if text.trim().is_empty() {
        return None;
    }
    let mut segments = Vec::with_capacity(16);
    scan(text, 0, false, &mut segments)?;
    Some(segments)
}

fn scan<'a>(
    text: &'a str,
    base: usize,
    bracketed: bool,
    out: &mut Vec<Segment<'a>>,
) -> Option<()> {
    let mut pos = 0;
    while let Some(ch) = text[pos..].chars().next() {
        let rest = &text[pos..];
        let start = base + pos;

        if ch.is_ascii_digit() {
            let len = rest.bytes().take_while(u8::is_ascii_digit).count();
            if len > MAX_DIGIT_RUN {
                return None;
            }
            out.push(Segment::new(SegmentKind::Digits, &rest[..len], start));
            pos += len;
            continue;
        }

        if bracketed && is_word_byte(ch) {
            let len = rest.chars().take_while(|&c| is_word_byte(c)).count();
            out.push(Segment::new(SegmentKind::Word, &rest[..len], start));
            pos += len;
            continue;
        }

        if ch == '[' && !bracketed {
            let close = rest.find(']')?;
            out.push(Segment::new(
                SegmentKind::Literal(Literal::Open),
                &rest[..1],
                start,
            ));
            scan(&rest[1..close], start + 1, true, out)?;
            out.push(Segment::new(
                SegmentKind::Literal(Literal::Close),
                &rest[close..=close],
                start + close,
            ));
            pos += close + 1;
            continue;
        }

        let millis = Unit::Millis.glyph();
        if rest.starts_with(millis) {
            let literal = Literal::Unit(Unit::Millis);
            out.push(Segment::new(
                SegmentKind::Literal(literal),
                &rest[..millis.len()],
                start,
            ));
            pos += millis.len();
            continue;
        }

        let literal = literal_for(ch)?;
        let len = ch.len_utf8();
        out.push(Segment::new(
            SegmentKind::Literal(literal),
            &rest[..len],
            start,
        ));
        pos += len;
    }
    Some(())
}

// Letters only reach here outside brackets, where just T and Z are legal.
fn literal_for(ch: char) -> Option<Literal> {
    if let Some(sep) = Separator::from_char(ch) {
        return Some(Literal::Sep(sep));
    }
    if let Some(unit) = Unit::from_char(ch) {
        return Some(Literal::Unit(unit));
    }
    match ch {
        'T' => Some(Literal::T),
        'Z' => Some(Literal::Z),
        '+' => Some(Literal::Plus),
        _ => None,
    }
}

fn is_word_byte(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}
