//! Compilation of modern-dialect pattern text into parse items.

use crate::error::PatternError;
use crate::shape::Field;

/// Whether an offset component is written, optional or absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Part {
    Never,
    Optional,
    Required,
}

/// Shape of an ISO offset token, by letter count:
/// `X` `+HH[mm]`, `XX` `+HHmm`, `XXX` `+HH:mm`, `XXXX` `+HHmm[ss]`,
/// `XXXXX` `+HH:mm[:ss]`. Upper-case `X` also accepts `Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OffsetStyle {
    pub colon: bool,
    pub minutes: Part,
    pub seconds: Part,
    pub accepts_z: bool,
}

impl OffsetStyle {
    fn from_count(count: usize, accepts_z: bool) -> Option<Self> {
        let (colon, minutes, seconds) = match count {
            1 => (false, Part::Optional, Part::Never),
            2 => (false, Part::Required, Part::Never),
            3 => (true, Part::Required, Part::Never),
            4 => (false, Part::Required, Part::Optional),
            5 => (true, Part::Required, Part::Optional),
            _ => return None,
        };
        Some(Self {
            colon,
            minutes,
            seconds,
            accepts_z,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Item {
    Literal(String),
    Number { field: Field, min: usize, max: usize },
    /// `yy`: two digits on top of 2000.
    ReducedYear,
    /// Exactly this many fraction digits.
    Fraction(usize),
    /// One to three digits counting milliseconds, read before a `毫秒` label.
    Millis,
    /// `VV`
    ZoneLabel,
    Offset(OffsetStyle),
    Optional(Vec<Item>),
}

impl Item {
    pub(crate) fn is_zone(&self) -> bool {
        match self {
            Self::ZoneLabel | Self::Offset(_) => true,
            Self::Optional(items) => items.iter().any(Self::is_zone),
            _ => false,
        }
    }
}

const MILLIS_LABEL: &str = "毫秒";

/// Compiles `pattern` into items.
pub(crate) fn compile(pattern: &str) -> Result<Vec<Item>, PatternError> {
    let mut items: Vec<Item> = Vec::new();
    // Enclosing item lists of open optional sections, with the `[` position.
    let mut parents: Vec<(usize, Vec<Item>)> = Vec::new();
    let mut chars = pattern.char_indices().peekable();

    while let Some((position, ch)) = chars.next() {
        match ch {
            '\'' => {
                let mut text = String::new();
                if chars.next_if(|&(_, next)| next == '\'').is_some() {
                    text.push('\'');
                } else {
                    loop {
                        match chars.next() {
                            Some((_, '\'')) => {
                                if chars.next_if(|&(_, next)| next == '\'').is_some() {
                                    text.push('\'');
                                } else {
                                    break;
                                }
                            }
                            Some((_, c)) => text.push(c),
                            None => return Err(PatternError::UnterminatedQuote { position }),
                        }
                    }
                }
                push_literal(&mut items, &text);
            }
            '[' => parents.push((position, std::mem::take(&mut items))),
            ']' => {
                let Some((_, parent)) = parents.pop() else {
                    return Err(PatternError::UnmatchedClose { position });
                };
                let group = std::mem::replace(&mut items, parent);
                items.push(Item::Optional(group));
            }
            c if c.is_ascii_alphabetic() => {
                let mut count = 1;
                while chars.next_if(|&(_, next)| next == c).is_some() {
                    count += 1;
                }
                let after = chars.peek().map_or(pattern.len(), |&(next, _)| next);
                if c == 'S' && count <= 3 && pattern[after..].starts_with(MILLIS_LABEL) {
                    items.push(Item::Millis);
                } else {
                    items.push(letter_item(c, count, position)?);
                }
            }
            c => {
                let mut buf = [0u8; 4];
                push_literal(&mut items, c.encode_utf8(&mut buf));
            }
        }
    }

    if let Some((position, _)) = parents.first() {
        return Err(PatternError::UnclosedOptional {
            position: *position,
        });
    }
    Ok(items)
}

fn push_literal(items: &mut Vec<Item>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Item::Literal(existing)) = items.last_mut() {
        existing.push_str(text);
    } else {
        items.push(Item::Literal(text.to_owned()));
    }
}

fn letter_item(letter: char, count: usize, position: usize) -> Result<Item, PatternError> {
    let invalid = PatternError::InvalidCount {
        letter,
        count,
        position,
    };
    let item = match letter {
        'y' => match count {
            1 => Item::Number {
                field: Field::Year,
                min: 1,
                max: 4,
            },
            2 => Item::ReducedYear,
            3..=9 => Item::Number {
                field: Field::Year,
                min: count,
                max: count,
            },
            _ => return Err(invalid),
        },
        'M' => numeric(Field::Month, count).ok_or(invalid)?,
        'd' => numeric(Field::Day, count).ok_or(invalid)?,
        'H' => numeric(Field::Hour, count).ok_or(invalid)?,
        'm' => numeric(Field::Minute, count).ok_or(invalid)?,
        's' => numeric(Field::Second, count).ok_or(invalid)?,
        'S' if (1..=9).contains(&count) => Item::Fraction(count),
        'V' if count == 2 => Item::ZoneLabel,
        'X' | 'x' => Item::Offset(OffsetStyle::from_count(count, letter == 'X').ok_or(invalid)?),
        'S' | 'V' => return Err(invalid),
        _ => return Err(PatternError::UnknownLetter { letter, position }),
    };
    Ok(item)
}

fn numeric(field: Field, count: usize) -> Option<Item> {
    match count {
        1 => Some(Item::Number { field, min: 1, max: 2 }),
        2 => Some(Item::Number { field, min: 2, max: 2 }),
        _ => None,
    }
}
