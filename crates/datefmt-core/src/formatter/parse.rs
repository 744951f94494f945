//! Execution of compiled items against input text.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use super::compile::{Item, OffsetStyle, Part};
use crate::error::ParseError;
use crate::shape::Field;

/// Raw fields read from a string by a bound formatter.
///
/// Fields the pattern does not mention stay `None`. Conversion into calendar
/// values happens in [`Parsed::naive_datetime`] and [`Parsed::datetime`],
/// which is where month lengths and leap years are checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Parsed {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub hour: Option<u32>,
    pub minute: Option<u32>,
    pub second: Option<u32>,
    pub nanosecond: Option<u32>,
    /// Zone label exactly as written (`Z`, `Asia/Shanghai`, `GMT+04:00`).
    pub zone: Option<String>,
    /// Offset from UTC, in seconds.
    pub offset_seconds: Option<i32>,
}

impl Parsed {
    /// Calendar date; a missing month or day defaults to 1.
    pub fn date(&self) -> Result<NaiveDate, ParseError> {
        let year = self.year.ok_or(ParseError::MissingField(Field::Year))?;
        NaiveDate::from_ymd_opt(year, self.month.unwrap_or(1), self.day.unwrap_or(1))
            .ok_or(ParseError::InvalidDate)
    }

    /// Time of day; missing fields default to zero.
    pub fn time(&self) -> Result<NaiveTime, ParseError> {
        NaiveTime::from_hms_nano_opt(
            self.hour.unwrap_or(0),
            self.minute.unwrap_or(0),
            self.second.unwrap_or(0),
            self.nanosecond.unwrap_or(0),
        )
        .ok_or(ParseError::InvalidTime)
    }

    pub fn naive_datetime(&self) -> Result<NaiveDateTime, ParseError> {
        Ok(self.date()?.and_time(self.time()?))
    }

    /// The explicit offset, or one implied by the zone label.
    ///
    /// Only labels that spell out their offset resolve (`Z`, `UTC`, `GMT+04:00`);
    /// region identifiers would need a timezone database.
    pub fn offset(&self) -> Option<FixedOffset> {
        match self.offset_seconds {
            Some(seconds) => FixedOffset::east_opt(seconds),
            None => self.zone.as_deref().and_then(offset_from_label),
        }
    }

    pub fn datetime(&self) -> Result<DateTime<FixedOffset>, ParseError> {
        let offset = self.offset().ok_or(ParseError::MissingOffset)?;
        self.naive_datetime()?
            .and_local_timezone(offset)
            .single()
            .ok_or(ParseError::InvalidDate)
    }
}

/// Runs `items` over the whole of `text`.
pub(crate) fn parse(items: &[Item], text: &str) -> Result<Parsed, ParseError> {
    let mut cursor = Cursor {
        text,
        pos: 0,
        parsed: Parsed::default(),
    };
    cursor.items(items)?;
    if cursor.pos != text.len() {
        return Err(ParseError::TrailingInput {
            position: cursor.pos,
        });
    }
    Ok(cursor.parsed)
}

struct Cursor<'a> {
    text: &'a str,
    pos: usize,
    parsed: Parsed,
}

impl<'a> Cursor<'a> {
    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn items(&mut self, items: &[Item]) -> Result<(), ParseError> {
        items.iter().try_for_each(|item| self.item(item))
    }

    fn item(&mut self, item: &Item) -> Result<(), ParseError> {
        match item {
            Item::Literal(expected) => {
                if self.rest().starts_with(expected.as_str()) {
                    self.pos += expected.len();
                    Ok(())
                } else {
                    Err(ParseError::MissingLiteral {
                        position: self.pos,
                        expected: expected.clone(),
                    })
                }
            }
            Item::Number { field, min, max } => {
                let value = self.number(*min, *max, field.name())?;
                self.set(*field, value)
            }
            Item::ReducedYear => {
                let value = self.number(2, 2, "two-digit year")?;
                self.set(Field::Year, 2000 + value)
            }
            Item::Fraction(digits) => {
                let value = self.number(*digits, *digits, "fraction")?;
                let scale = 10u32.pow(9 - u32::try_from(*digits).unwrap_or(9));
                self.parsed.nanosecond = Some(value * scale);
                Ok(())
            }
            Item::Millis => {
                let value = self.number(1, 3, "milliseconds")?;
                self.parsed.nanosecond = Some(value * 1_000_000);
                Ok(())
            }
            Item::ZoneLabel => self.zone_label(),
            Item::Offset(style) => self.offset(*style),
            Item::Optional(group) => {
                let (pos, parsed) = (self.pos, self.parsed.clone());
                if self.items(group).is_err() {
                    self.pos = pos;
                    self.parsed = parsed;
                }
                Ok(())
            }
        }
    }

    /// Reads between `min` and `max` digits, greedily.
    fn number(&mut self, min: usize, max: usize, expected: &'static str) -> Result<u32, ParseError> {
        let rest = self.rest();
        let count = rest.bytes().take(max).take_while(u8::is_ascii_digit).count();
        if count < min {
            return Err(ParseError::Mismatch {
                position: self.pos,
                expected,
            });
        }
        // At most nine digits, which always fits.
        let value = rest[..count].parse().map_err(|_| ParseError::Mismatch {
            position: self.pos,
            expected,
        })?;
        self.pos += count;
        Ok(value)
    }

    fn set(&mut self, field: Field, value: u32) -> Result<(), ParseError> {
        if let Some(range) = field.range()
            && !range.contains(&value)
        {
            return Err(ParseError::FieldOutOfRange { field, value });
        }
        let slot = match field {
            Field::Year => {
                self.parsed.year = Some(
                    i32::try_from(value)
                        .map_err(|_| ParseError::FieldOutOfRange { field, value })?,
                );
                return Ok(());
            }
            Field::Month => &mut self.parsed.month,
            Field::Day => &mut self.parsed.day,
            Field::Hour => &mut self.parsed.hour,
            Field::Minute => &mut self.parsed.minute,
            Field::Second => &mut self.parsed.second,
            Field::Fraction => &mut self.parsed.nanosecond,
        };
        *slot = Some(value);
        Ok(())
    }

    fn zone_label(&mut self) -> Result<(), ParseError> {
        let rest = self.rest();
        let len = rest.bytes().take_while(|&b| is_label_byte(b)).count();
        if !rest.bytes().next().is_some_and(|b| b.is_ascii_alphabetic()) {
            return Err(ParseError::Mismatch {
                position: self.pos,
                expected: "zone id",
            });
        }
        self.parsed.zone = Some(rest[..len].to_owned());
        self.pos += len;
        Ok(())
    }

    fn offset(&mut self, style: OffsetStyle) -> Result<(), ParseError> {
        let start = self.pos;
        let rest = self.rest();
        if style.accepts_z && rest.starts_with('Z') {
            self.pos += 1;
            self.parsed.offset_seconds = Some(0);
            return Ok(());
        }
        let sign = match rest.bytes().next() {
            Some(b'+') => 1,
            Some(b'-') => -1,
            _ => {
                return Err(ParseError::Mismatch {
                    position: start,
                    expected: "offset",
                });
            }
        };
        self.pos += 1;
        let hours = self.number(2, 2, "offset hours")?;
        let minutes = self.offset_part(style.minutes, style.colon, "offset minutes")?;
        let seconds = match minutes {
            Some(_) => self.offset_part(style.seconds, style.colon, "offset seconds")?,
            None => None,
        };
        let (minutes, seconds) = (minutes.unwrap_or(0), seconds.unwrap_or(0));
        let written = &self.text[start..self.pos];
        if hours > 18 || minutes > 59 || seconds > 59 {
            return Err(ParseError::InvalidOffset(written.to_owned()));
        }
        let total = i32::try_from(hours * 3600 + minutes * 60 + seconds)
            .map_err(|_| ParseError::InvalidOffset(written.to_owned()))?;
        self.parsed.offset_seconds = Some(sign * total);
        Ok(())
    }

    fn offset_part(
        &mut self,
        part: Part,
        colon: bool,
        expected: &'static str,
    ) -> Result<Option<u32>, ParseError> {
        let start = self.pos;
        let attempt = |cursor: &mut Self| -> Result<u32, ParseError> {
            if colon {
                if !cursor.rest().starts_with(':') {
                    return Err(ParseError::Mismatch {
                        position: cursor.pos,
                        expected: "':'",
                    });
                }
                cursor.pos += 1;
            }
            cursor.number(2, 2, expected)
        };
        match part {
            Part::Never => Ok(None),
            Part::Required => attempt(self).map(Some),
            Part::Optional => match attempt(self) {
                Ok(value) => Ok(Some(value)),
                Err(_) => {
                    self.pos = start;
                    Ok(None)
                }
            },
        }
    }
}

fn is_label_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'/' | b'_' | b'+' | b'-' | b':')
}

/// Offsets spelled out by a zone label: `Z`, `UTC`, `GMT`, `UT`, optionally
/// followed by `±H`, `±HH`, `±HHMM` or `±HH:MM`.
fn offset_from_label(label: &str) -> Option<FixedOffset> {
    let suffix = ["UTC", "GMT", "UT", "Z"]
        .iter()
        .find_map(|prefix| label.strip_prefix(prefix))?;
    if suffix.is_empty() {
        return FixedOffset::east_opt(0);
    }
    let (sign, body) = match suffix.as_bytes().first()? {
        b'+' => (1, &suffix[1..]),
        b'-' => (-1, &suffix[1..]),
        _ => return None,
    };
    let (hours, minutes) = match body.split_once(':') {
        Some(parts) => parts,
        None if body.len() > 2 => (body.get(..2)?, body.get(2..)?),
        None => (body, "00"),
    };
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(hours) || hours.len() > 2 || !all_digits(minutes) || minutes.len() != 2 {
        return None;
    }
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 18 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
