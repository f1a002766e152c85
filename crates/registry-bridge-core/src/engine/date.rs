//! Date string reformatting
//!
//! Patterns use the familiar letter syntax (`yyyy-MM-dd HH:mm:ss`), with text
//! in single quotes taken literally and `''` standing for a quote. They are
//! translated into `chrono` format items and parsed strictly.
//!
//! | Letter | Meaning                     |
//! |--------|-----------------------------|
//! | `y`    | year (`yy` is two digits)   |
//! | `M`    | month (`MMM` short name, `MMMM` full name) |
//! | `d`    | day of month                |
//! | `H`    | hour 0-23                   |
//! | `h`    | hour 1-12                   |
//! | `m`    | minute                      |
//! | `s`    | second                      |
//! | `S`    | milliseconds, any width     |
//! | `a`    | AM/PM marker                |
//! | `E`    | weekday name                |
//! | `Z`    | offset `+0000`              |
//! | `X`    | offset `+00:00`             |

use crate::error::TransformError;
use chrono::format::{Fixed, Item, Numeric, Pad, Parsed};
use chrono::{DateTime, FixedOffset, NaiveTime, Offset, TimeZone, Timelike, Utc};
use std::fmt::Write as _;
use std::iter;

#[derive(Debug, Clone)]
enum Piece {
    Item(Item<'static>),
    /// A run of `S`: a millisecond count of any width, zero padded to the run when rendered
    Millis(usize),
}

/// A compiled date pattern
#[derive(Debug, Clone)]
pub struct DatePattern {
    pieces: Vec<Piece>,
    letters: Vec<char>,
}

impl DatePattern {
    /// Compile a pattern; an unknown pattern letter or an unterminated quote is an error
    pub fn compile(pattern: &str) -> Result<Self, String> {
        let chars: Vec<char> = pattern.chars().collect();
        let mut pieces = Vec::new();
        let mut letters = Vec::new();
        let mut literal = String::new();
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            if c == '\'' {
                // '' outside quotes is a literal quote
                if chars.get(i + 1) == Some(&'\'') {
                    literal.push('\'');
                    i += 2;
                    continue;
                }
                i += 1;
                loop {
                    match chars.get(i) {
                        None => return Err(format!("unterminated quote in date pattern '{}'", pattern)),
                        Some('\'') if chars.get(i + 1) == Some(&'\'') => {
                            literal.push('\'');
                            i += 2;
                        }
                        Some('\'') => {
                            i += 1;
                            break;
                        }
                        Some(other) => {
                            literal.push(*other);
                            i += 1;
                        }
                    }
                }
                continue;
            }

            if !c.is_ascii_alphabetic() {
                literal.push(c);
                i += 1;
                continue;
            }

            let run = chars[i..].iter().take_while(|&&next| next == c).count();
            if !literal.is_empty() {
                pieces.push(Piece::Item(Item::OwnedLiteral(std::mem::take(&mut literal).into_boxed_str())));
            }
            let piece =
                letter_piece(c, run).ok_or_else(|| format!("unsupported letter '{}' in date pattern '{}'", c, pattern))?;
            pieces.push(piece);
            if !letters.contains(&c) {
                letters.push(c);
            }
            i += run;
        }

        if !literal.is_empty() {
            pieces.push(Piece::Item(Item::OwnedLiteral(literal.into_boxed_str())));
        }
        Ok(Self { pieces, letters })
    }

    fn has(&self, letter: char) -> bool {
        self.letters.contains(&letter)
    }

    /// Parse `value` strictly.
    ///
    /// Fields the pattern leaves out take their epoch values: 1970, January,
    /// day 1, midnight and UTC. `h` without `a` is a morning hour.
    pub fn parse(&self, value: &str) -> Option<DateTime<FixedOffset>> {
        let mut parsed = Parsed::new();
        let items = self.pieces.iter().map(|piece| match piece {
            Piece::Item(item) => item.clone(),
            Piece::Millis(_) => Item::Numeric(Numeric::Nanosecond, Pad::None),
        });
        chrono::format::parse(&mut parsed, value, items).ok()?;

        if !self.has('y') {
            parsed.set_year(1970).ok()?;
        }
        if !self.has('M') {
            parsed.set_month(1).ok()?;
        }
        if !self.has('d') {
            parsed.set_day(1).ok()?;
        }

        let has_hour = self.has('H') || self.has('h');
        if self.has('h') && !self.has('a') {
            parsed.set_ampm(false).ok()?;
        }
        if has_hour || self.has('m') || self.has('s') || self.has('S') {
            if !has_hour {
                parsed.set_hour(0).ok()?;
            }
            if !self.has('m') {
                parsed.set_minute(0).ok()?;
            }
            if !self.has('s') {
                parsed.set_second(0).ok()?;
            }
        }

        let date = parsed.to_naive_date().ok()?;
        let mut time = parsed.to_naive_time().unwrap_or(NaiveTime::MIN);
        if self.has('S') {
            // The nanosecond slot holds the raw millisecond count
            let millis = time.nanosecond();
            if millis >= 1_000 {
                return None;
            }
            time = time.with_nanosecond(millis * 1_000_000)?;
        }
        let offset = parsed.to_fixed_offset().unwrap_or_else(|_| Utc.fix());
        offset.from_local_datetime(&date.and_time(time)).single()
    }

    /// Render a date with this pattern
    pub fn format(&self, date: &DateTime<FixedOffset>) -> Option<String> {
        let mut out = String::new();
        for piece in &self.pieces {
            match piece {
                Piece::Item(item) => write!(out, "{}", date.format_with_items(iter::once(item))).ok()?,
                Piece::Millis(width) => {
                    let millis = (date.nanosecond() / 1_000_000).min(999);
                    write!(out, "{:0width$}", millis, width = *width).ok()?
                }
            }
        }
        Some(out)
    }
}

fn letter_piece(letter: char, run: usize) -> Option<Piece> {
    let pad = if run >= 2 { Pad::Zero } else { Pad::None };
    let item = match letter {
        'y' if run == 2 => Item::Numeric(Numeric::YearMod100, Pad::Zero),
        'y' => Item::Numeric(Numeric::Year, Pad::Zero),
        'M' if run >= 4 => Item::Fixed(Fixed::LongMonthName),
        'M' if run == 3 => Item::Fixed(Fixed::ShortMonthName),
        'M' => Item::Numeric(Numeric::Month, pad),
        'd' => Item::Numeric(Numeric::Day, pad),
        'H' => Item::Numeric(Numeric::Hour, pad),
        'h' => Item::Numeric(Numeric::Hour12, pad),
        'm' => Item::Numeric(Numeric::Minute, pad),
        's' => Item::Numeric(Numeric::Second, pad),
        'S' => return Some(Piece::Millis(run)),
        'a' => Item::Fixed(Fixed::UpperAmPm),
        'E' if run >= 4 => Item::Fixed(Fixed::LongWeekdayName),
        'E' => Item::Fixed(Fixed::ShortWeekdayName),
        'Z' => Item::Fixed(Fixed::TimezoneOffset),
        'X' => Item::Fixed(Fixed::TimezoneOffsetColon),
        _ => return None,
    };
    Some(Piece::Item(item))
}

/// Reformat `value` from one pattern into another.
///
/// Missing or unusable patterns are `InvalidDateFormat`; a value that does
/// not match the source pattern is `InvalidInput`.
pub(crate) fn reformat(
    field: &str,
    value: &str,
    from_format: Option<&str>,
    to_format: Option<&str>,
) -> Result<String, TransformError> {
    let invalid_format = |reason: String| {
        tracing::error!(field, %reason, "Invalid date format configuration");
        TransformError::InvalidDateFormat {
            field: field.to_string(),
        }
    };

    let (Some(from_format), Some(to_format)) = (from_format, to_format) else {
        return Err(invalid_format(
            "fromDateFormat or toDateFormat is missing".to_string(),
        ));
    };
    let from = DatePattern::compile(from_format).map_err(invalid_format)?;
    let to = DatePattern::compile(to_format).map_err(invalid_format)?;

    let date = from.parse(value).ok_or_else(|| {
        tracing::error!(field, value, "Invalid value for date transformation");
        TransformError::InvalidInput {
            field: field.to_string(),
            reason: format!("'{}' does not match date format '{}'", value, from_format),
        }
    })?;

    to.format(&date).ok_or_else(|| TransformError::InvalidInput {
        field: field.to_string(),
        reason: format!("'{}' cannot be rendered with date format '{}'", value, to_format),
    })
}
