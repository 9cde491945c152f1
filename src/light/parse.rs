//! Text parsers for parameter values and blink patterns.
//!
//! Parameters arrive as short decimal strings from the web UI and the
//! message bus.  Nothing here allocates.

use crate::error::ParseError;

/// Digits accepted for brightness bounds and the auto-off duration.
pub const SHORT_FIELD_DIGITS: usize = 3;

/// Digits accepted for the blink session duration (fits `u16`).
pub const LONG_FIELD_DIGITS: usize = 5;

/// Parse a decimal string of at most `max_digits` ASCII digits.
///
/// Signs, whitespace and decimal points are all rejected.  The result
/// saturates at `u16::MAX`.
pub fn parse_bounded_decimal(raw: Option<&str>, max_digits: usize) -> Result<u16, ParseError> {
    let raw = raw.ok_or(ParseError::Empty)?;
    if raw.is_empty() {
        return Err(ParseError::Empty);
    }
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::NotDecimal);
    }
    if raw.len() > max_digits {
        return Err(ParseError::TooLong);
    }

    Ok(raw.bytes().fold(0u16, |acc, b| {
        acc.saturating_mul(10).saturating_add(u16::from(b - b'0'))
    }))
}

/// Iterator over the numeric tokens of a pattern string.
///
/// A token is a maximal run of ASCII digits; every other character is a
/// delimiter.  Values saturate at `u32::MAX`.
pub fn decimal_tokens(text: &str) -> impl Iterator<Item = u32> + '_ {
    text.split(|c: char| !c.is_ascii_digit())
        .filter(|tok| !tok.is_empty())
        .map(|tok| {
            tok.bytes().fold(0u32, |acc, b| {
                acc.saturating_mul(10).saturating_add(u32::from(b - b'0'))
            })
        })
}
