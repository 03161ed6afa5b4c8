//! Value parsing.
//!
//! Measurements are kept as fixed-point tenths. The grammar is
//! `['-'] digit+ '.' digit`, scanned once without going through a general
//! float parser.

use crate::error::ParseErrorKind;
use std::fmt;

/// A measurement in tenths of a unit.
///
/// `12.3` is stored as `123`, `-0.5` as `-5`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Measurement(i64);

impl Measurement {
  /// Creates a measurement from a raw count of tenths.
  #[inline]
  pub const fn from_tenths(tenths: i64) -> Self {
    Self(tenths)
  }

  /// Returns the raw count of tenths.
  #[inline]
  pub const fn tenths(self) -> i64 {
    self.0
  }
}

impl fmt::Display for Measurement {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let sign = if self.0 < 0 { "-" } else { "" };
    let magnitude = self.0.unsigned_abs();
    write!(f, "{}{}.{}", sign, magnitude / 10, magnitude % 10)
  }
}

/// Parses a value token into a [`Measurement`].
///
/// # Errors
///
/// Returns the [`ParseErrorKind`] describing the first grammar violation.
///
/// # Example
///
/// ```rust
/// use stationweave::value::{parse_measurement, Measurement};
///
/// assert_eq!(parse_measurement(b"-12.3"), Ok(Measurement::from_tenths(-123)));
/// assert!(parse_measurement(b"12").is_err());
/// ```
pub fn parse_measurement(token: &[u8]) -> Result<Measurement, ParseErrorKind> {
  let (negative, unsigned) = match token {
    [] => return Err(ParseErrorKind::Empty),
    [b'-', rest @ ..] => (true, rest),
    _ => (false, token),
  };

  let (integer, fraction) = match unsigned {
    [integer @ .., b'.', fraction] => (integer, *fraction),
    _ => return Err(shape_error(unsigned)),
  };

  if integer.is_empty() {
    return Err(ParseErrorKind::MissingIntegerDigits);
  }

  let mut tenths: i64 = 0;
  for &byte in integer {
    let digit = digit_value(byte)?;
    tenths = tenths
      .checked_mul(10)
      .and_then(|t| t.checked_add(digit))
      .ok_or(ParseErrorKind::Overflow)?;
  }
  let fraction = digit_value(fraction)?;
  tenths = tenths
    .checked_mul(10)
    .and_then(|t| t.checked_add(fraction))
    .ok_or(ParseErrorKind::Overflow)?;

  Ok(Measurement(if negative { -tenths } else { tenths }))
}

#[inline]
fn digit_value(byte: u8) -> Result<i64, ParseErrorKind> {
  if byte.is_ascii_digit() {
    Ok((byte - b'0') as i64)
  } else {
    Err(ParseErrorKind::InvalidByte(byte))
  }
}

// Classifies a token whose tail is not `'.' digit`.
fn shape_error(unsigned: &[u8]) -> ParseErrorKind {
  match unsigned.iter().position(|&b| b == b'.') {
    None => match unsigned.iter().find(|b| !b.is_ascii_digit()) {
      Some(&byte) => ParseErrorKind::InvalidByte(byte),
      None if unsigned.is_empty() => ParseErrorKind::Empty,
      None => ParseErrorKind::MissingDecimalPoint,
    },
    Some(_) => match unsigned.iter().find(|&&b| b != b'.' && !b.is_ascii_digit()) {
      Some(&byte) => ParseErrorKind::InvalidByte(byte),
      None => ParseErrorKind::FractionDigits,
    },
  }
}
