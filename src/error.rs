//! # Error Handling
//!
//! Failure types for a run, plus the strategy that decides what happens when a
//! record cannot be parsed.
//!
//! ## Overview
//!
//! - **EngineError**: the single failure result of a run. Either the input could
//!   not be read (`Io`), a record was rejected under [`ErrorStrategy::Stop`]
//!   (`Parse`), or a partition worker died (`Worker`). `Cancelled` marks a
//!   partition scan abandoned because an earlier partition already failed.
//! - **ParseError**: where and why a record was rejected.
//! - **ErrorStrategy**: `Stop` aborts the run on the first bad record (default),
//!   `Skip` drops the record, logs it and keeps going.
//!
//! I/O failures are always fatal regardless of strategy. Nothing is retried.

use std::fmt;
use thiserror::Error;

/// Why a record was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
  /// The value token has no bytes at all.
  #[error("empty value")]
  Empty,
  /// The line ended before any `;` was seen.
  #[error("missing ';' delimiter")]
  MissingDelimiter,
  /// The line starts with `;`, so the key is empty.
  #[error("empty key")]
  EmptyKey,
  /// The value token contains no decimal point.
  #[error("missing decimal point")]
  MissingDecimalPoint,
  /// The value token does not have exactly one digit after the point.
  #[error("expected exactly one fractional digit")]
  FractionDigits,
  /// No digits before the decimal point.
  #[error("missing integer digits")]
  MissingIntegerDigits,
  /// A byte that is not part of the value grammar.
  #[error("invalid byte 0x{0:02x}")]
  InvalidByte(u8),
  /// The integer part does not fit the fixed-point representation.
  #[error("value out of range")]
  Overflow,
}

/// A rejected record.
///
/// `offset` is the absolute byte offset of the start of the offending line in
/// the input, `token` a lossy UTF-8 copy of the bytes that failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at byte {offset}: {token:?}")]
pub struct ParseError {
  /// What was wrong with the record.
  pub kind: ParseErrorKind,
  /// Byte offset of the line start.
  pub offset: u64,
  /// The offending token.
  pub token: String,
}

impl ParseError {
  /// Builds a parse error, copying the offending bytes.
  pub fn new(kind: ParseErrorKind, offset: u64, token: &[u8]) -> Self {
    Self {
      kind,
      offset,
      token: String::from_utf8_lossy(token).into_owned(),
    }
  }
}

/// Failure result of a run.
#[derive(Error, Debug)]
pub enum EngineError {
  /// The input could not be opened or a read failed.
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
  /// A record did not match the record grammar.
  #[error("parse error: {0}")]
  Parse(#[from] ParseError),
  /// A partition worker panicked.
  #[error("worker failed: {0}")]
  Worker(String),
  /// The scan was stopped because an earlier part of the input failed.
  #[error("scan cancelled")]
  Cancelled,
}

impl EngineError {
  /// Returns the parse error, if this is one.
  pub fn as_parse(&self) -> Option<&ParseError> {
    match self {
      EngineError::Parse(e) => Some(e),
      _ => None,
    }
  }
}

/// What to do with a record that fails to parse.
///
/// # Example
///
/// ```rust
/// use stationweave::error::ErrorStrategy;
///
/// // Abort on the first malformed record (default)
/// let strategy = ErrorStrategy::default();
/// assert_eq!(strategy, ErrorStrategy::Stop);
///
/// // Drop malformed records and continue
/// let strategy = ErrorStrategy::Skip;
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorStrategy {
  /// Abort the whole run. No summary is produced.
  #[default]
  Stop,
  /// Drop the record, log a warning and count it in the scan report.
  Skip,
}

impl fmt::Display for ErrorStrategy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ErrorStrategy::Stop => write!(f, "stop"),
      ErrorStrategy::Skip => write!(f, "skip"),
    }
  }
}
