//! Tests for error types and strategies.

use crate::error::{EngineError, ErrorStrategy, ParseError, ParseErrorKind};

#[test]
fn test_default_strategy_is_stop() {
  assert_eq!(ErrorStrategy::default(), ErrorStrategy::Stop);
  assert_eq!(ErrorStrategy::Stop.to_string(), "stop");
  assert_eq!(ErrorStrategy::Skip.to_string(), "skip");
}

#[test]
fn test_parse_error_display() {
  let error = ParseError::new(ParseErrorKind::MissingDecimalPoint, 42, b"12");
  assert_eq!(error.to_string(), "missing decimal point at byte 42: \"12\"");
}

#[test]
fn test_parse_error_lossy_token() {
  let error = ParseError::new(ParseErrorKind::InvalidByte(0xff), 0, &[b'1', 0xff]);
  assert_eq!(error.token, "1\u{fffd}");
  assert!(error.to_string().starts_with("invalid byte 0xff"));
}

#[test]
fn test_engine_error_conversions() {
  let io: EngineError = std::io::Error::other("boom").into();
  assert!(matches!(io, EngineError::Io(_)));
  assert!(io.as_parse().is_none());
  assert_eq!(io.to_string(), "io error: boom");

  let parse: EngineError = ParseError::new(ParseErrorKind::Empty, 3, b"").into();
  assert_eq!(parse.as_parse().unwrap().offset, 3);
  assert_eq!(parse.to_string(), "parse error: empty value at byte 3: \"\"");
}

#[test]
fn test_cancelled_display() {
  let cancelled = EngineError::Cancelled;
  assert!(cancelled.as_parse().is_none());
  assert_eq!(cancelled.to_string(), "scan cancelled");
  assert_eq!(ParseErrorKind::EmptyKey.to_string(), "empty key");
}
