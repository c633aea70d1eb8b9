//! Line codec for the streaming text protocol.
//!
//! Reducer input arrives as `key<DELIM>value` text lines, one record
//! per line. Splitting happens on the first delimiter only, so values
//! may themselves contain the delimiter character.

use crate::KeyValue;
use bytes::Bytes;
use thiserror::Error;

/// A malformed input line or field.
///
/// Parsing is fail-fast: the caller propagates the first error and
/// stops, it never skips a bad line and continues.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The line has no delimiter, so no key/value split exists.
    #[error("no `{delimiter}` delimiter in line `{line}`")]
    MissingDelimiter { delimiter: char, line: String },
    /// The strategy needed a numeric value and the field is not one.
    #[error("expected a numeric value, got `{value}`")]
    NonNumericValue { value: String },
}

impl ParseError {
    fn non_numeric(value: &[u8]) -> Self {
        ParseError::NonNumericValue {
            value: String::from_utf8_lossy(value).into_owned(),
        }
    }
}

/// Parse one text line into a [`KeyValue`], splitting on the first
/// occurrence of `delimiter`.
pub fn parse_line(line: &str, delimiter: char) -> Result<KeyValue, ParseError> {
    match line.split_once(delimiter) {
        Some((key, value)) => Ok(KeyValue::new(
            Bytes::copy_from_slice(key.as_bytes()),
            Bytes::copy_from_slice(value.as_bytes()),
        )),
        None => Err(ParseError::MissingDelimiter {
            delimiter,
            line: line.to_string(),
        }),
    }
}

/// Parse a record value as an unsigned count.
pub fn parse_u64(value: &Bytes) -> Result<u64, ParseError> {
    let s = std::str::from_utf8(value).map_err(|_| ParseError::non_numeric(value))?;
    s.trim().parse().map_err(|_| ParseError::non_numeric(value))
}

/// Parse a record value as a float.
pub fn parse_f64(value: &Bytes) -> Result<f64, ParseError> {
    let s = std::str::from_utf8(value).map_err(|_| ParseError::non_numeric(value))?;
    s.trim().parse().map_err(|_| ParseError::non_numeric(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_first_delimiter_only() {
        let kv = parse_line("US\tCrow\tjuvenile", '\t').unwrap();
        assert_eq!(kv.key, Bytes::from("US"));
        assert_eq!(kv.value, Bytes::from("Crow\tjuvenile"));
    }

    #[test]
    fn empty_value_field_is_allowed() {
        let kv = parse_line("US\t", '\t').unwrap();
        assert_eq!(kv.key, Bytes::from("US"));
        assert!(kv.value.is_empty());
    }

    #[test]
    fn missing_delimiter_is_an_error() {
        let err = parse_line("no delimiter here", '\t').unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingDelimiter {
                delimiter: '\t',
                line: "no delimiter here".to_string(),
            }
        );
    }

    #[test]
    fn numeric_fields_tolerate_surrounding_whitespace() {
        assert_eq!(parse_u64(&Bytes::from(" 42\r")).unwrap(), 42);
        assert_eq!(parse_f64(&Bytes::from("2.5 ")).unwrap(), 2.5);
    }

    #[test]
    fn non_numeric_value_is_an_error() {
        let err = parse_u64(&Bytes::from("Crow")).unwrap_err();
        assert_eq!(
            err,
            ParseError::NonNumericValue {
                value: "Crow".to_string(),
            }
        );
    }
}
