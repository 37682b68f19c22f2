use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid --set format: '{0}'. Expected KEY=VALUE.")]
    MissingSeparator(String),

    #[error("Key cannot be empty in '{0}'.")]
    EmptyKey(String),

    #[error("Unsupported configuration key for --set: '{0}'")]
    UnsupportedKey(String),

    #[error("Invalid {expected} value for {key}: '{value}'")]
    InvalidValue {
        key: String,
        value: String,
        expected: &'static str,
    },
}

/// Splits a `KEY=VALUE` override at the first `=`; whitespace around both halves is dropped.
pub fn parse_key_value(pair: &str) -> Result<(&str, &str), ParseError> {
    let (key, value) = pair
        .split_once('=')
        .ok_or_else(|| ParseError::MissingSeparator(pair.to_string()))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(ParseError::EmptyKey(pair.to_string()));
    }
    Ok((key, value.trim()))
}

/// Parses the value half of an override, naming the key and expected kind on failure.
pub fn parse_value<T: FromStr>(
    key: &str,
    value: &str,
    expected: &'static str,
) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        expected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_at_first_equals_sign() {
        assert_eq!(parse_key_value("a.b=c=d"), Ok(("a.b", "c=d")));
        assert_eq!(parse_key_value(" F = 0.2 "), Ok(("F", "0.2")));
    }

    #[test]
    fn value_may_be_empty() {
        assert_eq!(parse_key_value("analysis.precision="), Ok(("analysis.precision", "")));
    }

    #[test]
    fn rejects_missing_separator_and_empty_key() {
        assert_eq!(
            parse_key_value("noequals"),
            Err(ParseError::MissingSeparator("noequals".to_string()))
        );
        assert_eq!(
            parse_key_value("=3"),
            Err(ParseError::EmptyKey("=3".to_string()))
        );
    }

    #[test]
    fn parse_value_reports_key_and_kind() {
        let ok: u32 = parse_value("rx", "32", "integer").unwrap();
        assert_eq!(ok, 32);

        let err = parse_value::<u32>("rx", "3.5", "integer").unwrap_err();
        assert_eq!(err.to_string(), "Invalid integer value for rx: '3.5'");
    }
}
