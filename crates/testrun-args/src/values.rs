//! Validators for the switches that take a scalar value.

use crate::error::{ArgumentError, Result};
use winnow::ascii::digit1;
use winnow::combinator::{opt, preceded};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;

const MAX_THREADS_MESSAGE: &str = "incorrect argument value for -maxthreads (must be 'default', 'unlimited', a positive number, or a multiplier in the form of '0.0x')";
const PARALLEL_MESSAGE: &str = "incorrect argument value for -parallel";

/// `default` clears the override, `invariant` selects the invariant culture
/// (the empty string), anything else is a culture name.
pub fn parse_culture(value: &str) -> Option<String> {
    if value.eq_ignore_ascii_case("default") {
        None
    } else if value.eq_ignore_ascii_case("invariant") {
        Some(String::new())
    } else {
        Some(value.to_string())
    }
}

/// Returns the thread limit, `Some(-1)` for unlimited, or `None` for the
/// runner default. Multipliers are scaled by `processor_count` and rounded
/// half to even.
pub fn parse_max_threads(value: &str, processor_count: usize) -> Result<Option<i32>> {
    if value.eq_ignore_ascii_case("default") {
        return Ok(None);
    }
    if value.eq_ignore_ascii_case("unlimited") {
        return Ok(Some(-1));
    }

    if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
        return match value.parse::<i32>() {
            Ok(0) => Ok(None),
            Ok(threads) => Ok(Some(threads)),
            Err(_) => Err(invalid("-maxthreads", MAX_THREADS_MESSAGE)),
        };
    }

    let factor = parse_multiplier(value).ok_or_else(|| invalid("-maxthreads", MAX_THREADS_MESSAGE))?;
    let threads = (processor_count as f64 * factor).round_ties_even();
    if threads < 1.0 {
        Ok(None)
    } else if threads > i32::MAX as f64 {
        Err(invalid("-maxthreads", MAX_THREADS_MESSAGE))
    } else {
        Ok(Some(threads as i32))
    }
}

/// `none` disables collection parallelization, `collections` enables it.
pub fn parse_parallel(value: &str) -> Result<bool> {
    if value.eq_ignore_ascii_case("none") {
        Ok(false)
    } else if value.eq_ignore_ascii_case("collections") {
        Ok(true)
    } else {
        Err(invalid("-parallel", PARALLEL_MESSAGE))
    }
}

/// Split a `name=value` trait argument. Both sides must be non-empty and the
/// value may not contain another `=`.
pub fn parse_trait(value: &str) -> Option<(&str, &str)> {
    let (name, value) = value.split_once('=')?;
    if name.is_empty() || value.is_empty() || value.contains('=') {
        return None;
    }
    Some((name, value))
}

fn invalid(switch: &str, message: &str) -> ArgumentError {
    ArgumentError::InvalidValue {
        switch: switch.to_string(),
        message: message.to_string(),
    }
}

fn parse_multiplier(text: &str) -> Option<f64> {
    let mut input = text;
    let factor = multiplier.parse_next(&mut input).ok()?;
    input.is_empty().then_some(factor)
}

// <digits>[.<digits>]x
fn multiplier(input: &mut &str) -> ModalResult<f64> {
    let whole: &str = digit1.parse_next(input)?;
    let fraction: Option<&str> = opt(preceded('.', digit1)).parse_next(input)?;
    'x'.parse_next(input)?;

    let number = match fraction {
        Some(fraction) => format!("{}.{}", whole, fraction),
        None => whole.to_string(),
    };
    number
        .parse::<f64>()
        .map_err(|_| ErrMode::Backtrack(ContextError::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_culture_keywords() {
        assert_eq!(parse_culture("default"), None);
        assert_eq!(parse_culture("DEFAULT"), None);
        assert_eq!(parse_culture("invariant"), Some(String::new()));
        assert_eq!(parse_culture("Invariant"), Some(String::new()));
        assert_eq!(parse_culture("en-US"), Some("en-US".to_string()));
    }

    #[test]
    fn test_max_threads_keywords_and_numbers() {
        assert_eq!(parse_max_threads("default", 4).unwrap(), None);
        assert_eq!(parse_max_threads("0", 4).unwrap(), None);
        assert_eq!(parse_max_threads("unlimited", 4).unwrap(), Some(-1));
        assert_eq!(parse_max_threads("16", 4).unwrap(), Some(16));
    }

    #[test]
    fn test_max_threads_multiplier() {
        assert_eq!(parse_max_threads("2x", 4).unwrap(), Some(8));
        assert_eq!(parse_max_threads("2.0x", 4).unwrap(), Some(8));
        assert_eq!(parse_max_threads("0.5x", 3).unwrap(), Some(2));
        assert_eq!(parse_max_threads("2.5x", 1).unwrap(), Some(2));
        assert_eq!(parse_max_threads("0x", 8).unwrap(), None);
    }

    #[test]
    fn test_max_threads_rejects_malformed() {
        for bad in ["abc", "0.ax", ".0x", "x", "-1", "+4", "2.x", "2xx", "1.5", "99999999999", "999999999999x"] {
            let err = parse_max_threads(bad, 4).unwrap_err();
            assert_eq!(
                err,
                ArgumentError::InvalidValue {
                    switch: "-maxthreads".to_string(),
                    message: MAX_THREADS_MESSAGE.to_string(),
                },
                "input {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_parallel_values() {
        assert!(!parse_parallel("none").unwrap());
        assert!(parse_parallel("collections").unwrap());
        assert_eq!(
            parse_parallel("nonsense").unwrap_err().to_string(),
            "incorrect argument value for -parallel"
        );
    }

    #[test]
    fn test_trait_format() {
        assert_eq!(parse_trait("foo=bar"), Some(("foo", "bar")));
        assert_eq!(parse_trait("foobar"), None);
        assert_eq!(parse_trait("foo="), None);
        assert_eq!(parse_trait("=bar"), None);
        assert_eq!(parse_trait("foo=bar=baz"), None);
    }
}
