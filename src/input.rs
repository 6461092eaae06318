//! Boundary adapter turning text into the validated values the engines take.
//!
//! Accepts list literals such as `[1, -2, 3]`, `[]` or `[1, 2,]`. The
//! engines themselves never see text.

use crate::cs::dynamic::mask::Mask;
use crate::error::{Error, Result};

/// Parses a bracketed list of integers.
///
/// # Examples
///
/// ```
/// use subsequences::input::parse_sequence;
///
/// assert_eq!(parse_sequence(" [1, -2, 3] ").unwrap(), vec![1, -2, 3]);
/// assert_eq!(parse_sequence("[]").unwrap(), Vec::<i64>::new());
/// assert!(parse_sequence("1, 2").is_err());
/// ```
pub fn parse_sequence(text: &str) -> Result<Vec<i64>> {
    let inner = text
        .trim()
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| {
            Error::malformed_list(text, "expected a bracketed list such as [1, 2, 3]")
        })?
        .trim();

    if inner.is_empty() {
        return Ok(Vec::new());
    }

    // A single trailing comma is allowed, as in `[1, 2,]`.
    let body = inner.strip_suffix(',').unwrap_or(inner);

    body.split(',')
        .map(|item| {
            let item = item.trim();
            if item.is_empty() {
                return Err(Error::malformed_list(text, "empty element"));
            }
            item.parse::<i64>().map_err(|err| {
                Error::malformed_list(text, format!("{item:?} is not an integer: {err}"))
            })
        })
        .collect()
}

/// Parses a bracketed list of 0/1 values into a [`Mask`].
pub fn parse_mask(text: &str) -> Result<Mask> {
    let values = parse_sequence(text)?;
    Mask::try_from(&values[..])
}

/// Parses an enumeration limit. Negative limits mean "no results" and clamp
/// to zero.
pub fn parse_limit(text: &str) -> Result<usize> {
    let value = text.trim().parse::<i64>().map_err(|err| {
        Error::invalid_argument(format!("limit {text:?} is not an integer: {err}"))
    })?;
    Ok(usize::try_from(value).unwrap_or(0))
}
