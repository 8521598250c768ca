//! Address sequence parsing.
//!
//! Sequences are written as comma-separated hexadecimal tokens, e.g.
//! `"11, 11, 12, 0x1f"`. Whitespace around tokens is ignored, empty tokens are
//! skipped, and a `0x`/`0X` prefix is optional.

use crate::common::ParseError;

/// Parses one hexadecimal address token.
///
/// # Errors
///
/// Returns [`ParseError::InvalidToken`] if the token is empty or not valid hex.
pub fn parse_hex_address(token: &str) -> Result<u64, ParseError> {
    let trimmed = token.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let digits = digits.replace('_', "");

    if digits.is_empty() {
        return Err(ParseError::InvalidToken {
            token: trimmed.to_string(),
        });
    }
    u64::from_str_radix(&digits, 16).map_err(|_| ParseError::InvalidToken {
        token: trimmed.to_string(),
    })
}

/// Parses a comma-separated list of hexadecimal addresses.
///
/// # Examples
///
/// ```
/// use cachesim_core::sim::parse_address_sequence;
///
/// let addrs = parse_address_sequence("11, 11, 0x1f,,").unwrap();
/// assert_eq!(addrs, vec![0x11, 0x11, 0x1f]);
/// ```
///
/// # Errors
///
/// Returns [`ParseError::InvalidToken`] naming the first bad token, or
/// [`ParseError::Empty`] if the input holds no tokens.
pub fn parse_address_sequence(input: &str) -> Result<Vec<u64>, ParseError> {
    let addresses = input
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(parse_hex_address)
        .collect::<Result<Vec<_>, _>>()?;

    if addresses.is_empty() {
        return Err(ParseError::Empty);
    }
    Ok(addresses)
}
