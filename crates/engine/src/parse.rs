// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Decimal parsing for big integers arriving as strings.
//!
//! Accepted syntax: optional surrounding whitespace, an optional leading `+`
//! (or `-` for weights), decimal digits and `_` separators between digits.

use crate::errors::{ContributionError, InputField, Result};
use num_bigint::{BigInt, BigUint, Sign};
use std::str::FromStr;

/// Parse an unsigned decimal integer.
pub fn parse_biguint(value: &str, field: InputField, index: Option<usize>) -> Result<BigUint> {
    let trimmed = value.trim();
    if misplaced_separator(trimmed) {
        return Err(malformed(value, field, index));
    }
    BigUint::from_str(trimmed).map_err(|_| malformed(value, field, index))
}

/// Parse a weight and check that it can be used as a modpow exponent.
pub fn parse_weight(value: &str, index: usize) -> Result<BigUint> {
    let trimmed = value.trim();
    if misplaced_separator(trimmed) {
        return Err(malformed(value, InputField::Weight, Some(index)));
    }
    let weight = BigInt::from_str(trimmed)
        .map_err(|_| malformed(value, InputField::Weight, Some(index)))?;
    weight_to_exponent(weight, index)
}

/// Convert a signed weight into an exponent, rejecting negative values.
pub fn weight_to_exponent(weight: BigInt, index: usize) -> Result<BigUint> {
    match weight.sign() {
        Sign::Minus => Err(ContributionError::UnsupportedExponent {
            index,
            value: weight.to_string(),
        }),
        _ => Ok(weight.magnitude().clone()),
    }
}

// num-bigint skips every `_`; only single separators between digits are valid.
fn misplaced_separator(value: &str) -> bool {
    let digits = value.strip_prefix(['+', '-']).unwrap_or(value);
    digits.starts_with('_') || digits.ends_with('_') || digits.contains("__")
}

fn malformed(value: &str, field: InputField, index: Option<usize>) -> ContributionError {
    ContributionError::MalformedInteger {
        field,
        index,
        value: value.to_string(),
    }
}
