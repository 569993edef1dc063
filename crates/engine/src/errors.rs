// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Error types for contribution computation.

use std::fmt;
use thiserror::Error;

/// Identifies which input a parse failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    /// Public key modulus `n`
    Modulus,
    /// Public key generator `g`
    Generator,
    /// An entry of the ciphertext vector
    Ciphertext,
    /// An entry of the weight vector
    Weight,
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InputField::Modulus => "publicKey.n",
            InputField::Generator => "publicKey.g",
            InputField::Ciphertext => "ciphertext",
            InputField::Weight => "weight",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while computing homomorphic contributions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContributionError {
    /// A supplied string is not a valid integer.
    /// `index` is `None` for scalar fields of the public key.
    #[error("Malformed integer in {field}{}: {value:?}", fmt_index(.index))]
    MalformedInteger {
        field: InputField,
        index: Option<usize>,
        value: String,
    },

    /// Ciphertext and weight sequences differ in length
    #[error("Input shape mismatch: {ciphertexts} ciphertexts but {weights} weights")]
    InputShapeMismatch { ciphertexts: usize, weights: usize },

    /// Weight outside the exponent domain of the modpow primitive
    #[error("Unsupported exponent at index {index}: {value} (weights must be non-negative)")]
    UnsupportedExponent { index: usize, value: String },

    /// The modulus must be a positive integer
    #[error("Invalid modulus: n must be at least 1")]
    InvalidModulus,

    /// Unexpected failure inside the numeric layer
    #[error("Internal arithmetic failure: {0}")]
    InternalArithmeticFailure(String),
}

impl ContributionError {
    /// Stable identifier for the error kind, used on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            ContributionError::MalformedInteger { .. } => "MalformedInteger",
            ContributionError::InputShapeMismatch { .. } => "InputShapeMismatch",
            ContributionError::UnsupportedExponent { .. } => "UnsupportedExponent",
            ContributionError::InvalidModulus => "InvalidModulus",
            ContributionError::InternalArithmeticFailure(_) => "InternalArithmeticFailure",
        }
    }

    /// True when the caller supplied bad input, as opposed to an internal failure.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, ContributionError::InternalArithmeticFailure(_))
    }
}

fn fmt_index(index: &Option<usize>) -> String {
    match index {
        Some(i) => format!(" at index {i}"),
        None => String::new(),
    }
}

/// Result alias for the engine
pub type Result<T> = std::result::Result<T, ContributionError>;
