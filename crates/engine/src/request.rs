// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::errors::{ContributionError, InputField, Result};
use crate::parse::{parse_biguint, parse_weight};
use num_bigint::BigUint;

/// Parallel vectors of ciphertexts and plaintext weights.
///
/// Both vectors always have the same length; the constructors enforce it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContributionRequest {
    ciphertexts: Vec<BigUint>,
    weights: Vec<BigUint>,
}

impl ContributionRequest {
    /// Create a request from already-parsed values.
    ///
    /// # Errors
    /// Returns `ContributionError::InputShapeMismatch` if the lengths differ.
    pub fn new(ciphertexts: Vec<BigUint>, weights: Vec<BigUint>) -> Result<Self> {
        check_shape(ciphertexts.len(), weights.len())?;
        Ok(Self {
            ciphertexts,
            weights,
        })
    }

    /// Create a request from decimal strings.
    ///
    /// The shape is checked first, then every ciphertext, then every weight.
    /// The first bad entry aborts the whole request.
    pub fn from_decimal<S: AsRef<str>>(ciphertexts: &[S], weights: &[S]) -> Result<Self> {
        check_shape(ciphertexts.len(), weights.len())?;

        let ciphertexts = ciphertexts
            .iter()
            .enumerate()
            .map(|(i, c)| parse_biguint(c.as_ref(), InputField::Ciphertext, Some(i)))
            .collect::<Result<Vec<_>>>()?;

        let weights = weights
            .iter()
            .enumerate()
            .map(|(i, w)| parse_weight(w.as_ref(), i))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            ciphertexts,
            weights,
        })
    }

    pub fn ciphertexts(&self) -> &[BigUint] {
        &self.ciphertexts
    }

    pub fn weights(&self) -> &[BigUint] {
        &self.weights
    }

    pub fn len(&self) -> usize {
        self.ciphertexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ciphertexts.is_empty()
    }

    /// Iterate over `(ciphertext, weight)` pairs in input order.
    pub fn pairs(&self) -> impl Iterator<Item = (&BigUint, &BigUint)> {
        self.ciphertexts.iter().zip(self.weights.iter())
    }
}

fn check_shape(ciphertexts: usize, weights: usize) -> Result<()> {
    if ciphertexts != weights {
        return Err(ContributionError::InputShapeMismatch {
            ciphertexts,
            weights,
        });
    }
    Ok(())
}
