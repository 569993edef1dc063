// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::errors::{ContributionError, InputField, Result};
use crate::parse::parse_biguint;
use num_bigint::BigUint;
use num_traits::Zero;

/// Public half of a Paillier key, scoped to a single computation.
///
/// `n_sq` is always derived from `n` and is never accepted from the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKeyContext {
    n: BigUint,
    g: BigUint,
    n_sq: BigUint,
}

impl PublicKeyContext {
    /// Build a context from a modulus and generator.
    ///
    /// # Errors
    /// Returns `ContributionError::InvalidModulus` if `n` is zero.
    pub fn new(n: BigUint, g: BigUint) -> Result<Self> {
        if n.is_zero() {
            return Err(ContributionError::InvalidModulus);
        }
        let n_sq = &n * &n;
        Ok(Self { n, g, n_sq })
    }

    /// Build a context from decimal strings.
    pub fn from_decimal(n: &str, g: &str) -> Result<Self> {
        let n = parse_biguint(n, InputField::Modulus, None)?;
        let g = parse_biguint(g, InputField::Generator, None)?;
        Self::new(n, g)
    }

    pub fn n(&self) -> &BigUint {
        &self.n
    }

    /// The generator. Carried with the key but not used by any computation.
    pub fn g(&self) -> &BigUint {
        &self.g
    }

    pub fn n_sq(&self) -> &BigUint {
        &self.n_sq
    }
}
