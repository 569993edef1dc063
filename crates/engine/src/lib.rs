// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! # Contribution Engine
//!
//! Homomorphic scalar multiplication of Paillier ciphertexts under a public key
//! supplied with each request.
//!
//! Raising a Paillier ciphertext `c = Enc(m)` to a plaintext power `w` modulo
//! `n^2` yields an encryption of `m * w`. Given parallel vectors of ciphertexts
//! and weights this crate produces the per-element contributions
//! `c[i]^w[i] mod n^2`, ready to be multiplied together (summed under
//! encryption) and decrypted by the key holder.
//!
//! - Arbitrary precision throughout via `num-bigint`.
//! - Inputs are parsed and validated up front; a bad entry rejects the whole call.
//! - Optional per-element trace, delivered to an injectable [`TraceSink`].
//! - Optional chunked parallelism on the rayon pool with order-preserving output.

mod context;
mod engine;
mod errors;
mod parse;
mod request;
mod trace;

pub use context::*;
pub use engine::*;
pub use errors::*;
pub use parse::*;
pub use request::*;
pub use trace::*;
