// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Per-element diagnostics for a contribution computation.

use num_bigint::BigUint;
use tracing::{debug, Level};

/// One record per input element, carrying the exact operands and result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEntry {
    pub index: usize,
    pub ciphertext: BigUint,
    pub weight: BigUint,
    pub contribution: BigUint,
}

/// Receives trace records as they are produced. Records arrive in index order.
pub trait TraceSink: Send + Sync {
    fn record(&self, entry: &TraceEntry);

    /// When false the engine skips building records for this sink.
    fn enabled(&self) -> bool {
        true
    }
}

/// Sink that emits each record as a `tracing` debug event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TraceSink for TracingSink {
    fn enabled(&self) -> bool {
        tracing::enabled!(Level::DEBUG)
    }

    fn record(&self, entry: &TraceEntry) {
        debug!(
            index = entry.index,
            c_i = %entry.ciphertext,
            w_i = %entry.weight,
            contribution = %entry.contribution,
            "contribution computed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::subscriber::{with_default, NoSubscriber};

    #[test]
    fn test_tracing_sink_disabled_without_debug_subscriber() {
        with_default(NoSubscriber::default(), || {
            assert!(!TracingSink.enabled());
        });
    }
}
