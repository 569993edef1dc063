// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::context::PublicKeyContext;
use crate::errors::{ContributionError, Result};
use crate::request::ContributionRequest;
use crate::trace::{TraceEntry, TraceSink};
use num_bigint::BigUint;
use rayon::prelude::*;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::trace;

const DEFAULT_BATCH_SIZE: usize = 64;

/// Output of a computation. `contributions[i] = c[i]^w[i] mod n^2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributionResult {
    pub contributions: Vec<BigUint>,
    /// Present only when the engine was configured to collect a trace
    pub trace: Option<Vec<TraceEntry>>,
}

/// Computes homomorphic scalar multiplications of Paillier ciphertexts.
///
/// The engine holds no key material or per-request state, so one instance can
/// serve any number of concurrent calls.
#[derive(Clone, Default)]
pub struct ContributionEngine {
    sink: Option<Arc<dyn TraceSink>>,
    collect_trace: bool,
    use_parallel: bool,
    batch_size: Option<usize>,
}

impl ContributionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit one record per element to `sink`
    pub fn with_sink<S: TraceSink + 'static>(mut self, sink: S) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    /// Return the trace alongside the contributions
    pub fn with_trace(mut self, collect_trace: bool) -> Self {
        self.collect_trace = collect_trace;
        self
    }

    /// Exponentiate chunks of `batch_size` elements on the rayon pool
    pub fn with_parallel(mut self, use_parallel: bool, batch_size: Option<usize>) -> Self {
        self.use_parallel = use_parallel;
        self.batch_size = batch_size;
        self
    }

    /// Compute `c[i]^w[i] mod n^2` for every element of `request`.
    ///
    /// Elements are independent; output order always follows input order no
    /// matter how the work is scheduled. The trace and sink records are built
    /// from the same values that are returned.
    ///
    /// # Errors
    /// Returns `ContributionError::InternalArithmeticFailure` if the numeric
    /// layer fails unexpectedly. Input problems are rejected earlier, when the
    /// context and request are constructed.
    pub fn compute(
        &self,
        context: &PublicKeyContext,
        request: &ContributionRequest,
    ) -> Result<ContributionResult> {
        let n_sq = context.n_sq();
        trace!(
            elements = request.len(),
            n_bits = context.n().bits(),
            parallel = self.use_parallel,
            "computing contributions"
        );

        let (contributions, trace) = panic::catch_unwind(AssertUnwindSafe(|| {
            if self.use_parallel {
                let contributions = self.exponentiate_parallel(request, n_sq);
                let trace = self.emit_trace(request, &contributions);
                (contributions, trace)
            } else {
                self.exponentiate_sequential(request, n_sq)
            }
        }))
        .map_err(|payload| ContributionError::InternalArithmeticFailure(panic_message(payload)))?;

        Ok(ContributionResult {
            contributions,
            trace,
        })
    }

    /// The sink, unless it would discard every record.
    fn active_sink(&self) -> Option<&dyn TraceSink> {
        self.sink.as_deref().filter(|sink| sink.enabled())
    }

    fn observe(
        &self,
        sink: Option<&dyn TraceSink>,
        entry: TraceEntry,
        entries: &mut Vec<TraceEntry>,
    ) {
        if let Some(sink) = sink {
            sink.record(&entry);
        }
        if self.collect_trace {
            entries.push(entry);
        }
    }

    /// Single pass; each trace record is emitted as soon as its element is done.
    fn exponentiate_sequential(
        &self,
        request: &ContributionRequest,
        n_sq: &BigUint,
    ) -> (Vec<BigUint>, Option<Vec<TraceEntry>>) {
        let sink = self.active_sink();
        let tracing = sink.is_some() || self.collect_trace;
        let mut contributions = Vec::with_capacity(request.len());
        let mut entries = Vec::new();

        for (index, (c, w)) in request.pairs().enumerate() {
            let contribution = c.modpow(w, n_sq);
            if tracing {
                let entry = TraceEntry {
                    index,
                    ciphertext: c.clone(),
                    weight: w.clone(),
                    contribution: contribution.clone(),
                };
                self.observe(sink, entry, &mut entries);
            }
            contributions.push(contribution);
        }

        (contributions, self.collect_trace.then_some(entries))
    }

    fn exponentiate_parallel(&self, request: &ContributionRequest, n_sq: &BigUint) -> Vec<BigUint> {
        let batch_size = self.batch_size.unwrap_or(DEFAULT_BATCH_SIZE).max(1);

        let chunks: Vec<Vec<BigUint>> = request
            .ciphertexts()
            .par_chunks(batch_size)
            .zip(request.weights().par_chunks(batch_size))
            .map(|(cs, ws)| {
                cs.iter()
                    .zip(ws)
                    .map(|(c, w)| c.modpow(w, n_sq))
                    .collect()
            })
            .collect();

        chunks.into_iter().flatten().collect()
    }

    /// Records for the parallel path, emitted in index order once every chunk is done.
    fn emit_trace(
        &self,
        request: &ContributionRequest,
        contributions: &[BigUint],
    ) -> Option<Vec<TraceEntry>> {
        let sink = self.active_sink();
        if sink.is_none() && !self.collect_trace {
            return None;
        }

        let mut entries = Vec::with_capacity(contributions.len());
        for (index, ((c, w), contribution)) in request.pairs().zip(contributions).enumerate() {
            let entry = TraceEntry {
                index,
                ciphertext: c.clone(),
                weight: w.clone(),
                contribution: contribution.clone(),
            };
            self.observe(sink, entry, &mut entries);
        }

        self.collect_trace.then_some(entries)
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic in modular exponentiation".to_string()
    }
}

/// Sequential computation with no sink and no trace.
pub fn compute(
    context: &PublicKeyContext,
    request: &ContributionRequest,
) -> Result<ContributionResult> {
    ContributionEngine::default().compute(context, request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::{One, Zero};
    use proptest::prelude::*;
    use std::sync::Mutex;
    use tracing_test::traced_test;

    #[derive(Default)]
    struct CollectingSink {
        entries: Mutex<Vec<TraceEntry>>,
    }

    impl TraceSink for Arc<CollectingSink> {
        fn record(&self, entry: &TraceEntry) {
            self.entries.lock().unwrap().push(entry.clone());
        }
    }

    fn ctx(n: u64) -> PublicKeyContext {
        PublicKeyContext::new(BigUint::from(n), BigUint::from(n + 1)).unwrap()
    }

    fn request(cs: &[u64], ws: &[u64]) -> ContributionRequest {
        ContributionRequest::new(
            cs.iter().map(|&c| BigUint::from(c)).collect(),
            ws.iter().map(|&w| BigUint::from(w)).collect(),
        )
        .unwrap()
    }

    /// Square-and-multiply over u128, used as an independent reference.
    fn reference_modpow(base: u64, exp: u64, modulus: u64) -> u64 {
        let m = modulus as u128;
        let mut result = 1u128 % m;
        let mut b = base as u128 % m;
        let mut e = exp;
        while e > 0 {
            if e & 1 == 1 {
                result = result * b % m;
            }
            b = b * b % m;
            e >>= 1;
        }
        result as u64
    }

    #[test]
    fn test_known_vector() -> Result<()> {
        let result = compute(&ctx(17), &request(&[5; 6], &[3; 6]))?;
        assert_eq!(result.contributions, vec![BigUint::from(125u32); 6]);
        assert_eq!(result.trace, None);
        Ok(())
    }

    #[test]
    fn test_mixed_vector_preserves_order() -> Result<()> {
        let cs = [5, 2, 288, 0, 1, 100];
        let ws = [3, 10, 2, 4, 1000, 0];
        let result = compute(&ctx(17), &request(&cs, &ws))?;
        let expected: Vec<BigUint> = cs
            .iter()
            .zip(ws.iter())
            .map(|(&c, &w)| BigUint::from(reference_modpow(c, w, 289)))
            .collect();
        assert_eq!(result.contributions, expected);
        Ok(())
    }

    #[test]
    fn test_zero_weight_is_identity() -> Result<()> {
        let result = compute(&ctx(17), &request(&[0, 5, 288], &[0, 0, 0]))?;
        assert!(result.contributions.iter().all(|c| c.is_one()));
        Ok(())
    }

    #[test]
    fn test_unit_modulus_yields_zero() -> Result<()> {
        let result = compute(&ctx(1), &request(&[0, 7], &[0, 3]))?;
        assert!(result.contributions.iter().all(|c| c.is_zero()));
        Ok(())
    }

    #[test]
    fn test_empty_request() -> Result<()> {
        let engine = ContributionEngine::new().with_trace(true);
        let result = engine.compute(&ctx(17), &ContributionRequest::default())?;
        assert!(result.contributions.is_empty());
        assert_eq!(result.trace, Some(vec![]));
        Ok(())
    }

    #[test]
    fn test_trace_matches_contributions() -> Result<()> {
        let sink = Arc::new(CollectingSink::default());
        let engine = ContributionEngine::new()
            .with_trace(true)
            .with_sink(sink.clone());
        let req = request(&[5, 6, 7], &[3, 2, 1]);
        let result = engine.compute(&ctx(17), &req)?;

        let trace = result.trace.clone().unwrap();
        assert_eq!(trace.len(), 3);
        for (i, entry) in trace.iter().enumerate() {
            assert_eq!(entry.index, i);
            assert_eq!(&entry.ciphertext, &req.ciphertexts()[i]);
            assert_eq!(&entry.weight, &req.weights()[i]);
            assert_eq!(&entry.contribution, &result.contributions[i]);
        }
        assert_eq!(*sink.entries.lock().unwrap(), trace);
        Ok(())
    }

    #[test]
    fn test_sink_does_not_change_values() -> Result<()> {
        let req = request(&[5, 6, 7, 8], &[3, 2, 1, 9]);
        let plain = compute(&ctx(17), &req)?;
        let sink = Arc::new(CollectingSink::default());
        let observed = ContributionEngine::new()
            .with_sink(sink.clone())
            .compute(&ctx(17), &req)?;
        assert_eq!(plain.contributions, observed.contributions);
        assert_eq!(observed.trace, None);
        assert_eq!(sink.entries.lock().unwrap().len(), 4);
        Ok(())
    }

    struct DisabledSink(Arc<CollectingSink>);

    impl TraceSink for DisabledSink {
        fn record(&self, entry: &TraceEntry) {
            self.0.record(entry);
        }

        fn enabled(&self) -> bool {
            false
        }
    }

    #[test]
    fn test_disabled_sink_is_skipped() -> Result<()> {
        let collected = Arc::new(CollectingSink::default());
        let req = request(&[5, 2, 7], &[3, 4, 1]);
        for parallel in [false, true] {
            let result = ContributionEngine::new()
                .with_sink(DisabledSink(collected.clone()))
                .with_parallel(parallel, Some(2))
                .compute(&ctx(17), &req)?;
            assert_eq!(result.contributions, compute(&ctx(17), &req)?.contributions);
            assert_eq!(result.trace, None);
        }
        assert!(collected.entries.lock().unwrap().is_empty());

        let result = ContributionEngine::new()
            .with_sink(DisabledSink(collected.clone()))
            .with_trace(true)
            .compute(&ctx(17), &req)?;
        assert_eq!(result.trace.map(|t| t.len()), Some(3));
        assert!(collected.entries.lock().unwrap().is_empty());
        Ok(())
    }

    #[test]
    fn test_parallel_matches_sequential() -> Result<()> {
        let cs: Vec<u64> = (0..101).map(|i| (i * 37 + 11) % 289).collect();
        let ws: Vec<u64> = (0..101).map(|i| i * 13).collect();
        let req = request(&cs, &ws);

        let sequential = compute(&ctx(17), &req)?;
        for batch_size in [None, Some(0), Some(1), Some(7), Some(500)] {
            let parallel = ContributionEngine::new()
                .with_parallel(true, batch_size)
                .with_trace(true)
                .compute(&ctx(17), &req)?;
            assert_eq!(parallel.contributions, sequential.contributions);
            let trace = parallel.trace.unwrap();
            assert!(trace.iter().enumerate().all(|(i, e)| e.index == i));
        }
        Ok(())
    }

    #[test]
    #[traced_test]
    fn test_tracing_sink_emits_records() {
        let engine = ContributionEngine::new().with_sink(crate::TracingSink);
        engine
            .compute(&ctx(17), &request(&[5, 2], &[3, 4]))
            .unwrap();
        assert!(logs_contain("contribution computed"));
        assert!(logs_contain("contribution=125"));
        assert!(logs_contain("contribution=16"));
    }

    #[test]
    fn test_panic_message_extraction() {
        assert_eq!(panic_message(Box::new("divide by zero")), "divide by zero");
        assert_eq!(panic_message(Box::new(String::from("oops"))), "oops");
        assert_eq!(
            panic_message(Box::new(42u8)),
            "unknown panic in modular exponentiation"
        );
    }

    proptest! {
        #[test]
        fn matches_reference_modpow(
            n in 1u64..=u32::MAX as u64,
            pairs in prop::collection::vec((any::<u64>(), any::<u16>()), 0..16),
        ) {
            let n_sq = n * n;
            let cs: Vec<u64> = pairs.iter().map(|(c, _)| c % n_sq).collect();
            let ws: Vec<u64> = pairs.iter().map(|(_, w)| *w as u64).collect();
            let result = compute(&ctx(n), &request(&cs, &ws)).unwrap();

            prop_assert_eq!(result.contributions.len(), cs.len());
            for (i, value) in result.contributions.iter().enumerate() {
                prop_assert_eq!(value, &BigUint::from(reference_modpow(cs[i], ws[i], n_sq)));
                prop_assert!(value < ctx(n).n_sq());
            }
        }

        #[test]
        fn compute_is_idempotent(
            cs in prop::collection::vec(0u64..289, 0..12),
            w in 0u64..10_000,
        ) {
            let ws = vec![w; cs.len()];
            let req = request(&cs, &ws);
            let first = compute(&ctx(17), &req).unwrap();
            let second = compute(&ctx(17), &req).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
