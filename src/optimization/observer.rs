//! Debug side channel for the search.
//!
//! Purpose
//! -------
//! Expose the sequence `(iteration, cost, candidate snapshot)` of a running
//! search without feeding anything back into the numerics.
//!
//! Key behaviors
//! -------------
//! - [`IterationObserver`] is the user-facing callback trait; closures
//!   `Fn(&IterationRecord) + Send + Sync` implement it directly.
//! - [`TraceRecorder`] collects every record in memory.
//! - [`SearchObserver`] plugs into argmin's `Observe` hook: it emits a
//!   `tracing` debug event per iteration and forwards an
//!   [`IterationRecord`] to the optional user observer.
//!
//! Invariants & assumptions
//! ------------------------
//! - Records are produced only when `OptimizationConfig::debug` is set.
//! - Iteration `0` is the starting point; iteration `k ≥ 1` is the state
//!   after the `k`-th solver iteration. Recorded costs are non-increasing.
//! - Snapshots are rebuilt from θ through the same problem the solver
//!   evaluates, so they are exactly the candidates the search compares.
use std::sync::{Arc, Mutex};

use argmin::core::{Error, KV, State, observers::Observe};

use crate::{
    ntf::transfer_function::TransferFunction,
    optimization::{
        problem::NtfProblem,
        types::{Cost, SearchState, Theta},
    },
};

/// One observed iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationRecord {
    pub iteration: usize,
    pub cost: Cost,
    pub candidate: TransferFunction,
}

/// Per-iteration callback. Must not panic; it runs inside the search loop.
pub trait IterationObserver: Send + Sync {
    fn on_iteration(&self, record: &IterationRecord);
}

impl<F> IterationObserver for F
where
    F: Fn(&IterationRecord) + Send + Sync,
{
    fn on_iteration(&self, record: &IterationRecord) {
        self(record)
    }
}

/// In-memory collector of [`IterationRecord`]s.
#[derive(Debug, Default)]
pub struct TraceRecorder {
    records: Mutex<Vec<IterationRecord>>,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn records(&self) -> Vec<IterationRecord> {
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).clone()
    }

    pub fn costs(&self) -> Vec<Cost> {
        self.records().iter().map(|r| r.cost).collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl IterationObserver for TraceRecorder {
    fn on_iteration(&self, record: &IterationRecord) {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(record.clone());
    }
}

/// argmin observer bridging solver state to `tracing` and the user sink.
pub struct SearchObserver {
    problem: NtfProblem,
    sink: Option<Arc<dyn IterationObserver>>,
}

impl SearchObserver {
    pub fn new(problem: NtfProblem, sink: Option<Arc<dyn IterationObserver>>) -> Self {
        Self { problem, sink }
    }

    /// Log and forward the state at `iteration`.
    pub fn emit(&self, iteration: usize, theta: &Theta, cost: Cost) {
        tracing::debug!(iteration, cost, theta = ?theta.as_slice(), "ntf search iteration");
        if let Some(sink) = &self.sink {
            let candidate = self.problem.evaluate(theta).transfer_function;
            sink.on_iteration(&IterationRecord { iteration, cost, candidate });
        }
    }
}

impl Observe<SearchState> for SearchObserver {
    fn observe_iter(&mut self, state: &SearchState, _kv: &KV) -> Result<(), Error> {
        if let Some(theta) = state.get_param() {
            self.emit(state.get_iter() as usize + 1, theta, state.get_cost());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    fn record(iteration: usize, cost: f64) -> IterationRecord {
        let tf = TransferFunction::new(
            vec![Complex64::new(1.0, 0.0)],
            vec![Complex64::new(0.0, 0.0)],
            1.0,
        )
        .unwrap();
        IterationRecord { iteration, cost, candidate: tf }
    }

    #[test]
    fn trace_recorder_keeps_records_in_order() {
        let recorder = TraceRecorder::new();
        assert!(recorder.is_empty());

        recorder.on_iteration(&record(0, 2.0));
        recorder.on_iteration(&record(1, 1.5));

        assert_eq!(recorder.len(), 2);
        assert_eq!(recorder.costs(), vec![2.0, 1.5]);
        assert_eq!(recorder.records()[1].iteration, 1);
    }

    #[test]
    // Purpose
    // -------
    // Plain closures can be used as observers.
    fn closures_implement_iteration_observer() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let observer = move |r: &IterationRecord| sink.lock().unwrap().push(r.iteration);

        observer.on_iteration(&record(3, 0.1));

        assert_eq!(*seen.lock().unwrap(), vec![3]);
    }
}
