//! Integration tests for end-to-end NTF synthesis.
//!
//! Purpose
//! -------
//! - Validate the public pipeline: from a validated `ModulatorSpec` and a
//!   per-call `OptimizationConfig`, through candidate generation and the
//!   compass search, to the gated `ConvergenceResult`.
//! - Exercise realistic designs (orders 2 to 6, OSR 8 to 64, lowpass and
//!   bandpass) rather than toy edge cases only.
//!
//! Coverage
//! --------
//! - `ntf::spec`: rejection of invalid orders and oversampling ratios.
//! - `ntf::synthesize`: disabled vs enabled optimization, tight budgets,
//!   bandpass designs and concurrent calls.
//! - `optimization::observer`: the debug trace (monotone costs, iteration
//!   numbering, snapshots of full order).
//! - `optimization::cancel`: cooperative cancellation.
//!
//! Exclusions
//! ----------
//! - Low-level root finding, pole secant iterations and the solver's step
//!   rules are covered by unit tests next to their modules.
//! - Python bindings are tested at the Python level.
use std::{
    io::Write,
    sync::{Arc, Mutex},
    thread,
};

use deltasigma_ntf::{
    ntf::{
        Architecture, ModulatorSpec, NtfError, StabilityPolicy, ZeroPlacement,
        candidate::generate_candidate, is_stable, objective::SignalBand, noise_power,
        synthesize_ntf,
    },
    optimization::{CancelToken, IterationObserver, OptimizationConfig, TraceRecorder},
};
use tracing_subscriber::{EnvFilter, fmt::MakeWriter};

/// Shared in-memory sink for formatted `tracing` output.
#[derive(Clone, Default)]
struct CapturedLog {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLog {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock().unwrap()).into_owned()
    }
}

impl Write for CapturedLog {
    fn write(&mut self, bytes: &[u8]) -> std::io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLog {
    type Writer = CapturedLog;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Purpose
/// -------
/// Assert the invariants every returned NTF must satisfy for `order`.
///
/// Checks
/// ------
/// - exactly `order` poles and `order` zeros,
/// - every pole passes the stability gate,
/// - every zero lies on the unit circle.
fn assert_well_formed(result: &deltasigma_ntf::ntf::ConvergenceResult, order: usize) {
    let tf = &result.transfer_function;
    assert_eq!(tf.poles().len(), order, "pole count");
    assert_eq!(tf.zeros().len(), order, "zero count");
    assert!(is_stable(tf), "max pole modulus {}", tf.max_pole_modulus());
    for z in tf.zeros() {
        assert!((z.norm() - 1.0).abs() < 1e-9, "zero {z} is off the unit circle");
    }
}

#[test]
// Purpose
// -------
// With optimization disabled, an order-3 OSR-64 design is the raw
// candidate: three stable poles, three unit-circle zeros, no iterations.
fn disabled_optimization_returns_stable_raw_candidate() {
    // Arrange
    let spec = ModulatorSpec::lowpass(3, 64.0).expect("valid spec");
    let config = OptimizationConfig::new(false, 500, false);

    // Act
    let result = synthesize_ntf(&spec, &config).expect("synthesis should succeed");

    // Assert
    assert_well_formed(&result, 3);
    assert_eq!(result.iterations_used, 0);
    assert!(!result.limit_exhausted);
    assert_eq!(result.transfer_function, generate_candidate(&spec));
}

#[test]
// Purpose
// -------
// Optimizing an order-5 OSR-32 design lowers the in-band noise relative
// to the unoptimized DC-zero candidate while staying stable.
//
// Given
// -----
// - Default budget (500 iterations) and tolerances.
//
// Expect
// ------
// - Stable result of order 5 within budget.
// - `noise_power` strictly below that of the raw candidate.
fn optimization_lowers_in_band_noise() {
    // Arrange
    let spec = ModulatorSpec::lowpass(5, 32.0).expect("valid spec");
    let band = SignalBand::from_spec(&spec);
    let raw = generate_candidate(&spec);

    // Act
    let result = synthesize_ntf(&spec, &OptimizationConfig::default()).expect("synthesis");

    // Assert
    assert_well_formed(&result, 5);
    assert!(result.iterations_used <= 500);
    assert!(result.iterations_used > 0);
    assert!(
        result.noise_power < noise_power(&raw, &band),
        "optimized {} vs raw {}",
        result.noise_power,
        noise_power(&raw, &band)
    );
    assert!((result.noise_power - noise_power(&result.transfer_function, &band)).abs() < 1e-15);
}

#[test]
// Purpose
// -------
// A one-iteration budget still yields a stable order-2 NTF; running out of
// iterations is reported, not raised.
fn tiny_budget_returns_stable_best_so_far() {
    let spec = ModulatorSpec::lowpass(2, 8.0).expect("valid spec");
    let config = OptimizationConfig::new(true, 1, false);

    let result = synthesize_ntf(&spec, &config).expect("budget exhaustion is not an error");

    assert_well_formed(&result, 2);
    assert!(result.iterations_used <= 1);
    if result.iterations_used == 1 {
        assert!(result.limit_exhausted);
    }
}

#[test]
// Purpose
// -------
// Invalid inputs fail fast with `InvalidSpecification`, before any
// synthesis work.
fn invalid_order_and_osr_are_rejected() {
    let zero_order = ModulatorSpec::lowpass(0, 64.0).unwrap_err();
    assert!(matches!(zero_order, NtfError::InvalidSpecification { field: "order", .. }));

    let unit_osr = ModulatorSpec::lowpass(3, 1.0).unwrap_err();
    assert!(matches!(unit_osr, NtfError::InvalidSpecification { field: "osr", .. }));
}

#[test]
// Purpose
// -------
// `iterations_used` never exceeds the configured limit, for several
// limits and orders.
fn iterations_never_exceed_limit() {
    for order in [2, 4, 6] {
        for limit in [0, 2, 5, 20] {
            let spec = ModulatorSpec::lowpass(order, 32.0).expect("valid spec");
            let config = OptimizationConfig::new(true, limit, false);

            let result = synthesize_ntf(&spec, &config).expect("synthesis");

            assert!(result.iterations_used <= limit, "order {order}, limit {limit}");
            assert_well_formed(&result, order);
        }
    }
}

#[test]
// Purpose
// -------
// With `debug` set, the observer sees iteration 0 (the start) followed by
// one record per iteration, with non-increasing costs and full-order
// snapshots, and a `debug!` event is logged per iteration.
fn debug_trace_is_monotone_and_complete() {
    // Arrange
    let spec = ModulatorSpec::lowpass(4, 32.0).expect("valid spec");
    let recorder = Arc::new(TraceRecorder::new());
    let config = OptimizationConfig::new(true, 50, true)
        .with_observer(Arc::clone(&recorder) as Arc<dyn IterationObserver>);
    let log = CapturedLog::default();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("deltasigma_ntf=debug"))
        .with_writer(log.clone())
        .with_ansi(false)
        .finish();

    // Act
    let result = tracing::subscriber::with_default(subscriber, || {
        synthesize_ntf(&spec, &config).expect("synthesis")
    });

    // Assert
    let records = recorder.records();
    assert_eq!(records.len(), result.iterations_used + 1);
    for (k, record) in records.iter().enumerate() {
        assert_eq!(record.iteration, k);
        assert_eq!(record.candidate.poles().len(), 4);
    }
    for pair in records.windows(2) {
        assert!(pair[1].cost <= pair[0].cost, "{} then {}", pair[0].cost, pair[1].cost);
    }
    let last = records.last().expect("at least the starting record");
    assert!((last.cost - result.noise_power).abs() <= 1e-12 * result.noise_power.max(1e-300));
    let logged = log.contents();
    assert_eq!(logged.matches("ntf search iteration").count(), records.len());
    assert!(logged.contains("ntf synthesized"));
}

#[test]
// Purpose
// -------
// Without `debug`, observers receive nothing and the numeric outcome is
// identical to the debug run.
fn debug_switch_does_not_change_result() {
    let spec = ModulatorSpec::lowpass(4, 16.0).expect("valid spec");
    let recorder = Arc::new(TraceRecorder::new());
    let quiet = OptimizationConfig::new(true, 100, false)
        .with_observer(Arc::clone(&recorder) as Arc<dyn IterationObserver>);
    let loud = OptimizationConfig::new(true, 100, true);

    let a = synthesize_ntf(&spec, &quiet).expect("synthesis");
    let b = synthesize_ntf(&spec, &loud).expect("synthesis");

    assert!(recorder.is_empty());
    assert_eq!(a.transfer_function, b.transfer_function);
    assert_eq!(a.iterations_used, b.iterations_used);
}

#[test]
// Purpose
// -------
// A token cancelled before the call stops the search immediately; the
// starting candidate comes back gated and flagged as cancelled.
fn cancelled_search_returns_starting_candidate() {
    let spec = ModulatorSpec::lowpass(4, 32.0).expect("valid spec");
    let token = CancelToken::new();
    token.cancel();
    let config = OptimizationConfig::default().with_cancel_token(token);

    let result = synthesize_ntf(&spec, &config).expect("cancellation is not an error");

    assert!(result.cancelled);
    assert_eq!(result.iterations_used, 0);
    assert_eq!(result.transfer_function, generate_candidate(&spec));
}

#[test]
// Purpose
// -------
// Bandpass designs keep zeros inside the band around ±2πf0 and poles
// inside the unit circle.
fn bandpass_design_is_stable_and_centered() {
    let f0 = 0.125;
    let spec = ModulatorSpec::new(6, 32.0, Architecture::bandpass(f0)).expect("valid spec");
    let band = SignalBand::from_spec(&spec);

    let result = synthesize_ntf(&spec, &OptimizationConfig::default()).expect("synthesis");

    assert_well_formed(&result, 6);
    let center = 0.5 * (band.lower + band.upper);
    for z in result.transfer_function.zeros() {
        let offset = (z.arg().abs() - center).abs();
        assert!(offset <= 0.5 * band.width() + 1e-12, "zero angle {} outside band", z.arg());
    }
}

#[test]
// Purpose
// -------
// Optimal zero placement without optimization already beats DC placement.
fn optimal_zero_placement_beats_dc_placement() {
    let dc = ModulatorSpec::lowpass(4, 32.0).expect("valid spec");
    let optimal = dc.with_zero_placement(ZeroPlacement::Optimal);
    let config = OptimizationConfig::new(false, 0, false);

    let a = synthesize_ntf(&dc, &config).expect("synthesis");
    let b = synthesize_ntf(&optimal, &config).expect("synthesis");

    assert!(b.noise_power < a.noise_power);
}

#[test]
// Purpose
// -------
// Without an out-of-band gain target every pole sits at the origin and
// the NTF is pure FIR.
fn missing_out_of_band_gain_places_poles_at_origin() {
    let spec = ModulatorSpec::lowpass(3, 64.0)
        .and_then(|s| s.with_out_of_band_gain(None))
        .expect("valid spec");

    let result = synthesize_ntf(&spec, &OptimizationConfig::new(false, 0, false)).expect("ok");

    assert!(result.transfer_function.poles().iter().all(|p| p.norm() == 0.0));
}

#[test]
// Purpose
// -------
// The Reject policy still returns stable designs for well-posed specs.
fn reject_policy_accepts_well_posed_designs() {
    let spec = ModulatorSpec::lowpass(4, 32.0).expect("valid spec");
    let config = OptimizationConfig::default().with_stability_policy(StabilityPolicy::Reject);

    let result = synthesize_ntf(&spec, &config).expect("synthesis");

    assert_well_formed(&result, 4);
}

#[test]
// Purpose
// -------
// Concurrent calls share no mutable state: results from worker threads
// match the sequential result exactly.
fn concurrent_synthesis_is_deterministic() {
    let spec = ModulatorSpec::lowpass(4, 32.0).expect("valid spec");
    let config = OptimizationConfig::new(true, 100, false);
    let expected = synthesize_ntf(&spec, &config).expect("synthesis");

    let results: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| synthesize_ntf(&spec, &config).expect("synthesis")))
            .collect();
        handles.into_iter().map(|h| h.join().expect("worker panicked")).collect()
    });

    for result in results {
        assert_eq!(result, expected);
    }
}
