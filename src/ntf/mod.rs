//! ntf — delta-sigma noise transfer function synthesis.
//!
//! Purpose
//! -------
//! Turn a small modulator description (order, oversampling ratio,
//! architecture, optional out-of-band gain) into a stable rational NTF in
//! zero/pole/gain form, optionally refined by a bounded search that
//! minimizes in-band quantization noise.
//!
//! Key behaviors
//! -------------
//! - [`spec`]: validated input ([`ModulatorSpec`], [`Architecture`],
//!   [`ZeroPlacement`]).
//! - [`candidate`] and [`poles`]: θ → zeros on the unit circle, poles from
//!   the H∞ pole family; [`generate_candidate`] is the unoptimized NTF.
//! - [`objective`]: in-band noise power over the [`SignalBand`].
//! - [`stability`]: the gate every returned NTF passes, with repair.
//! - [`synthesize`]: [`synthesize_ntf`], the single entry point.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every [`TransferFunction`] leaving this module has `order` poles, all
//!   strictly inside the unit circle by the stability margin.
//! - Input validation happens once, in [`ModulatorSpec::new`]; downstream
//!   code never re-checks the spec.
//!
//! Conventions
//! -----------
//! - Frequencies are radians/sample inside the crate; the bandpass center
//!   `f0` is in cycles/sample at the API boundary.
//! - Errors are [`NtfError`]; optimizer errors are normalized into it.
//! - Logging goes through `tracing`: `warn!` for pole-solve shortfalls and
//!   exhausted budgets, `info!` per synthesis, `debug!` per search
//!   iteration when `OptimizationConfig::debug` is set.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each submodule.
//! - `tests/integration_ntf_pipeline.rs` exercises the end-to-end scenarios;
//!   `tests/property_invariants.rs` checks stability, order, budget and
//!   repair idempotence with `proptest`.

pub mod candidate;
pub mod errors;
pub mod objective;
pub mod poles;
pub mod spec;
pub mod stability;
pub mod synthesize;
pub mod transfer_function;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::candidate::{Candidate, CandidateBuilder, ZeroLayout, generate_candidate};
pub use self::errors::{NtfError, NtfResult};
pub use self::objective::{SignalBand, noise_power};
pub use self::spec::{Architecture, ModulatorSpec, ZeroPlacement};
pub use self::stability::{StabilityPolicy, is_stable, repair};
pub use self::synthesize::{ConvergenceResult, synthesize_ntf};
pub use self::transfer_function::TransferFunction;

pub mod prelude {
    pub use super::errors::{NtfError, NtfResult};
    pub use super::spec::{Architecture, ModulatorSpec, ZeroPlacement};
    pub use super::stability::StabilityPolicy;
    pub use super::synthesize::{ConvergenceResult, synthesize_ntf};
    pub use super::transfer_function::TransferFunction;
}
