//! optimization — argmin-backed zero-placement search and its error surface.
//!
//! Purpose
//! -------
//! Refine the NTF zero offsets θ by minimizing in-band noise power with a
//! bounded, derivative-free search, while keeping every compared candidate
//! behind the stability gate. Callers configure the run with a per-call
//! [`OptimizationConfig`] and get back a normalized [`SearchOutcome`].
//!
//! Key behaviors
//! -------------
//! - [`problem::NtfProblem`] exposes θ → noise power as an argmin
//!   `CostFunction`.
//! - [`solver::CompassSearch`] is a custom argmin `Solver` (coordinate
//!   pattern search with step halving and bounded shrink-and-retry).
//! - [`run::run_search`] wires problem, solver, iteration budget, observers
//!   and cancellation into an argmin `Executor`.
//! - [`observer`] provides the debug side channel (`tracing` events plus an
//!   optional [`IterationObserver`]).
//! - Configuration issues, numerical failures and backend errors are
//!   normalized into a single enum ([`OptError`]) with a common result alias
//!   ([`OptResult<T>`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - `iterations <= iteration_limit`; exhausting the budget is a flag on the
//!   outcome, not an error.
//! - The recorded cost sequence is non-increasing; the current parameter is
//!   always the best found.
//! - Observers and logging never change the numeric outcome.
//!
//! Conventions
//! -----------
//! - Parameters are [`Theta`] (`Array1<f64>`) of normalized offsets inside
//!   the layout's box bounds; costs are [`Cost`] (`f64`).
//! - Public entrypoints that can fail return `OptResult<T>`; callers never
//!   see raw argmin errors.
//!
//! Testing notes
//! -------------
//! - `solver` tests run the compass search on toy quadratics (convergence,
//!   bounds, budget, NaN degeneracy, cancellation).
//! - `run` and `problem` tests exercise the search on real NTF problems.
//! - `errors` tests cover the argmin error round trip.

pub mod cancel;
pub mod config;
pub mod errors;
pub mod observer;
pub mod problem;
pub mod run;
pub mod solver;
pub mod types;
pub mod validation;

pub use self::cancel::CancelToken;
pub use self::config::{OptimizationConfig, Tolerances};
pub use self::errors::{OptError, OptResult};
pub use self::observer::{IterationObserver, IterationRecord, TraceRecorder};
pub use self::run::{SearchOutcome, run_search};
pub use self::types::{Cost, Theta};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use deltasigma_ntf::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::cancel::CancelToken;
    pub use super::config::{OptimizationConfig, Tolerances};
    pub use super::errors::{OptError, OptResult};
    pub use super::observer::{IterationObserver, IterationRecord, TraceRecorder};
}
