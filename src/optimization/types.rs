//! optimization::types — shared numeric aliases and solver wiring.
//!
//! Purpose
//! -------
//! Centralize the numeric types used by the zero-placement search so the
//! rest of the optimizer stays agnostic to `ndarray` and Argmin generics.
//!
//! Invariants & assumptions
//! ------------------------
//! - `Theta` holds normalized zero offsets, one per conjugate zero pair;
//!   its length is `ZeroLayout::dim()` for the modulator being synthesized.
//! - `Cost` is in-band noise power (lower is better); `+∞` marks a
//!   candidate rejected by the stability gate, NaN a degenerate evaluation.
//! - The search is derivative-free, so the gradient, Jacobian, Hessian and
//!   residual slots of [`SearchState`] are unit types.
use argmin::core::IterState;
use ndarray::Array1;
use std::collections::HashMap;

/// Parameter vector `θ` of normalized zero offsets.
pub type Theta = Array1<f64>;

/// Scalar objective value (in-band noise power).
pub type Cost = f64;

/// Argmin state carried by the compass search.
pub type SearchState = IterState<Theta, (), (), (), (), Cost>;

/// Function-evaluation counters as reported by the solver.
///
/// Maps counter names (e.g., `"cost_count"`) to counts.
pub type FnEvalMap = HashMap<String, u64>;

/// Termination text reported when a [`CancelToken`](crate::optimization::cancel::CancelToken)
/// stops the search.
pub const CANCELLED_STATUS: &str = "cancelled";
