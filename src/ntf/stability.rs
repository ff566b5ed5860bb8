//! Stability gate — accept, repair or reject candidate NTFs.
//!
//! Purpose
//! -------
//! Decide whether a candidate transfer function is a stable (BIBO) loop,
//! i.e. every pole strictly inside the unit circle by a safety margin, and
//! repair marginal candidates by reflecting offending poles back into the
//! disk.
//!
//! Key behaviors
//! -------------
//! - [`is_stable`]: every pole has `|p| < 1 − STABILITY_MARGIN`.
//! - [`repair`]: reflects every offending pole with
//!   [`reflect_into_unit_disk`] and snaps numerically duplicated zeros with
//!   [`snap_roots`]. Pole and zero counts are preserved.
//! - [`enforce`]: applies a [`StabilityPolicy`] to a candidate and returns
//!   the (possibly repaired) function with its verdict.
//!
//! Invariants & assumptions
//! ------------------------
//! - `REFLECT_EPS > 2 · STABILITY_MARGIN`, so a repaired finite pole always
//!   passes the gate; consequently `repair(repair(tf)) == repair(tf)`.
//! - Non-finite poles cannot be repaired and keep failing the gate.
//!
//! Conventions
//! -----------
//! - The gate is consulted before any candidate leaves the crate; a
//!   returned candidate that fails it is reported as
//!   `NtfError::StabilityViolation`, an internal invariant failure.
use std::str::FromStr;

use num_complex::Complex64;

use crate::{
    ntf::transfer_function::TransferFunction,
    optimization::errors::OptError,
    polynomial::{reflect_into_unit_disk, snap_roots},
};

/// Safety margin below the unit circle that every accepted pole must keep.
pub const STABILITY_MARGIN: f64 = 1e-6;

/// Distance below which zeros are treated as numerical duplicates.
pub const ZERO_CLUSTER_TOL: f64 = 1e-6;

/// What to do with a candidate that fails the gate.
///
/// Parsing is case-insensitive (`"repair"`, `"reject"`); unknown names
/// return `OptError::InvalidStabilityPolicy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StabilityPolicy {
    /// Reflect offending poles into the disk and accept the result if it
    /// passes the gate.
    #[default]
    Repair,
    /// Score the candidate as infeasible; the optimizer shrinks its step and
    /// retries.
    Reject,
}

impl FromStr for StabilityPolicy {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "repair" => Ok(StabilityPolicy::Repair),
            "reject" => Ok(StabilityPolicy::Reject),
            _ => Err(OptError::InvalidStabilityPolicy {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'repair' or 'reject'.",
            }),
        }
    }
}

/// `true` iff every pole has modulus `< 1 − STABILITY_MARGIN`.
pub fn is_stable(tf: &TransferFunction) -> bool {
    tf.poles().iter().all(|p| p.norm() < 1.0 - STABILITY_MARGIN)
}

/// Reflect offending poles into the disk and snap duplicated zeros.
///
/// Poles inside the margin band (`1 − STABILITY_MARGIN <= |p| < 1`) are first
/// mirrored across the circle so the reflection lands at `(1 − REFLECT_EPS)·p`
/// rather than staying in the band. Stable poles are untouched.
pub fn repair(tf: &TransferFunction) -> TransferFunction {
    let poles = tf.poles().iter().map(|&p| repair_pole(p)).collect();
    let zeros = snap_roots(tf.zeros(), ZERO_CLUSTER_TOL);
    TransferFunction::from_parts(zeros, poles, tf.gain())
}

/// Apply `policy` to `tf`, returning the function to use and whether it
/// passes the gate.
pub fn enforce(tf: TransferFunction, policy: StabilityPolicy) -> (TransferFunction, bool) {
    if is_stable(&tf) {
        return (tf, true);
    }
    match policy {
        StabilityPolicy::Repair => {
            let repaired = repair(&tf);
            let stable = is_stable(&repaired);
            (repaired, stable)
        }
        StabilityPolicy::Reject => (tf, false),
    }
}

fn repair_pole(p: Complex64) -> Complex64 {
    let modulus = p.norm();
    if modulus < 1.0 - STABILITY_MARGIN {
        return p;
    }
    let mirrored = if modulus < 1.0 { p / p.norm_sqr() } else { p };
    reflect_into_unit_disk(mirrored)
}
