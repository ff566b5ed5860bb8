//! Errors for NTF synthesis (specification checks, numeric degeneracy,
//! internal invariants, and optimizer failures).
//!
//! [`NtfError`] is the single error surface returned by
//! [`synthesize_ntf`](crate::ntf::synthesize::synthesize_ntf). Optimizer-layer
//! errors ([`OptError`]) are normalized into it via `From`.
//!
//! ## Conventions
//! - `InvalidSpecification` names the offending field and echoes its value so
//!   callers can fix the input without re-deriving what went wrong.
//! - Running out of iterations is **not** an error; it is reported through
//!   `ConvergenceResult::limit_exhausted`.
//! - `StabilityViolation` is an internal invariant failure: every returned
//!   transfer function is gated, so observing it means the gate is broken.
#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*};

use crate::optimization::errors::OptError;

/// Crate-wide result alias for NTF synthesis.
pub type NtfResult<T> = Result<T, NtfError>;

#[derive(Debug, Clone, PartialEq)]
pub enum NtfError {
    // ---- Input validation ----
    /// A `ModulatorSpec` field is out of range or unrecognized.
    InvalidSpecification { field: &'static str, value: String, reason: &'static str },

    /// Transfer function with more zeros than poles or a non-finite gain.
    InvalidTransferFunction { zeros: usize, poles: usize, reason: &'static str },

    /// Optimizer configuration rejected (tolerances, policy names).
    InvalidConfiguration { text: String },

    // ---- Numerics ----
    /// Every candidate tried in an iteration produced a non-finite cost.
    NumericDegeneracy { iteration: usize, reason: &'static str },

    /// A candidate about to be returned failed the stability gate.
    StabilityViolation { max_modulus: f64 },

    // ---- Optimizer ----
    /// Optimizer/backend failure not covered above.
    OptimizationFailed { status: String },
}

impl std::error::Error for NtfError {}

impl std::fmt::Display for NtfError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NtfError::InvalidSpecification { field, value, reason } => {
                write!(f, "Invalid specification: {field} = {value}: {reason}")
            }
            NtfError::InvalidTransferFunction { zeros, poles, reason } => {
                write!(f, "Invalid transfer function ({zeros} zeros, {poles} poles): {reason}")
            }
            NtfError::InvalidConfiguration { text } => {
                write!(f, "Invalid optimization configuration: {text}")
            }
            NtfError::NumericDegeneracy { iteration, reason } => {
                write!(f, "Numeric degeneracy at iteration {iteration}: {reason}")
            }
            NtfError::StabilityViolation { max_modulus } => {
                write!(
                    f,
                    "Internal invariant violated: returned NTF has a pole of modulus {max_modulus}"
                )
            }
            NtfError::OptimizationFailed { status } => {
                write!(f, "Optimization failed: {status}")
            }
        }
    }
}

impl From<OptError> for NtfError {
    fn from(err: OptError) -> Self {
        match err {
            OptError::NumericDegeneracy { iteration, reason } => {
                NtfError::NumericDegeneracy { iteration, reason }
            }
            OptError::NonFiniteCost { .. } => NtfError::NumericDegeneracy {
                iteration: 0,
                reason: "Noise-power cost of the best candidate is not finite.",
            },
            OptError::InvalidTolCost { .. }
            | OptError::InvalidTolStep { .. }
            | OptError::InvalidInitialStep { .. }
            | OptError::InvalidStabilityPolicy { .. } => {
                NtfError::InvalidConfiguration { text: err.to_string() }
            }
            other => NtfError::OptimizationFailed { status: other.to_string() },
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<NtfError> for PyErr {
    fn from(err: NtfError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Degeneracy raised inside the optimizer must surface as the
    // distinguishable `NumericDegeneracy` kind, keeping the iteration index.
    fn opt_degeneracy_maps_to_ntf_degeneracy() {
        let err: NtfError =
            OptError::NumericDegeneracy { iteration: 7, reason: "all trials were NaN" }.into();
        assert_eq!(err, NtfError::NumericDegeneracy { iteration: 7, reason: "all trials were NaN" });
    }

    #[test]
    fn tolerance_errors_map_to_invalid_configuration() {
        let err: NtfError =
            OptError::InvalidTolStep { tol: -1.0, reason: "Tolerance must be positive." }.into();
        assert!(matches!(err, NtfError::InvalidConfiguration { .. }));
    }

    #[test]
    fn backend_errors_map_to_optimization_failed() {
        let err: NtfError = OptError::BackendError { text: "boom".to_string() }.into();
        match err {
            NtfError::OptimizationFailed { status } => assert!(status.contains("boom")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn invalid_specification_display_names_field_and_value() {
        let err = NtfError::InvalidSpecification {
            field: "order",
            value: "0".to_string(),
            reason: "Order must be at least 1.",
        };
        let text = err.to_string();
        assert!(text.contains("order"));
        assert!(text.contains('0'));
    }
}
