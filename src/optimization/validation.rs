//! Validation helpers for the zero-placement search.
//!
//! - **Tolerance checks**: [`verify_tol_cost`], [`verify_tol_step`],
//!   [`verify_initial_step`] ensure numeric settings are finite and strictly
//!   positive.
//! - **Search results**: [`validate_theta_hat`] ensures a best parameter
//!   vector exists and is finite; [`validate_value`] checks the best cost.
//!
//! Each helper returns a dedicated [`OptError`] variant so configuration
//! mistakes are reported with the offending value.
use crate::optimization::{
    errors::{OptError, OptResult},
    types::Theta,
};

/// Validate the relative cost-improvement tolerance.
///
/// # Errors
/// Returns [`OptError::InvalidTolCost`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_cost(tol: f64) -> OptResult<()> {
    if !tol.is_finite() {
        return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be finite." });
    }
    if tol <= 0.0 {
        return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be positive." });
    }
    Ok(())
}

/// Validate the step-size tolerance.
///
/// # Errors
/// Returns [`OptError::InvalidTolStep`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_step(tol: f64) -> OptResult<()> {
    if !tol.is_finite() {
        return Err(OptError::InvalidTolStep { tol, reason: "Tolerance must be finite." });
    }
    if tol <= 0.0 {
        return Err(OptError::InvalidTolStep { tol, reason: "Tolerance must be positive." });
    }
    Ok(())
}

/// Validate the initial compass step.
///
/// # Errors
/// Returns [`OptError::InvalidInitialStep`] if the value is non-finite or
/// ≤ 0.0.
pub fn verify_initial_step(step: f64) -> OptResult<()> {
    if !step.is_finite() {
        return Err(OptError::InvalidInitialStep { step, reason: "Step must be finite." });
    }
    if step <= 0.0 {
        return Err(OptError::InvalidInitialStep { step, reason: "Step must be positive." });
    }
    Ok(())
}

/// Validate and unwrap the best parameter vector (`theta_hat`).
///
/// # Errors
/// - [`OptError::MissingThetaHat`] if no vector was provided.
/// - [`OptError::InvalidThetaHat`] if any element is non-finite.
pub fn validate_theta_hat(theta_hat: Option<Theta>) -> OptResult<Theta> {
    match theta_hat {
        Some(t) => {
            for (index, &value) in t.iter().enumerate() {
                if !value.is_finite() {
                    return Err(OptError::InvalidThetaHat {
                        index,
                        value,
                        reason: "Zero offsets must be finite.",
                    });
                }
            }
            Ok(t)
        }
        None => Err(OptError::MissingThetaHat),
    }
}

/// Validate that the best cost is finite.
///
/// # Errors
/// Returns [`OptError::NonFiniteCost`] if the value is `NaN` or infinite.
pub fn validate_value(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::NonFiniteCost { value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Every tolerance rejects zero, negatives and non-finite values with its
    // own error variant.
    fn tolerance_checks_reject_non_positive_and_non_finite() {
        for bad in [0.0, -1e-3, f64::NAN, f64::INFINITY] {
            assert!(matches!(verify_tol_cost(bad), Err(OptError::InvalidTolCost { .. })));
            assert!(matches!(verify_tol_step(bad), Err(OptError::InvalidTolStep { .. })));
            assert!(matches!(
                verify_initial_step(bad),
                Err(OptError::InvalidInitialStep { .. })
            ));
        }
        assert!(verify_tol_cost(1e-9).is_ok());
        assert!(verify_tol_step(1e-6).is_ok());
        assert!(verify_initial_step(0.1).is_ok());
    }

    #[test]
    fn validate_theta_hat_reports_missing_and_non_finite() {
        assert_eq!(validate_theta_hat(None), Err(OptError::MissingThetaHat));
        let err = validate_theta_hat(Some(array![0.1, f64::NAN])).unwrap_err();
        assert!(matches!(err, OptError::InvalidThetaHat { index: 1, .. }));
        assert_eq!(validate_theta_hat(Some(array![0.5])).unwrap(), array![0.5]);
    }

    #[test]
    fn validate_value_rejects_infinite_cost() {
        assert!(validate_value(f64::INFINITY).is_err());
        assert!(validate_value(0.25).is_ok());
    }
}
