//! Zero/pole/gain transfer function.
//!
//! `H(z) = k · ∏(z − zᵢ) / ∏(z − pᵢ)`. This is the artifact handed to
//! downstream collaborators (simulation, scaling, topology mapping); fields
//! are private so a returned NTF cannot be mutated in place.
use num_complex::Complex64;

use crate::{
    ntf::errors::{NtfError, NtfResult},
    polynomial::{evaluate_from_roots, roots_to_coefficients},
};

/// Rational transfer function in zero/pole/gain form.
///
/// Invariants
/// ----------
/// - `zeros.len() <= poles.len()` (proper).
/// - `gain` is finite.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferFunction {
    zeros: Vec<Complex64>,
    poles: Vec<Complex64>,
    gain: f64,
}

impl TransferFunction {
    /// Build a validated transfer function.
    ///
    /// # Errors
    /// - [`NtfError::InvalidTransferFunction`] if there are more zeros than
    ///   poles or the gain is not finite.
    pub fn new(zeros: Vec<Complex64>, poles: Vec<Complex64>, gain: f64) -> NtfResult<Self> {
        if zeros.len() > poles.len() {
            return Err(NtfError::InvalidTransferFunction {
                zeros: zeros.len(),
                poles: poles.len(),
                reason: "A proper transfer function cannot have more zeros than poles.",
            });
        }
        if !gain.is_finite() {
            return Err(NtfError::InvalidTransferFunction {
                zeros: zeros.len(),
                poles: poles.len(),
                reason: "Gain must be finite.",
            });
        }
        Ok(Self { zeros, poles, gain })
    }

    /// Crate-internal constructor for callers that build matching counts by
    /// construction (candidate generator, stability repair).
    pub(crate) fn from_parts(zeros: Vec<Complex64>, poles: Vec<Complex64>, gain: f64) -> Self {
        debug_assert!(zeros.len() <= poles.len());
        Self { zeros, poles, gain }
    }

    pub fn zeros(&self) -> &[Complex64] {
        &self.zeros
    }

    pub fn poles(&self) -> &[Complex64] {
        &self.poles
    }

    pub fn gain(&self) -> f64 {
        self.gain
    }

    /// Number of poles (the modulator order for an NTF).
    pub fn order(&self) -> usize {
        self.poles.len()
    }

    /// Evaluate `H(z)` at an arbitrary complex point.
    pub fn evaluate(&self, z: Complex64) -> Complex64 {
        evaluate_from_roots(&self.zeros, z) / evaluate_from_roots(&self.poles, z) * self.gain
    }

    /// Frequency response `H(e^{jω})`, `ω` in radians/sample.
    pub fn frequency_response(&self, omega: f64) -> Complex64 {
        self.evaluate(Complex64::from_polar(1.0, omega))
    }

    /// Largest pole modulus (`0` when there are no poles).
    pub fn max_pole_modulus(&self) -> f64 {
        self.poles.iter().map(|p| p.norm()).fold(0.0, f64::max)
    }

    /// Numerator and denominator coefficients in powers of `z`, highest
    /// first. The numerator carries the gain.
    pub fn to_coefficients(&self) -> (Vec<Complex64>, Vec<Complex64>) {
        let num = roots_to_coefficients(&self.zeros).into_iter().map(|c| c * self.gain).collect();
        (num, roots_to_coefficients(&self.poles))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    #[test]
    // Purpose
    // -------
    // Reject improper rational functions and non-finite gains.
    fn new_rejects_improper_and_non_finite_gain() {
        let err = TransferFunction::new(vec![c(1.0, 0.0); 3], vec![c(0.0, 0.0); 2], 1.0);
        assert!(matches!(err, Err(NtfError::InvalidTransferFunction { zeros: 3, poles: 2, .. })));

        let err = TransferFunction::new(vec![], vec![c(0.0, 0.0)], f64::NAN);
        assert!(matches!(err, Err(NtfError::InvalidTransferFunction { .. })));
    }

    #[test]
    // Purpose
    // -------
    // A first-order NTF `(z − 1)/z` has |H| = 2 at Nyquist and 0 at DC.
    fn frequency_response_of_first_difference() {
        let tf = TransferFunction::new(vec![c(1.0, 0.0)], vec![c(0.0, 0.0)], 1.0).unwrap();

        assert!(tf.frequency_response(0.0).norm() < 1e-15);
        assert!((tf.frequency_response(std::f64::consts::PI).norm() - 2.0).abs() < 1e-12);
        assert_eq!(tf.order(), 1);
    }

    #[test]
    fn to_coefficients_scales_numerator_by_gain() {
        let tf = TransferFunction::new(vec![c(1.0, 0.0)], vec![c(0.5, 0.0)], 2.0).unwrap();
        let (num, den) = tf.to_coefficients();
        assert_eq!(num, vec![c(2.0, 0.0), c(-2.0, 0.0)]);
        assert_eq!(den, vec![c(1.0, 0.0), c(-0.5, 0.0)]);
    }

    #[test]
    fn max_pole_modulus_reports_largest_pole() {
        let tf = TransferFunction::new(vec![], vec![c(0.3, 0.4), c(-0.9, 0.0)], 1.0).unwrap();
        assert!((tf.max_pole_modulus() - 0.9).abs() < 1e-15);
    }
}
