//! Pole placement for a target out-of-band gain (H∞).
//!
//! Purpose
//! -------
//! Given the NTF zeros, find poles from the maximally-flat pole family whose
//! real response at the out-of-band reference point equals the H∞ target.
//! The family is indexed by a single positive scalar `x`; a secant iteration
//! on `x` drives `Re H(z∞) − H∞` to zero.
//!
//! Key behaviors
//! -------------
//! - Lowpass: `z∞ = −1`, start `x = 0.3^(n−1)`, poles from
//!   `m = 1 − ½·x^(2/n)·e^{jwₖ}`, `p = m − √(m² − 1)`.
//! - Bandpass: `z∞ = +1` when `f0 > 0.25`, else `−1`; start
//!   `x = 0.3^(n/2−1)`, `m = cos(2πf0) + ½·x^(2/n)·e^{jwₖ}`.
//! - `wₖ = (2k − 1)π/n` for `k = 1..=n`; poles outside the disk are inverted
//!   (`1/p`) and the set is sorted into conjugate pairs.
//! - No target, or a lowpass target `H∞ >= 2^n`, leaves every pole at the
//!   origin.
//!
//! Invariants & assumptions
//! ------------------------
//! - The solver runs at most [`POLE_SOLVE_ITER_LIMIT`] iterations,
//!   independent of the optimizer's budget.
//! - Returned poles are finite whenever `x` stayed finite; the stability
//!   gate downstream handles anything that is not.
use std::f64::consts::PI;

use num_complex::Complex64;

use crate::{
    ntf::spec::Architecture,
    polynomial::{evaluate_from_roots, sort_conjugate_pairs},
};

/// Secant iterations allowed per pole solve.
pub const POLE_SOLVE_ITER_LIMIT: usize = 500;

/// Residual / step size below which the secant iteration has converged.
const SECANT_TOL: f64 = 1e-10;

/// Family parameter beyond which the target is considered unreachable.
const SECANT_X_CEILING: f64 = 1e6;

/// How a pole solve finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoleSolveOutcome {
    /// No H∞ target: poles at the origin.
    NoTarget,
    /// Lowpass target at or above `2^order`: poles at the origin.
    TargetTooHigh,
    Converged,
    /// Family parameter exceeded its ceiling before the target was met.
    Diverged,
    IterationLimit,
    /// Secant step became non-finite (flat residual).
    Stalled,
}

impl PoleSolveOutcome {
    /// `true` when the poles meet the request (including the origin cases
    /// that need no solving).
    pub fn is_satisfactory(&self) -> bool {
        matches!(self, PoleSolveOutcome::NoTarget | PoleSolveOutcome::Converged)
    }
}

/// Poles produced by [`place_poles`] with solve diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct PolePlacement {
    pub poles: Vec<Complex64>,
    pub iterations: usize,
    pub outcome: PoleSolveOutcome,
}

impl PolePlacement {
    fn at_origin(order: usize, outcome: PoleSolveOutcome) -> Self {
        Self { poles: vec![Complex64::new(0.0, 0.0); order], iterations: 0, outcome }
    }
}

/// Place `order` poles for the given zeros and H∞ target.
///
/// Deterministic in its inputs; never panics. See the module docs for the
/// pole family and stopping rules.
pub fn place_poles(
    zeros: &[Complex64], order: usize, architecture: Architecture, h_inf: Option<f64>,
) -> PolePlacement {
    let Some(h_inf) = h_inf else {
        return PolePlacement::at_origin(order, PoleSolveOutcome::NoTarget);
    };
    if order == 0 {
        return PolePlacement::at_origin(order, PoleSolveOutcome::Converged);
    }

    let n = order as f64;
    // Family member for rotation r: `center + scale · x^(2/n) · r`.
    let (mut x, z_inf, center, scale) = match architecture {
        Architecture::Lowpass => {
            if h_inf >= 2f64.powi(order as i32) {
                return PolePlacement::at_origin(order, PoleSolveOutcome::TargetTooHigh);
            }
            (0.3f64.powi(order as i32 - 1), -1.0, 1.0, -0.5)
        }
        Architecture::Bandpass { f0 } => {
            let z_inf = if f0 > 0.25 { 1.0 } else { -1.0 };
            (0.3f64.powf(n / 2.0 - 1.0), z_inf, (2.0 * PI * f0).cos(), 0.5)
        }
    };

    let rotations: Vec<Complex64> = (1..=order)
        .map(|k| Complex64::from_polar(1.0, (2.0 * k as f64 - 1.0) * PI / n))
        .collect();
    let z_inf = Complex64::new(z_inf, 0.0);
    let numerator = evaluate_from_roots(zeros, z_inf);

    let mut poles = vec![Complex64::new(0.0, 0.0); order];
    let mut delta_x = 0.0;
    let mut f_prev = 0.0;
    for itn in 1..=POLE_SOLVE_ITER_LIMIT {
        poles = family_poles(&rotations, |rot| center + scale * x.powf(2.0 / n) * rot);
        let f = (numerator / evaluate_from_roots(&poles, z_inf)).re - h_inf;

        delta_x = if itn == 1 { -f / 100.0 } else { -f * delta_x / (f - f_prev) };
        if !delta_x.is_finite() {
            return PolePlacement { poles, iterations: itn, outcome: PoleSolveOutcome::Stalled };
        }
        let x_plus = x + delta_x;
        x = if x_plus > 0.0 { x_plus } else { x * 0.1 };
        f_prev = f;

        if f.abs() < SECANT_TOL || delta_x.abs() < SECANT_TOL {
            return PolePlacement { poles, iterations: itn, outcome: PoleSolveOutcome::Converged };
        }
        if x > SECANT_X_CEILING {
            return PolePlacement { poles, iterations: itn, outcome: PoleSolveOutcome::Diverged };
        }
    }
    PolePlacement {
        poles,
        iterations: POLE_SOLVE_ITER_LIMIT,
        outcome: PoleSolveOutcome::IterationLimit,
    }
}

fn family_poles(rotations: &[Complex64], member: impl Fn(Complex64) -> Complex64) -> Vec<Complex64> {
    let mut poles: Vec<Complex64> = rotations
        .iter()
        .map(|&rot| {
            let m = member(rot);
            let p = m - (m * m - 1.0).sqrt();
            if p.norm() > 1.0 { p.inv() } else { p }
        })
        .collect();
    sort_conjugate_pairs(&mut poles);
    poles
}
