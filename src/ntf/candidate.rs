//! Candidate generator — initial and trial NTFs from a zero parameter vector.
//!
//! Purpose
//! -------
//! Map a small vector θ of normalized zero offsets to a full transfer
//! function: zeros on the unit circle inside the signal band, poles from the
//! H∞ pole family, unit gain. The same mapping produces the initial
//! candidate and every trial point the optimizer evaluates.
//!
//! Key behaviors
//! -------------
//! - [`ZeroLayout`] owns the parameterization: how many free offsets exist,
//!   their bounds, the initial θ for a [`ZeroPlacement`], and θ → zeros.
//! - [`CandidateBuilder::build`] adds poles via
//!   [`place_poles`](crate::ntf::poles::place_poles) for the modulator's H∞.
//! - [`generate_candidate`] is the raw, unoptimized result returned when
//!   optimization is disabled.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every built transfer function has exactly `order` zeros and `order`
//!   poles, zeros with modulus 1, and gain `1.0`.
//! - θ is assumed to lie within [`ZeroLayout::bounds`]; the optimizer clamps
//!   trial points before calling [`ZeroLayout::zeros`].
//!
//! Conventions
//! -----------
//! - Lowpass offsets `u ∈ [0, 1]` map to the zero pair at `±u·π/OSR`; odd
//!   orders add a fixed zero at `z = 1`.
//! - Bandpass offsets `u ∈ [−1, 1]` map to the pair at
//!   `±(2πf0 + u·π/(2·OSR))`.
//! - Zeros and poles are ordered with
//!   [`sort_conjugate_pairs`](crate::polynomial::sort_conjugate_pairs).
use std::f64::consts::PI;

use ndarray::Array1;
use num_complex::Complex64;

use crate::{
    ntf::{
        poles::{PolePlacement, place_poles},
        spec::{Architecture, ModulatorSpec, ZeroPlacement},
        transfer_function::TransferFunction,
    },
    optimization::types::Theta,
    polynomial::{legendre_roots, sort_conjugate_pairs},
};

/// Zero parameterization for one modulator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZeroLayout {
    order: usize,
    osr: f64,
    architecture: Architecture,
}

impl ZeroLayout {
    pub fn new(spec: &ModulatorSpec) -> Self {
        Self { order: spec.order(), osr: spec.osr(), architecture: spec.architecture() }
    }

    /// Number of free offsets (conjugate zero pairs).
    pub fn dim(&self) -> usize {
        self.order / 2
    }

    /// Elementwise `(lower, upper)` bounds of θ.
    pub fn bounds(&self) -> (Theta, Theta) {
        let lower = match self.architecture {
            Architecture::Lowpass => 0.0,
            Architecture::Bandpass { .. } => -1.0,
        };
        (Array1::from_elem(self.dim(), lower), Array1::from_elem(self.dim(), 1.0))
    }

    /// Starting θ for the requested zero placement.
    ///
    /// `Optimal` uses the Legendre nodes: the positive roots of `P_order`
    /// for lowpass, all roots of `P_{order/2}` for bandpass.
    pub fn initial_theta(&self, placement: ZeroPlacement) -> Theta {
        match placement {
            ZeroPlacement::Dc => Array1::zeros(self.dim()),
            ZeroPlacement::Optimal => match self.architecture {
                Architecture::Lowpass => {
                    let nodes = legendre_roots(self.order);
                    Array1::from_iter(nodes[self.order - self.dim()..].iter().copied())
                }
                Architecture::Bandpass { .. } => Array1::from_vec(legendre_roots(self.dim())),
            },
        }
    }

    /// Zeros for offsets `theta`, on the unit circle and conjugate-paired.
    pub fn zeros(&self, theta: &Theta) -> Vec<Complex64> {
        let mut zeros = Vec::with_capacity(self.order);
        match self.architecture {
            Architecture::Lowpass => {
                let edge = PI / self.osr;
                for &u in theta.iter() {
                    push_pair(&mut zeros, u * edge);
                }
                if self.order % 2 == 1 {
                    zeros.push(Complex64::new(1.0, 0.0));
                }
            }
            Architecture::Bandpass { f0 } => {
                let center = 2.0 * PI * f0;
                let half = PI / (2.0 * self.osr);
                for &u in theta.iter() {
                    push_pair(&mut zeros, center + u * half);
                }
            }
        }
        sort_conjugate_pairs(&mut zeros);
        zeros
    }
}

fn push_pair(zeros: &mut Vec<Complex64>, angle: f64) {
    let z = Complex64::from_polar(1.0, angle);
    zeros.push(z);
    zeros.push(z.conj());
}

/// A scored candidate: transfer function, in-band noise power and gate
/// verdict.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub transfer_function: TransferFunction,
    pub cost: f64,
    pub stable: bool,
}

/// θ → transfer function for a fixed spec.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateBuilder {
    spec: ModulatorSpec,
    layout: ZeroLayout,
}

impl CandidateBuilder {
    pub fn new(spec: &ModulatorSpec) -> Self {
        Self { spec: *spec, layout: ZeroLayout::new(spec) }
    }

    pub fn spec(&self) -> &ModulatorSpec {
        &self.spec
    }

    pub fn layout(&self) -> &ZeroLayout {
        &self.layout
    }

    /// θ for the modulator's configured zero placement.
    pub fn initial_theta(&self) -> Theta {
        self.layout.initial_theta(self.spec.zero_placement())
    }

    /// Transfer function for `theta`, plus the pole-solve diagnostics.
    pub fn build(&self, theta: &Theta) -> (TransferFunction, PolePlacement) {
        let zeros = self.layout.zeros(theta);
        let placement = place_poles(
            &zeros,
            self.spec.order(),
            self.spec.architecture(),
            self.spec.out_of_band_gain(),
        );
        let tf = TransferFunction::from_parts(zeros, placement.poles.clone(), 1.0);
        (tf, placement)
    }
}

/// Unoptimized NTF for `spec`: initial zero placement plus H∞ poles.
///
/// Deterministic and infallible for a validated spec. Pole-solve trouble
/// (unreachable H∞, exhausted secant budget) is logged and the best poles
/// found are kept.
pub fn generate_candidate(spec: &ModulatorSpec) -> TransferFunction {
    let builder = CandidateBuilder::new(spec);
    let (tf, placement) = builder.build(&builder.initial_theta());
    log_pole_solve(spec, &placement);
    tf
}

/// Warn when pole placement fell short of the H∞ request.
pub(crate) fn log_pole_solve(spec: &ModulatorSpec, placement: &PolePlacement) {
    if !placement.outcome.is_satisfactory() {
        tracing::warn!(
            order = spec.order(),
            osr = spec.osr(),
            h_inf = ?spec.out_of_band_gain(),
            outcome = ?placement.outcome,
            iterations = placement.iterations,
            "pole placement did not meet the out-of-band gain target"
        );
    }
}
