//! Noise-power objective — in-band power of the NTF.
//!
//! Purpose
//! -------
//! Score a candidate transfer function by the quantization-noise power it
//! lets through inside the signal band. This is the cost the optimizer
//! minimizes.
//!
//! Key behaviors
//! -------------
//! - [`SignalBand::from_spec`]: lowpass `[0, π/OSR]`, bandpass
//!   `[2πf0 − π/(2·OSR), 2πf0 + π/(2·OSR)]` (radians/sample).
//! - [`noise_power`]: `(1/π) ∫_band |H(e^{jω})|² dω` by the trapezoidal rule
//!   on [`NOISE_GRID_POINTS`] linearly spaced frequencies.
//! - [`noise_power_db`], [`rms_gain_db`], [`out_of_band_gain`]: reporting
//!   helpers built on the same sampling.
//!
//! Invariants & assumptions
//! ------------------------
//! - For poles strictly inside the disk the result is finite and
//!   non-negative. Poles on the unit circle inside the band yield `+∞` or
//!   NaN; the caller (problem layer) decides how to score those.
use std::f64::consts::PI;

use crate::ntf::{
    spec::{Architecture, ModulatorSpec},
    transfer_function::TransferFunction,
};

/// Number of frequency samples used to integrate over the band.
pub const NOISE_GRID_POINTS: usize = 100;

/// Out-of-band samples used by [`out_of_band_gain`].
const OUT_OF_BAND_GRID_POINTS: usize = 1000;

/// Signal band in radians/sample, `0 <= lower < upper <= π`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalBand {
    pub lower: f64,
    pub upper: f64,
}

impl SignalBand {
    /// Band implied by the modulator's OSR and architecture.
    ///
    /// Bandpass edges are clamped to `[0, π]` so very low OSR values with
    /// centers near DC or Nyquist still give a valid interval.
    pub fn from_spec(spec: &ModulatorSpec) -> Self {
        let osr = spec.osr();
        match spec.architecture() {
            Architecture::Lowpass => Self { lower: 0.0, upper: PI / osr },
            Architecture::Bandpass { f0 } => {
                let center = 2.0 * PI * f0;
                let half = PI / (2.0 * osr);
                Self { lower: (center - half).max(0.0), upper: (center + half).min(PI) }
            }
        }
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn contains(&self, omega: f64) -> bool {
        omega >= self.lower && omega <= self.upper
    }

    /// `points` equally spaced frequencies from `lower` to `upper`
    /// inclusive.
    fn grid(&self, points: usize) -> impl Iterator<Item = f64> + '_ {
        let step = self.width() / (points - 1) as f64;
        (0..points).map(move |i| self.lower + step * i as f64)
    }
}

/// In-band noise power `(1/π) ∫_band |H(e^{jω})|² dω`.
pub fn noise_power(tf: &TransferFunction, band: &SignalBand) -> f64 {
    let step = band.width() / (NOISE_GRID_POINTS - 1) as f64;
    let samples: Vec<f64> =
        band.grid(NOISE_GRID_POINTS).map(|w| tf.frequency_response(w).norm_sqr()).collect();
    let interior: f64 = samples[1..NOISE_GRID_POINTS - 1].iter().sum();
    let ends = 0.5 * (samples[0] + samples[NOISE_GRID_POINTS - 1]);
    (ends + interior) * step / PI
}

/// [`noise_power`] in decibels (`10·log10`).
pub fn noise_power_db(tf: &TransferFunction, band: &SignalBand) -> f64 {
    10.0 * noise_power(tf, band).log10()
}

/// RMS in-band gain in decibels, normalized by the band width.
pub fn rms_gain_db(tf: &TransferFunction, band: &SignalBand) -> f64 {
    let mean_square = noise_power(tf, band) * PI / band.width();
    10.0 * mean_square.log10()
}

/// Largest `|H(e^{jω})|` over `[0, π]` outside the signal band.
pub fn out_of_band_gain(tf: &TransferFunction, band: &SignalBand) -> f64 {
    let full = SignalBand { lower: 0.0, upper: PI };
    full.grid(OUT_OF_BAND_GRID_POINTS)
        .filter(|&w| !band.contains(w))
        .map(|w| tf.frequency_response(w).norm())
        .fold(0.0, f64::max)
}
