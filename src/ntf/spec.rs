//! Modulator specification — order, oversampling ratio, architecture.
//!
//! Purpose
//! -------
//! Provide the validated, immutable input of NTF synthesis. A
//! [`ModulatorSpec`] is built once by the caller and then only read by the
//! candidate generator, the objective and the optimizer.
//!
//! Key behaviors
//! -------------
//! - [`ModulatorSpec::new`] rejects `order < 1`, non-finite or `osr <= 1`,
//!   and invalid bandpass settings with [`NtfError::InvalidSpecification`].
//! - [`Architecture`] and [`ZeroPlacement`] parse case-insensitively from
//!   strings; unknown tags are specification errors.
//! - The out-of-band gain target (H∞) defaults to `1.5`; `None` leaves every
//!   pole at the origin.
//!
//! Invariants & assumptions
//! ------------------------
//! - Fields are private; a constructed spec always satisfies the checks
//!   above, so downstream code never re-validates.
//! - Bandpass designs have even order and `0 < f0 < 0.5` (cycles/sample).
//! - H∞, when present, is finite and strictly greater than 1.
use std::str::FromStr;

use crate::ntf::errors::{NtfError, NtfResult};

/// Default out-of-band gain target (H∞).
pub const DEFAULT_OUT_OF_BAND_GAIN: f64 = 1.5;

/// Loop architecture of the modulator.
///
/// Parsing accepts `"lowpass"`/`"lp"` and `"bandpass"`/`"bp"` in any case.
/// A bare `"bandpass"` tag centers the band at `fs/4` (`f0 = 0.25`); use
/// [`Architecture::bandpass`] for other centers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Architecture {
    Lowpass,
    /// Band centered at `f0` cycles/sample.
    Bandpass { f0: f64 },
}

impl Architecture {
    pub fn bandpass(f0: f64) -> Self {
        Architecture::Bandpass { f0 }
    }

    /// Center frequency in cycles/sample (`0` for lowpass).
    pub fn center_frequency(&self) -> f64 {
        match self {
            Architecture::Lowpass => 0.0,
            Architecture::Bandpass { f0 } => *f0,
        }
    }

    pub fn is_bandpass(&self) -> bool {
        matches!(self, Architecture::Bandpass { .. })
    }
}

impl FromStr for Architecture {
    type Err = NtfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lowpass" | "lp" => Ok(Architecture::Lowpass),
            "bandpass" | "bp" => Ok(Architecture::Bandpass { f0: 0.25 }),
            _ => Err(NtfError::InvalidSpecification {
                field: "architecture",
                value: s.to_string(),
                reason: "Valid options are case insensitive 'lowpass' or 'bandpass'.",
            }),
        }
    }
}

/// Where the initial NTF zeros are placed inside the signal band.
///
/// - `Dc`: every zero at DC (or at the band center for bandpass). Maximally
///   flat; the response rises monotonically away from the band center.
/// - `Optimal`: zeros spread over the band at the Legendre nodes, which
///   minimize the in-band noise of the zeros alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroPlacement {
    #[default]
    Dc,
    Optimal,
}

impl ZeroPlacement {
    /// Map the integer `opt` flag of the Python API: `0` is `Dc`, anything else is
    /// `Optimal`.
    pub fn from_opt_code(opt: u8) -> Self {
        if opt == 0 { ZeroPlacement::Dc } else { ZeroPlacement::Optimal }
    }
}

impl FromStr for ZeroPlacement {
    type Err = NtfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dc" => Ok(ZeroPlacement::Dc),
            "optimal" | "optimized" => Ok(ZeroPlacement::Optimal),
            _ => Err(NtfError::InvalidSpecification {
                field: "zero_placement",
                value: s.to_string(),
                reason: "Valid options are case insensitive 'dc' or 'optimal'.",
            }),
        }
    }
}

/// Validated synthesis input.
///
/// Fields
/// ------
/// - `order`: modulator order, equal to the NTF pole count (≥ 1).
/// - `osr`: oversampling ratio (> 1, finite).
/// - `architecture`: lowpass or bandpass around `f0`.
/// - `out_of_band_gain`: optional H∞ target driving pole placement.
/// - `zero_placement`: initial zero pattern.
///
/// Construct with [`ModulatorSpec::new`] (or [`ModulatorSpec::lowpass`]) and
/// refine with the `with_*` methods, each of which re-validates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModulatorSpec {
    order: usize,
    osr: f64,
    architecture: Architecture,
    out_of_band_gain: Option<f64>,
    zero_placement: ZeroPlacement,
}

impl ModulatorSpec {
    /// Build a spec with the default H∞ (`1.5`) and DC zero placement.
    ///
    /// # Errors
    /// - [`NtfError::InvalidSpecification`] for `order == 0`, `osr <= 1` or
    ///   non-finite `osr`, and bandpass designs with odd order or
    ///   `f0 ∉ (0, 0.5)`.
    pub fn new(order: usize, osr: f64, architecture: Architecture) -> NtfResult<Self> {
        if order < 1 {
            return Err(NtfError::InvalidSpecification {
                field: "order",
                value: order.to_string(),
                reason: "Order must be at least 1.",
            });
        }
        if !osr.is_finite() {
            return Err(NtfError::InvalidSpecification {
                field: "osr",
                value: osr.to_string(),
                reason: "Oversampling ratio must be finite.",
            });
        }
        if osr <= 1.0 {
            return Err(NtfError::InvalidSpecification {
                field: "osr",
                value: osr.to_string(),
                reason: "Oversampling ratio must be greater than 1.",
            });
        }
        if let Architecture::Bandpass { f0 } = architecture {
            if !(f0 > 0.0 && f0 < 0.5) {
                return Err(NtfError::InvalidSpecification {
                    field: "f0",
                    value: f0.to_string(),
                    reason: "Bandpass center frequency must lie strictly between 0 and 0.5.",
                });
            }
            if order % 2 != 0 {
                return Err(NtfError::InvalidSpecification {
                    field: "order",
                    value: order.to_string(),
                    reason: "Bandpass designs require an even order.",
                });
            }
        }
        Ok(Self {
            order,
            osr,
            architecture,
            out_of_band_gain: Some(DEFAULT_OUT_OF_BAND_GAIN),
            zero_placement: ZeroPlacement::Dc,
        })
    }

    pub fn lowpass(order: usize, osr: f64) -> NtfResult<Self> {
        Self::new(order, osr, Architecture::Lowpass)
    }

    /// Replace the H∞ target. `None` places every pole at the origin.
    ///
    /// # Errors
    /// - [`NtfError::InvalidSpecification`] if the gain is non-finite or ≤ 1.
    pub fn with_out_of_band_gain(mut self, h_inf: Option<f64>) -> NtfResult<Self> {
        if let Some(h) = h_inf {
            if !h.is_finite() || h <= 1.0 {
                return Err(NtfError::InvalidSpecification {
                    field: "out_of_band_gain",
                    value: h.to_string(),
                    reason: "Out-of-band gain must be finite and greater than 1.",
                });
            }
        }
        self.out_of_band_gain = h_inf;
        Ok(self)
    }

    pub fn with_zero_placement(mut self, placement: ZeroPlacement) -> Self {
        self.zero_placement = placement;
        self
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn osr(&self) -> f64 {
        self.osr
    }

    pub fn architecture(&self) -> Architecture {
        self.architecture
    }

    pub fn out_of_band_gain(&self) -> Option<f64> {
        self.out_of_band_gain
    }

    pub fn zero_placement(&self) -> ZeroPlacement {
        self.zero_placement
    }
}

/// Third-order lowpass at OSR 64 with H∞ = 1.5.
impl Default for ModulatorSpec {
    fn default() -> Self {
        Self {
            order: 3,
            osr: 64.0,
            architecture: Architecture::Lowpass,
            out_of_band_gain: Some(DEFAULT_OUT_OF_BAND_GAIN),
            zero_placement: ZeroPlacement::Dc,
        }
    }
}
