//! deltasigma_ntf — noise transfer function synthesis for delta-sigma
//! modulators, with optional Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes NTF synthesis to Python via the `_deltasigma_ntf` extension
//! module. Given a modulator order, oversampling ratio and architecture, the
//! core computes a stable NTF (zeros, poles, gain) that pushes quantization
//! noise out of the signal band.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`polynomial`, `ntf`, `optimization`)
//!   as the public crate surface.
//! - When `python-bindings` is enabled, define the `synthesize_ntf`
//!   `#[pyfunction]`, the `NtfSynthesis` result class and the
//!   `#[pymodule]` initializer.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work is implemented in the inner Rust modules; this file
//!   performs only FFI glue, argument mapping and error conversion.
//! - Synthesis is a pure function of its arguments: the optimize flag,
//!   iteration limit and debug switch are explicit parameters, never
//!   process-wide state.
//!
//! Conventions
//! -----------
//! - Python-side `f0 == 0` selects a lowpass design; any other value selects
//!   a bandpass design centered at `f0` cycles/sample.
//! - Errors from core Rust code are propagated as rich error types
//!   internally and converted to `PyErr` (`ValueError`) at the PyO3 boundary.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code calls [`ntf::synthesize_ntf`] with a
//!   [`ntf::ModulatorSpec`] and an [`optimization::OptimizationConfig`].
//! - Simulation, scaling and realization code consumes
//!   `ConvergenceResult::transfer_function` as an immutable value.
//!
//! Testing notes
//! -------------
//! - Core numerical behavior is covered by unit tests in the inner modules,
//!   by `tests/integration_ntf_pipeline.rs` and by the property tests in
//!   `tests/property_invariants.rs`.

pub mod ntf;
pub mod optimization;
pub mod polynomial;

#[cfg(feature = "python-bindings")]
use num_complex::Complex64;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray1};

#[cfg(feature = "python-bindings")]
use pyo3::prelude::*;

#[cfg(feature = "python-bindings")]
use crate::{
    ntf::{Architecture, ConvergenceResult, ModulatorSpec, ZeroPlacement},
    optimization::OptimizationConfig,
};

/// NtfSynthesis — Python-facing result of `synthesize_ntf`.
///
/// Fields
/// ------
/// - `inner`: [`ConvergenceResult`]
///   Rust-side result; all getters read from it.
///
/// Notes
/// -----
/// - Zeros and poles are returned as fresh `complex128` NumPy arrays on
///   every access, so Python code cannot mutate the stored NTF.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "deltasigma_ntf", frozen)]
pub struct NtfSynthesis {
    inner: ConvergenceResult,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl NtfSynthesis {
    #[getter]
    pub fn zeros<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<Complex64>> {
        self.inner.transfer_function.zeros().to_vec().into_pyarray(py)
    }

    #[getter]
    pub fn poles<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<Complex64>> {
        self.inner.transfer_function.poles().to_vec().into_pyarray(py)
    }

    #[getter]
    pub fn gain(&self) -> f64 {
        self.inner.transfer_function.gain()
    }

    #[getter]
    pub fn iterations_used(&self) -> usize {
        self.inner.iterations_used
    }

    #[getter]
    pub fn limit_exhausted(&self) -> bool {
        self.inner.limit_exhausted
    }

    #[getter]
    pub fn noise_power(&self) -> f64 {
        self.inner.noise_power
    }

    #[getter]
    pub fn status(&self) -> String {
        self.inner.status.clone()
    }
}

/// Synthesize a delta-sigma NTF.
///
/// Parameters
/// ----------
/// - `order`: modulator order (≥ 1).
/// - `osr`: oversampling ratio (> 1).
/// - `opt`: `0` puts every zero at DC / band center; any other value uses
///   the optimal (Legendre) spread.
/// - `h_inf`: out-of-band gain target; `None` puts every pole at the origin.
/// - `f0`: bandpass center in cycles/sample; `0.0` means lowpass.
/// - `optimize`, `itn_limit`, `debug`: per-call optimizer switches.
///
/// Errors
/// ------
/// - `ValueError` for invalid specifications and numeric degeneracy.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    signature = (
        order = 3,
        osr = 64.0,
        opt = 0,
        h_inf = Some(1.5),
        f0 = 0.0,
        optimize = true,
        itn_limit = 500,
        debug = false,
    ),
    text_signature = "(order=3, osr=64.0, opt=0, h_inf=1.5, f0=0.0, optimize=True, \
                      itn_limit=500, debug=False)"
)]
#[allow(clippy::too_many_arguments)]
pub fn synthesize_ntf(
    py: Python<'_>, order: usize, osr: f64, opt: u8, h_inf: Option<f64>, f0: f64,
    optimize: bool, itn_limit: usize, debug: bool,
) -> PyResult<NtfSynthesis> {
    let architecture =
        if f0 == 0.0 { Architecture::Lowpass } else { Architecture::bandpass(f0) };
    let spec = ModulatorSpec::new(order, osr, architecture)?
        .with_out_of_band_gain(h_inf)?
        .with_zero_placement(ZeroPlacement::from_opt_code(opt));
    let config = OptimizationConfig::new(optimize, itn_limit, debug);
    let inner = py.allow_threads(|| ntf::synthesize_ntf(&spec, &config))?;
    Ok(NtfSynthesis { inner })
}

/// Define the `_deltasigma_ntf` Python module.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _deltasigma_ntf<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(synthesize_ntf, m)?)?;
    m.add_class::<NtfSynthesis>()?;
    Ok(())
}
