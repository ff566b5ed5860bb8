//! `synthesize_ntf` — the single entry point of NTF synthesis.
//!
//! Purpose
//! -------
//! Turn a validated [`ModulatorSpec`] and a per-call
//! [`OptimizationConfig`] into a stable transfer function plus convergence
//! diagnostics.
//!
//! Key behaviors
//! -------------
//! - Optimization disabled: returns the raw candidate of
//!   [`generate_candidate`] with `iterations_used = 0`.
//! - Optimization enabled: runs the compass search over the zero offsets,
//!   rebuilds the best candidate and gates it.
//! - Running out of iterations is reported through
//!   [`ConvergenceResult::limit_exhausted`], never as an error.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every returned transfer function passes
//!   [`is_stable`](crate::ntf::stability::is_stable) and has exactly
//!   `spec.order()` poles.
//! - `iterations_used <= config.iteration_limit`.
//! - The call owns all of its working state; concurrent calls never share
//!   mutable data.
use crate::{
    ntf::{
        candidate::{CandidateBuilder, generate_candidate, log_pole_solve},
        errors::{NtfError, NtfResult},
        objective::{SignalBand, noise_power},
        spec::ModulatorSpec,
        stability::{StabilityPolicy, enforce},
        transfer_function::TransferFunction,
    },
    optimization::{config::OptimizationConfig, problem::NtfProblem, run::run_search},
};

/// Outcome of [`synthesize_ntf`].
///
/// - `transfer_function`: the synthesized NTF (stable, `order` poles).
/// - `iterations_used`: optimizer iterations spent (`0` when disabled).
/// - `limit_exhausted`: budget ran out before the convergence tolerance was
///   met; the best candidate found is still returned.
/// - `noise_power`: in-band noise power of `transfer_function`.
/// - `cancelled`: the configuration's cancellation token stopped the run.
/// - `status`: human-readable termination status.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvergenceResult {
    pub transfer_function: TransferFunction,
    pub iterations_used: usize,
    pub limit_exhausted: bool,
    pub noise_power: f64,
    pub cancelled: bool,
    pub status: String,
}

/// Synthesize the NTF for `spec` under `config`.
///
/// # Errors
/// - [`NtfError::NumericDegeneracy`] if the starting candidate has a
///   non-finite cost or an iteration produces only NaN costs.
/// - [`NtfError::StabilityViolation`] if the candidate about to be returned
///   fails the stability gate (internal invariant failure).
/// - [`NtfError::OptimizationFailed`] for any other optimizer failure.
///
/// # Examples
/// ```
/// use deltasigma_ntf::ntf::{spec::ModulatorSpec, synthesize::synthesize_ntf};
/// use deltasigma_ntf::optimization::config::OptimizationConfig;
///
/// let spec = ModulatorSpec::lowpass(3, 64.0)?;
/// let result = synthesize_ntf(&spec, &OptimizationConfig::default())?;
/// assert_eq!(result.transfer_function.poles().len(), 3);
/// assert!(result.transfer_function.max_pole_modulus() < 1.0);
/// # Ok::<(), deltasigma_ntf::ntf::errors::NtfError>(())
/// ```
pub fn synthesize_ntf(
    spec: &ModulatorSpec, config: &OptimizationConfig,
) -> NtfResult<ConvergenceResult> {
    let band = SignalBand::from_spec(spec);

    if !config.enable_optimization {
        let tf = gate(generate_candidate(spec), config.stability_policy)?;
        let noise_power = noise_power(&tf, &band);
        tracing::info!(
            order = spec.order(),
            osr = spec.osr(),
            noise_power,
            "ntf synthesized without optimization"
        );
        return Ok(ConvergenceResult {
            transfer_function: tf,
            iterations_used: 0,
            limit_exhausted: false,
            noise_power,
            cancelled: false,
            status: "Optimization disabled".to_string(),
        });
    }

    let builder = CandidateBuilder::new(spec);
    let problem = NtfProblem::new(builder, band, config.stability_policy);
    let theta0 = builder.initial_theta();
    let initial = problem.evaluate(&theta0);
    if !initial.cost.is_finite() {
        return Err(NtfError::NumericDegeneracy {
            iteration: 0,
            reason: "Noise power of the starting candidate is not finite.",
        });
    }
    tracing::debug!(
        order = spec.order(),
        osr = spec.osr(),
        free_parameters = theta0.len(),
        initial_cost = initial.cost,
        iteration_limit = config.iteration_limit,
        "starting ntf zero search"
    );

    let outcome = run_search(problem, theta0, config)?;

    let (tf, placement) = builder.build(&outcome.theta_hat);
    log_pole_solve(spec, &placement);
    let tf = gate(tf, config.stability_policy)?;
    let noise_power = noise_power(&tf, &band);

    if outcome.limit_exhausted {
        tracing::warn!(
            iterations = outcome.iterations,
            noise_power,
            "ntf search hit its iteration limit before converging"
        );
    }
    tracing::info!(
        order = spec.order(),
        osr = spec.osr(),
        iterations = outcome.iterations,
        noise_power,
        status = %outcome.status,
        "ntf synthesized"
    );

    Ok(ConvergenceResult {
        transfer_function: tf,
        iterations_used: outcome.iterations,
        limit_exhausted: outcome.limit_exhausted,
        noise_power,
        cancelled: outcome.cancelled,
        status: outcome.status,
    })
}

/// Last check before a transfer function leaves the crate.
fn gate(tf: TransferFunction, policy: StabilityPolicy) -> NtfResult<TransferFunction> {
    let (tf, stable) = enforce(tf, policy);
    if !stable {
        return Err(NtfError::StabilityViolation { max_modulus: tf.max_pole_modulus() });
    }
    Ok(tf)
}
