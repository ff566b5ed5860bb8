//! Execution helper that runs the compass search on an [`NtfProblem`] and
//! returns a crate-friendly [`SearchOutcome`].
use argmin::core::{
    Executor, State, TerminationReason, TerminationStatus, observers::ObserverMode,
};

use crate::optimization::{
    config::OptimizationConfig,
    errors::OptResult,
    observer::SearchObserver,
    problem::NtfProblem,
    solver::CompassSearch,
    types::{CANCELLED_STATUS, Cost, FnEvalMap, Theta},
    validation::{validate_theta_hat, validate_value},
};

/// Normalized result of one search.
///
/// - `theta_hat`: best zero offsets found.
/// - `cost`: noise power at `theta_hat`.
/// - `iterations`: solver iterations performed (`<= iteration_limit`).
/// - `converged`: the solver's own stopping rule fired.
/// - `limit_exhausted`: the iteration budget ran out first.
/// - `cancelled`: the cancellation token stopped the run.
/// - `status`: human-readable termination status.
/// - `fn_evals`: function-evaluation counters reported by `argmin`.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub theta_hat: Theta,
    pub cost: Cost,
    pub iterations: usize,
    pub converged: bool,
    pub limit_exhausted: bool,
    pub cancelled: bool,
    pub status: String,
    pub fn_evals: FnEvalMap,
}

impl SearchOutcome {
    /// Build a validated [`SearchOutcome`] from raw solver state.
    ///
    /// # Errors
    /// - Propagates validation errors for `theta_hat` (missing or
    ///   non-finite) and `cost` (non-finite).
    pub fn new(
        theta_hat_opt: Option<Theta>, cost: Cost, termination: &TerminationStatus,
        iterations: u64, fn_evals: FnEvalMap,
    ) -> OptResult<Self> {
        let theta_hat = validate_theta_hat(theta_hat_opt)?;
        validate_value(cost)?;
        let (converged, limit_exhausted, cancelled) = match termination {
            TerminationStatus::Terminated(TerminationReason::SolverConverged) => {
                (true, false, false)
            }
            TerminationStatus::Terminated(TerminationReason::MaxItersReached) => {
                (false, true, false)
            }
            TerminationStatus::Terminated(TerminationReason::SolverExit(reason))
                if reason == CANCELLED_STATUS =>
            {
                (false, false, true)
            }
            _ => (false, false, false),
        };
        let status = match termination {
            TerminationStatus::NotTerminated => "Not terminated".to_string(),
            TerminationStatus::Terminated(reason) => reason.text().to_string(),
        };
        Ok(Self {
            theta_hat,
            cost,
            iterations: iterations as usize,
            converged,
            limit_exhausted,
            cancelled,
            status,
            fn_evals,
        })
    }
}

/// Run the compass search for `problem` from `theta0`.
///
/// Wires up:
/// - a [`CompassSearch`] over the problem's zero-layout bounds with the
///   configured tolerances and cancellation token,
/// - `max_iters(config.iteration_limit)` on the executor,
/// - with `config.debug`, a [`SearchObserver`] (tracing + user observer)
///   and, behind the `obs_slog` feature, argmin's terminal slog observer.
///
/// A layout without free parameters skips the executor and reports
/// convergence after zero iterations.
///
/// # Errors
/// - `InvalidTolCost` / `InvalidTolStep` / `InvalidInitialStep` when
///   `config.tols` was built from literal fields that fail validation.
/// - Propagates solver errors (`NonFiniteCost` at the start,
///   `NumericDegeneracy` during the run) via `From<argmin::core::Error>`.
/// - Propagates validation errors from [`SearchOutcome::new`].
pub fn run_search(
    problem: NtfProblem, theta0: Theta, config: &OptimizationConfig,
) -> OptResult<SearchOutcome> {
    config.tols.validate()?;
    if config.debug {
        let observer = SearchObserver::new(problem, config.observer.clone());
        observer.emit(0, &theta0, problem.evaluate(&theta0).cost);
    }
    if theta0.is_empty() {
        let cost = problem.evaluate(&theta0).cost;
        return SearchOutcome::new(
            Some(theta0),
            cost,
            &TerminationStatus::Terminated(TerminationReason::SolverConverged),
            0,
            FnEvalMap::new(),
        );
    }

    let (lower, upper) = problem.builder().layout().bounds();
    let solver = CompassSearch::new(lower, upper, &config.tols, config.cancel.clone());
    let max_iters = config.iteration_limit as u64;
    let mut executor = Executor::new(problem, solver)
        .configure(|state| state.param(theta0).max_iters(max_iters));
    if config.debug {
        let observer = SearchObserver::new(problem, config.observer.clone());
        executor = executor.add_observer(observer, ObserverMode::Always);
        #[cfg(feature = "obs_slog")]
        {
            let slog = argmin_observer_slog::SlogLogger::term_noblock();
            executor = executor.add_observer(slog, ObserverMode::Always);
        }
    }

    let result = executor.run()?;
    let state = result.state();
    SearchOutcome::new(
        state.get_param().cloned(),
        state.get_cost(),
        state.get_termination_status(),
        state.get_iter(),
        state.get_func_counts().clone(),
    )
}
