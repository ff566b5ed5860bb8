//! Compass search — a bounded, derivative-free coordinate pattern search
//! implemented as an `argmin` [`Solver`].
//!
//! Purpose
//! -------
//! Minimize the noise-power cost over the normalized zero offsets θ inside
//! their box bounds, using only cost evaluations.
//!
//! Key behaviors
//! -------------
//! - Each iteration walks the coordinates in order and tries `+step` then
//!   `−step` (clamped to the bounds), moving to the first improving point
//!   along each coordinate.
//! - A trial with a NaN or `+∞` cost (degenerate, or rejected by the
//!   stability gate) has its own step halved and is retried, up to
//!   [`MAX_SHRINK_ATTEMPTS`] times.
//! - An iteration without any improvement halves the global step.
//! - An iteration in which every evaluated trial was non-finite, at least
//!   one of them NaN, fails with [`OptError::NumericDegeneracy`]. Trials
//!   that are all `+∞` are gate rejections and only shrink the step.
//! - Each iteration reports the current step and the L2 norm of the move
//!   in its `KV` record, so argmin observers can log them.
//!
//! Termination (checked by argmin before every iteration)
//! -----------------------------------------------------
//! 1. Cancellation token set → `SolverExit("cancelled")`.
//! 2. `step < tol_step` → `SolverConverged`.
//! 3. Last iteration improved by less than `tol_cost` (relative) →
//!    `SolverConverged`.
//!
//! The iteration budget itself is enforced by the executor
//! (`max_iters`), which reports `MaxItersReached`.
//!
//! Invariants & assumptions
//! ------------------------
//! - The state cost is always the best cost seen, so the sequence of costs
//!   across iterations is non-increasing and the current parameter is also
//!   the best parameter.
//! - The starting cost must be finite; otherwise `init` fails with
//!   [`OptError::NonFiniteCost`].
use argmin::{
    core::{CostFunction, Error, KV, Problem, Solver, State, TerminationReason, TerminationStatus},
    kv,
};
use argmin_math::ArgminL2Norm;

use crate::optimization::{
    cancel::CancelToken,
    config::{MAX_SHRINK_ATTEMPTS, Tolerances},
    errors::OptError,
    types::{CANCELLED_STATUS, Cost, SearchState, Theta},
};

#[derive(Debug, Clone)]
pub struct CompassSearch {
    lower: Theta,
    upper: Theta,
    step: f64,
    tol_step: f64,
    tol_cost: f64,
    last_relative_improvement: Option<f64>,
    last_displacement: f64,
    cancel: Option<CancelToken>,
}

impl CompassSearch {
    /// Build a search over the box `[lower, upper]`.
    ///
    /// `lower` and `upper` must have the parameter dimension and satisfy
    /// `lower <= upper` elementwise.
    pub fn new(lower: Theta, upper: Theta, tols: &Tolerances, cancel: Option<CancelToken>) -> Self {
        Self {
            lower,
            upper,
            step: tols.initial_step,
            tol_step: tols.tol_step,
            tol_cost: tols.tol_cost,
            last_relative_improvement: None,
            last_displacement: 0.0,
            cancel,
        }
    }

    /// Current compass step.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// L2 norm of the move made by the last iteration (`0` if it stalled).
    pub fn last_displacement(&self) -> f64 {
        self.last_displacement
    }

    fn clamp(&self, index: usize, value: f64) -> f64 {
        value.clamp(self.lower[index], self.upper[index])
    }
}

impl<O> Solver<O, SearchState> for CompassSearch
where
    O: CostFunction<Param = Theta, Output = Cost>,
{
    const NAME: &'static str = "Compass search";

    fn init(
        &mut self, problem: &mut Problem<O>, state: SearchState,
    ) -> Result<(SearchState, Option<KV>), Error> {
        let theta0 = state.get_param().ok_or(OptError::MissingParam)?;
        let theta: Theta =
            theta0.iter().enumerate().map(|(i, &value)| self.clamp(i, value)).collect();
        let cost = problem.cost(&theta)?;
        if !cost.is_finite() {
            return Err(OptError::NonFiniteCost { value: cost }.into());
        }
        Ok((state.param(theta).cost(cost), None))
    }

    fn next_iter(
        &mut self, problem: &mut Problem<O>, mut state: SearchState,
    ) -> Result<(SearchState, Option<KV>), Error> {
        let iteration = state.get_iter() as usize + 1;
        let mut theta = state.take_param().ok_or(OptError::MissingParam)?;
        let start_theta = theta.clone();
        let start_cost = state.get_cost();
        let mut cost = start_cost;
        let mut evaluated = 0usize;
        let mut nan_trials = 0usize;
        let mut nonfinite_trials = 0usize;

        for i in 0..theta.len() {
            'directions: for direction in [1.0, -1.0] {
                let mut trial_step = self.step;
                for _ in 0..=MAX_SHRINK_ATTEMPTS {
                    let value = self.clamp(i, theta[i] + direction * trial_step);
                    if value == theta[i] {
                        break;
                    }
                    let mut trial = theta.clone();
                    trial[i] = value;
                    let trial_cost = problem.cost(&trial)?;
                    evaluated += 1;
                    if !trial_cost.is_finite() {
                        nonfinite_trials += 1;
                        if trial_cost.is_nan() {
                            nan_trials += 1;
                        }
                        trial_step *= 0.5;
                        continue;
                    }
                    if trial_cost < cost {
                        theta = trial;
                        cost = trial_cost;
                        break 'directions;
                    }
                    break;
                }
            }
        }

        if nan_trials > 0 && nonfinite_trials == evaluated {
            return Err(OptError::NumericDegeneracy {
                iteration,
                reason: "Every trial point of the iteration produced a NaN or infinite cost.",
            }
            .into());
        }

        if cost < start_cost {
            self.last_relative_improvement =
                Some((start_cost - cost) / start_cost.abs().max(f64::MIN_POSITIVE));
        } else {
            self.last_relative_improvement = None;
            self.step *= 0.5;
        }
        self.last_displacement = (&theta - &start_theta).l2_norm();
        let kv = kv!("step" => self.step; "displacement" => self.last_displacement;);
        Ok((state.param(theta).cost(cost), Some(kv)))
    }

    fn terminate(&mut self, _state: &SearchState) -> TerminationStatus {
        if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            return TerminationStatus::Terminated(TerminationReason::SolverExit(
                CANCELLED_STATUS.to_string(),
            ));
        }
        if self.step < self.tol_step {
            return TerminationStatus::Terminated(TerminationReason::SolverConverged);
        }
        match self.last_relative_improvement {
            Some(rel) if rel < self.tol_cost => {
                TerminationStatus::Terminated(TerminationReason::SolverConverged)
            }
            _ => TerminationStatus::NotTerminated,
        }
    }
}
