//! Per-call optimizer configuration.
//!
//! - [`OptimizationConfig`]: enable flag, iteration budget, debug switch,
//!   tolerances, stability policy, optional observer and cancellation token.
//! - [`Tolerances`]: convergence thresholds and the initial compass step.
//!
//! Configuration is a plain value passed into every synthesis call; there is
//! no process-wide state, so concurrent calls with different settings never
//! interfere.
use std::sync::Arc;

use crate::{
    ntf::stability::StabilityPolicy,
    optimization::{
        cancel::CancelToken,
        errors::OptResult,
        observer::IterationObserver,
        validation::{verify_initial_step, verify_tol_cost, verify_tol_step},
    },
};

/// Default optimizer iteration budget.
pub const DEFAULT_ITERATION_LIMIT: usize = 500;

/// Times a trial step is halved and retried after a rejected or NaN trial.
pub const MAX_SHRINK_ATTEMPTS: usize = 8;

/// Numerical thresholds for the compass search.
///
/// - `tol_cost`: stop when an improving iteration lowers the cost by less
///   than this fraction of the previous cost.
/// - `tol_step`: stop when the compass step shrinks below this value.
/// - `initial_step`: first compass step, in normalized offset units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_cost: f64,
    pub tol_step: f64,
    pub initial_step: f64,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Errors
    /// - [`OptError::InvalidTolCost`](crate::optimization::errors::OptError::InvalidTolCost),
    ///   `InvalidTolStep` or `InvalidInitialStep` for non-finite or
    ///   non-positive values.
    pub fn new(tol_cost: f64, tol_step: f64, initial_step: f64) -> OptResult<Self> {
        let tols = Self { tol_cost, tol_step, initial_step };
        tols.validate()?;
        Ok(tols)
    }

    /// Re-check values that may have been set through the public fields.
    ///
    /// # Errors
    /// Same as [`Tolerances::new`].
    pub fn validate(&self) -> OptResult<()> {
        verify_tol_cost(self.tol_cost)?;
        verify_tol_step(self.tol_step)?;
        verify_initial_step(self.initial_step)
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self { tol_cost: 1e-9, tol_step: 1e-6, initial_step: 0.1 }
    }
}

/// Optimizer-level configuration for one synthesis call.
///
/// Fields:
/// - `enable_optimization`: when `false`, synthesis returns the raw
///   candidate with zero iterations.
/// - `iteration_limit`: hard cap on optimizer iterations (`0` allowed).
/// - `debug`: emit a `tracing` event per iteration and feed `observer`;
///   with the `obs_slog` feature also attaches argmin's terminal logger.
/// - `tols`: see [`Tolerances`].
/// - `stability_policy`: how trials failing the stability gate are treated.
/// - `observer`: optional per-iteration side channel (debug only).
/// - `cancel`: optional cooperative cancellation token.
///
/// Default:
/// - `enable_optimization`: `true`
/// - `iteration_limit`: `500`
/// - `debug`: `false`
/// - `tols`: `tol_cost = 1e-9`, `tol_step = 1e-6`, `initial_step = 0.1`
/// - `stability_policy`: `Repair`
#[derive(Clone)]
pub struct OptimizationConfig {
    pub enable_optimization: bool,
    pub iteration_limit: usize,
    pub debug: bool,
    pub tols: Tolerances,
    pub stability_policy: StabilityPolicy,
    pub observer: Option<Arc<dyn IterationObserver>>,
    pub cancel: Option<CancelToken>,
}

impl OptimizationConfig {
    pub fn new(enable_optimization: bool, iteration_limit: usize, debug: bool) -> Self {
        Self { enable_optimization, iteration_limit, debug, ..Self::default() }
    }

    pub fn with_tolerances(mut self, tols: Tolerances) -> Self {
        self.tols = tols;
        self
    }

    pub fn with_stability_policy(mut self, policy: StabilityPolicy) -> Self {
        self.stability_policy = policy;
        self
    }

    /// Attach an iteration observer. Only consulted when `debug` is set.
    pub fn with_observer(mut self, observer: Arc<dyn IterationObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

impl Default for OptimizationConfig {
    fn default() -> Self {
        Self {
            enable_optimization: true,
            iteration_limit: DEFAULT_ITERATION_LIMIT,
            debug: false,
            tols: Tolerances::default(),
            stability_policy: StabilityPolicy::default(),
            observer: None,
            cancel: None,
        }
    }
}

impl std::fmt::Debug for OptimizationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptimizationConfig")
            .field("enable_optimization", &self.enable_optimization)
            .field("iteration_limit", &self.iteration_limit)
            .field("debug", &self.debug)
            .field("tols", &self.tols)
            .field("stability_policy", &self.stability_policy)
            .field("observer", &self.observer.as_ref().map(|_| "<observer>"))
            .field("cancel", &self.cancel)
            .finish()
    }
}
