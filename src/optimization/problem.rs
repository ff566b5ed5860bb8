//! Adapter that exposes NTF synthesis as an `argmin` problem.
//!
//! θ → candidate transfer function → stability gate → in-band noise power.
//! Candidates the gate rejects are scored `+∞` so the search never prefers
//! them; a NaN cost is passed through unchanged and treated by the solver as
//! a degenerate evaluation.
use argmin::core::{CostFunction, Error};

use crate::{
    ntf::{
        candidate::{Candidate, CandidateBuilder},
        objective::{SignalBand, noise_power},
        stability::{StabilityPolicy, enforce},
    },
    optimization::types::{Cost, Theta},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NtfProblem {
    builder: CandidateBuilder,
    band: SignalBand,
    policy: StabilityPolicy,
}

impl NtfProblem {
    pub fn new(builder: CandidateBuilder, band: SignalBand, policy: StabilityPolicy) -> Self {
        Self { builder, band, policy }
    }

    pub fn builder(&self) -> &CandidateBuilder {
        &self.builder
    }

    pub fn band(&self) -> &SignalBand {
        &self.band
    }

    /// Build, gate and score the candidate for `theta`.
    ///
    /// Under [`StabilityPolicy::Repair`] an unstable candidate is repaired
    /// and scored if the repair passes the gate; otherwise (and always under
    /// `Reject`) it is scored `+∞` with `stable == false`.
    pub fn evaluate(&self, theta: &Theta) -> Candidate {
        let (tf, _) = self.builder.build(theta);
        let (transfer_function, stable) = enforce(tf, self.policy);
        let cost = if stable { noise_power(&transfer_function, &self.band) } else { f64::INFINITY };
        Candidate { transfer_function, cost, stable }
    }
}

impl CostFunction for NtfProblem {
    type Param = Theta;
    type Output = Cost;

    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        Ok(self.evaluate(theta).cost)
    }
}
