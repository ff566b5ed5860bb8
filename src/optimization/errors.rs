use argmin::core::{ArgminError, Error};

/// Crate-wide result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Tolerances ----
    /// Relative cost improvement tolerance needs to be positive and finite.
    InvalidTolCost {
        tol: f64,
        reason: &'static str,
    },
    /// Step tolerance needs to be positive and finite.
    InvalidTolStep {
        tol: f64,
        reason: &'static str,
    },
    /// Initial step needs to be positive and finite.
    InvalidInitialStep {
        step: f64,
        reason: &'static str,
    },

    /// Invalid stability policy name.
    InvalidStabilityPolicy {
        name: String,
        reason: &'static str,
    },

    // ---- Cost function ----
    /// Every trial of an iteration produced a NaN cost.
    NumericDegeneracy {
        iteration: usize,
        reason: &'static str,
    },
    /// Cost of the starting point is not finite.
    NonFiniteCost {
        value: f64,
    },

    // ---- Optimizer outcome ----
    /// Best parameters must be finite.
    InvalidThetaHat {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    /// Theta hat is missing
    MissingThetaHat,

    /// Starting parameters were not handed to the executor.
    MissingParam,

    // ---- Argmin ---
    /// Wrapper for argmin::InvalidParameter
    InvalidParameter {
        text: String,
    },
    /// Wrapper for argmin::NotImplemented
    NotImplemented {
        text: String,
    },
    /// Wrapper for argmin::NotInitialized
    NotInitialized {
        text: String,
    },
    /// Wrapper for argmin::ConditionViolated
    ConditionViolated {
        text: String,
    },
    /// Wrapper for argmin::CheckPointNotFound
    CheckPointNotFound {
        text: String,
    },
    /// Wrapper for argmin::PotentialBug
    PotentialBug {
        text: String,
    },
    /// Wrapper for argmin::ImpossibleError
    ImpossibleError {
        text: String,
    },
    /// Wrapper for other argmin::Error types
    BackendError {
        text: String,
    },

    // ---- Fallback ----
    UnknownError,
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Tolerances ----
            OptError::InvalidTolCost { tol, reason } => {
                write!(f, "Invalid cost improvement tolerance {tol}: {reason}")
            }
            OptError::InvalidTolStep { tol, reason } => {
                write!(f, "Invalid step tolerance {tol}: {reason}")
            }
            OptError::InvalidInitialStep { step, reason } => {
                write!(f, "Invalid initial step {step}: {reason}")
            }
            OptError::InvalidStabilityPolicy { name, reason } => {
                write!(f, "Invalid stability policy '{name}': {reason}")
            }

            // ---- Cost function ----
            OptError::NumericDegeneracy { iteration, reason } => {
                write!(f, "Numeric degeneracy at iteration {iteration}: {reason}")
            }
            OptError::NonFiniteCost { value } => {
                write!(f, "Non-finite cost value: {value}")
            }

            // ---- Optimizer outcome ----
            OptError::InvalidThetaHat { index, value, reason } => {
                write!(f, "Invalid estimated parameter at index {index}: {value}: {reason}")
            }
            OptError::MissingThetaHat => {
                write!(f, "Missing best parameters (theta hat)")
            }
            OptError::MissingParam => {
                write!(f, "Missing starting parameters")
            }

            // ---- Argmin ----
            OptError::InvalidParameter { text } => {
                write!(f, "Invalid parameter: {text}")
            }
            OptError::NotImplemented { text } => {
                write!(f, "Not implemented: {text}")
            }
            OptError::NotInitialized { text } => {
                write!(f, "Not initialized: {text}")
            }
            OptError::ConditionViolated { text } => {
                write!(f, "Condition violated: {text}")
            }
            OptError::CheckPointNotFound { text } => {
                write!(f, "Checkpoint not found: {text}")
            }
            OptError::PotentialBug { text } => {
                write!(f, "Potential bug: {text}")
            }
            OptError::ImpossibleError { text } => {
                write!(f, "Impossible error: {text}")
            }
            OptError::BackendError { text } => {
                write!(f, "Backend error: {text}")
            }

            // ---- Fallback ----
            OptError::UnknownError => {
                write!(f, "Unknown error")
            }
        }
    }
}

/// Errors raised inside the solver travel through argmin as
/// `argmin::core::Error`; recover our own variant first, then argmin's.
impl From<Error> for OptError {
    fn from(original_err: Error) -> Self {
        let original_err = match original_err.downcast::<OptError>() {
            Ok(opt_err) => return opt_err,
            Err(err) => err,
        };
        match original_err.downcast() {
            Ok(argmin_err) => match argmin_err {
                ArgminError::InvalidParameter { text } => OptError::InvalidParameter { text },
                ArgminError::NotImplemented { text } => OptError::NotImplemented { text },
                ArgminError::NotInitialized { text } => OptError::NotInitialized { text },
                ArgminError::ConditionViolated { text } => OptError::ConditionViolated { text },
                ArgminError::CheckpointNotFound { text } => OptError::CheckPointNotFound { text },
                ArgminError::PotentialBug { text } => OptError::PotentialBug { text },
                ArgminError::ImpossibleError { text } => OptError::ImpossibleError { text },
                _ => OptError::UnknownError,
            },
            Err(err) => OptError::BackendError { text: err.to_string() },
        }
    }
}
