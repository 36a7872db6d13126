//! Inference Errors
//!
//! Configuration faults are detected while a `FuzzySystem` is frozen into an
//! `InferenceEngine`; lookup faults are detected per `simulate` call. Neither
//! is retried: a call either fully succeeds or fully fails.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FuzzyError {
    /// Membership breakpoints out of order, non-finite, or a Gaussian
    /// with an amplitude outside `[0, 1]` or a non-positive width.
    #[error("Invalid {shape} shape: {reason}")]
    InvalidShape { shape: &'static str, reason: String },

    #[error("Invalid domain: {0}")]
    InvalidDomain(String),

    #[error("Rule #{rule} has an empty antecedent")]
    EmptyAntecedent { rule: usize },

    /// A rule built directly with no conditions, before it has a position.
    #[error("Rule has an empty antecedent")]
    EmptyRule,

    #[error("No output domain configured")]
    MissingOutputDomain,

    /// A rule consequent targets a variable sampled over a different range
    /// than the engine's single output domain.
    #[error("Rule #{rule} concludes on '{variable}', whose domain differs from the output domain")]
    ForeignOutputDomain { rule: usize, variable: String },

    #[error("Unknown variable '{0}'")]
    UnknownVariable(String),

    #[error("Unknown term '{term}' for variable '{variable}'")]
    UnknownTerm { variable: String, term: String },

    /// A rule antecedent references a variable that was not supplied as an
    /// input, so it was never fuzzified.
    #[error("No input supplied for antecedent variable '{0}'")]
    MissingInput(String),

    /// A rule activation pointing past the engine's rule list.
    #[error("No rule #{0} in this engine")]
    UnknownRule(usize),

    /// A rule activation whose consequent is not the one rule #`rule` concludes on.
    #[error("Rule #{rule} concludes on '{expected}', not '{found}'")]
    ConsequentMismatch { rule: usize, expected: String, found: String },

    #[error("Input '{variable}' is not a finite number ({value})")]
    NonFiniteInput { variable: String, value: f64 },
}

impl FuzzyError {
    /// True for faults in the knowledge base itself, as opposed to faults in
    /// the crisp inputs of a single call.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            FuzzyError::InvalidShape { .. }
                | FuzzyError::InvalidDomain(_)
                | FuzzyError::EmptyAntecedent { .. }
                | FuzzyError::EmptyRule
                | FuzzyError::MissingOutputDomain
                | FuzzyError::ForeignOutputDomain { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, FuzzyError>;
