//! Fuzzy Inference Module
//!
//! Mamdani-style inference: membership functions, linguistic variables,
//! conjunctive rules, max aggregation and centroid defuzzification.

pub mod domain;
pub mod engine;
pub mod error;
pub mod membership;
pub mod rule;
pub mod system;
pub mod variable;

pub use domain::{Domain, DomainSpec};
pub use engine::{centroid, Fuzzified, Inference, InferenceEngine, RuleActivation};
pub use error::FuzzyError;
pub use membership::{MembershipFunction, Shape, DEGENERATE_SPAN};
pub use rule::{Proposition, Rule, RuleBuilder};
pub use system::FuzzySystem;
pub use variable::{LinguisticVariable, Term};
