//! Fuzzy Diabetes-Risk Estimation
//!
//! A Mamdani fuzzy inference engine and the risk model built on it:
//! - Triangular, trapezoidal and Gaussian membership functions
//! - Linguistic variables over sampled domains
//! - Conjunctive (min) rules, max aggregation, centroid defuzzification
//! - Glucose × BMI knowledge base, YAML-loadable
//! - HTTP service

pub mod config;
pub mod fuzzy;
pub mod risk;
pub mod services;
pub mod utils;

// Re-exports for convenience
pub use fuzzy::{FuzzyError, FuzzySystem, InferenceEngine};
pub use risk::{Assessment, Measurements, RiskAssessor};
