//! Risk Module
//!
//! Diabetes-risk estimation on top of the fuzzy inference engine:
//! BMI from weight and height, then glucose and BMI through the knowledge base.

pub mod bmi;
pub mod model;

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::fuzzy::{FuzzyError, FuzzySystem, InferenceEngine, RuleActivation};

pub use bmi::body_mass_index;
pub use model::diabetes_system;

#[derive(Debug, Error)]
pub enum RiskError {
    #[error("Height must be greater than 0 (got {0})")]
    InvalidHeight(f64),

    #[error("Weight must be greater than 0 (got {0})")]
    InvalidWeight(f64),

    /// The knowledge base has no variable for one of the assessor's inputs.
    #[error("Model has no '{0}' input variable")]
    MissingModelVariable(&'static str),

    #[error(transparent)]
    Inference(#[from] FuzzyError),

    #[error("Failed to read model file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse model file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

impl RiskError {
    /// True when the caller's measurements are at fault.
    pub fn is_client_error(&self) -> bool {
        match self {
            RiskError::InvalidHeight(_) | RiskError::InvalidWeight(_) => true,
            RiskError::Inference(e) => !e.is_configuration(),
            RiskError::MissingModelVariable(_) | RiskError::Io(_) | RiskError::Parse(_) => false,
        }
    }
}

/// Raw patient measurements.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Measurements {
    pub weight_kg: f64,
    pub height_m: f64,
    /// Fasting plasma glucose, mg/dL.
    pub glucose: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Assessment {
    /// Risk score on the 0-100 scale, rounded to two decimals.
    pub risk: f64,
    pub bmi: f64,
    pub glucose: f64,
    /// False when no rule fired and `risk` is the zero fallback.
    pub fired: bool,
    pub activations: Vec<RuleActivation>,
}

/// Frozen risk model, shareable across request handlers.
#[derive(Debug)]
pub struct RiskAssessor {
    engine: InferenceEngine,
}

impl RiskAssessor {
    /// Fails unless the knowledge base declares both the glucose and the
    /// BMI input variables.
    pub fn new(system: FuzzySystem) -> Result<Self, RiskError> {
        for name in [model::GLUCOSE, model::BMI] {
            if system.variable(name).is_none() {
                return Err(RiskError::MissingModelVariable(name));
            }
        }
        Ok(Self { engine: InferenceEngine::new(system)? })
    }

    /// The built-in glucose × BMI model.
    pub fn builtin() -> Result<Self, RiskError> {
        Self::new(diabetes_system()?)
    }

    /// A knowledge base read from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self, RiskError> {
        let raw = std::fs::read_to_string(path)?;
        Self::new(FuzzySystem::from_yaml_str(&raw)?)
    }

    pub fn engine(&self) -> &InferenceEngine {
        &self.engine
    }

    pub fn assess(&self, m: Measurements) -> Result<Assessment, RiskError> {
        let bmi = body_mass_index(m.weight_kg, m.height_m)?;

        let inputs = HashMap::from([
            (model::GLUCOSE.to_string(), m.glucose),
            (model::BMI.to_string(), bmi),
        ]);
        let inference = self.engine.simulate_detailed(&inputs)?;
        let fired = inference.fired();
        let risk = (inference.crisp * 100.0).round() / 100.0;

        info!(glucose = m.glucose, bmi, risk, fired, "Risk assessed");

        Ok(Assessment {
            risk,
            bmi,
            glucose: m.glucose,
            fired,
            activations: inference.activations.into_iter().filter(|a| a.activation > 0.0).collect(),
        })
    }
}
