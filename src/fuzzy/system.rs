//! Fuzzy System Configuration
//!
//! The mutable knowledge base an application assembles before serving:
//! variables, rules and the single output domain. It is frozen into an
//! `InferenceEngine`, which owns it read-only from then on.

use serde::{Deserialize, Serialize};

use super::domain::Domain;
use super::rule::Rule;
use super::variable::LinguisticVariable;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FuzzySystem {
    #[serde(default)]
    pub output_domain: Option<Domain>,
    #[serde(default)]
    pub variables: Vec<LinguisticVariable>,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

impl FuzzySystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a variable, replacing any previous variable of the same name.
    pub fn add_variable(&mut self, variable: LinguisticVariable) -> &mut Self {
        match self.variables.iter_mut().find(|v| v.name() == variable.name()) {
            Some(existing) => *existing = variable,
            None => self.variables.push(variable),
        }
        self
    }

    pub fn add_rule(&mut self, rule: Rule) -> &mut Self {
        self.rules.push(rule);
        self
    }

    pub fn set_output_domain(&mut self, domain: Domain) -> &mut Self {
        self.output_domain = Some(domain);
        self
    }

    pub fn variable(&self, name: &str) -> Option<&LinguisticVariable> {
        self.variables.iter().find(|v| v.name() == name)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    pub fn to_yaml_string(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}
