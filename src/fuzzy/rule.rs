//! Fuzzy Rules
//!
//! IF `var1 is term1` AND `var2 is term2` ... THEN `output is term`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{FuzzyError, Result};

/// A `(variable, term)` reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Proposition {
    pub variable: String,
    pub term: String,
}

impl Proposition {
    pub fn new(variable: impl Into<String>, term: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            term: term.into(),
        }
    }
}

impl fmt::Display for Proposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is {}", self.variable, self.term)
    }
}

/// Conjunctive antecedent plus a single consequent. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(rename = "if")]
    antecedent: BTreeMap<String, String>,
    #[serde(rename = "then")]
    consequent: Proposition,
}

impl Rule {
    /// Fails with `EmptyRule` when no condition is given. A variable
    /// repeated in the antecedent keeps its last term.
    pub fn new<I, V, T>(antecedent: I, consequent: Proposition) -> Result<Self>
    where
        I: IntoIterator<Item = (V, T)>,
        V: Into<String>,
        T: Into<String>,
    {
        let antecedent: BTreeMap<String, String> = antecedent
            .into_iter()
            .map(|(v, t)| (v.into(), t.into()))
            .collect();
        if antecedent.is_empty() {
            return Err(FuzzyError::EmptyRule);
        }
        Ok(Self { antecedent, consequent })
    }

    /// Starts a rule builder: `Rule::when("Glucose", "Normal").and("IMC", "Bajo").then("Diabetes_R", "Bajo")`.
    pub fn when(variable: impl Into<String>, term: impl Into<String>) -> RuleBuilder {
        RuleBuilder {
            antecedent: BTreeMap::from([(variable.into(), term.into())]),
        }
    }

    pub fn antecedent(&self) -> impl Iterator<Item = Proposition> + '_ {
        self.antecedent.iter().map(|(v, t)| Proposition::new(v.as_str(), t.as_str()))
    }

    pub fn consequent(&self) -> &Proposition {
        &self.consequent
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.antecedent.is_empty()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let conditions: Vec<String> = self.antecedent().map(|p| p.to_string()).collect();
        write!(f, "IF {} THEN {}", conditions.join(" AND "), self.consequent)
    }
}

pub struct RuleBuilder {
    antecedent: BTreeMap<String, String>,
}

impl RuleBuilder {
    pub fn and(mut self, variable: impl Into<String>, term: impl Into<String>) -> Self {
        self.antecedent.insert(variable.into(), term.into());
        self
    }

    pub fn then(self, variable: impl Into<String>, term: impl Into<String>) -> Rule {
        Rule {
            antecedent: self.antecedent,
            consequent: Proposition::new(variable, term),
        }
    }
}
