//! Linguistic Variables
//!
//! A named quantity described by uniquely-named terms over a sampled domain.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::domain::Domain;
use super::membership::MembershipFunction;

/// A named fuzzy set within a variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    pub name: String,
    #[serde(flatten)]
    pub function: MembershipFunction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "VariableSpec", into = "VariableSpec")]
pub struct LinguisticVariable {
    name: String,
    domain: Domain,
    terms: Vec<Term>,
}

/// Serialized form; terms are replayed through `add_term` on load so a
/// repeated name follows the same overwrite policy as in code.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct VariableSpec {
    name: String,
    domain: Domain,
    #[serde(default)]
    terms: Vec<Term>,
}

impl From<VariableSpec> for LinguisticVariable {
    fn from(spec: VariableSpec) -> Self {
        let mut var = LinguisticVariable::new(spec.name, spec.domain);
        for term in spec.terms {
            var.add_term(term.name, term.function);
        }
        var
    }
}

impl From<LinguisticVariable> for VariableSpec {
    fn from(var: LinguisticVariable) -> Self {
        VariableSpec {
            name: var.name,
            domain: var.domain,
            terms: var.terms,
        }
    }
}

impl LinguisticVariable {
    pub fn new(name: impl Into<String>, domain: Domain) -> Self {
        Self {
            name: name.into(),
            domain,
            terms: Vec::new(),
        }
    }

    /// Builder-style `add_term`.
    pub fn with_term(mut self, name: impl Into<String>, function: MembershipFunction) -> Self {
        self.add_term(name, function);
        self
    }

    /// Registers a term. Re-registering an existing name replaces its
    /// function in place (last write wins) and hands back the old one.
    pub fn add_term(&mut self, name: impl Into<String>, function: MembershipFunction) -> Option<MembershipFunction> {
        let name = name.into();
        match self.terms.iter_mut().find(|t| t.name == name) {
            Some(existing) => {
                warn!(variable = %self.name, term = %name, "Term redefined, replacing previous membership function");
                Some(std::mem::replace(&mut existing.function, function))
            }
            None => {
                self.terms.push(Term { name, function });
                None
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn term(&self, name: &str) -> Option<&MembershipFunction> {
        self.terms.iter().find(|t| t.name == name).map(|t| &t.function)
    }

    /// Position of a term, stable for the variable's lifetime.
    pub fn term_index(&self, name: &str) -> Option<usize> {
        self.terms.iter().position(|t| t.name == name)
    }

    pub fn term_names(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|t| t.name.as_str())
    }

    /// Degree of every registered term at `x`, zeros included.
    pub fn fuzzify(&self, x: f64) -> BTreeMap<String, f64> {
        self.terms
            .iter()
            .map(|t| (t.name.clone(), t.function.degree(x)))
            .collect()
    }

    /// Same as `fuzzify`, positionally aligned with `terms()`.
    pub fn degrees(&self, x: f64) -> Vec<f64> {
        self.terms.iter().map(|t| t.function.degree(x)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glucose() -> LinguisticVariable {
        LinguisticVariable::new("Glucose", Domain::linspace(50.0, 300.0, 100).unwrap())
            .with_term("Normal", MembershipFunction::triangular(50.0, 80.0, 99.0).unwrap())
            .with_term("Prediabetes", MembershipFunction::triangular(90.0, 110.0, 125.0).unwrap())
            .with_term("Diabetes", MembershipFunction::triangular(120.0, 150.0, 300.0).unwrap())
    }

    #[test]
    fn test_fuzzify_covers_every_term() {
        let var = glucose();
        let degrees = var.fuzzify(95.0);

        assert_eq!(degrees.len(), 3);
        for term in var.terms() {
            assert_eq!(degrees[&term.name], term.function.degree(95.0));
        }
        assert_eq!(degrees["Diabetes"], 0.0);
        assert!(degrees["Normal"] > 0.0);
        assert!(degrees["Prediabetes"] > 0.0);
    }

    #[test]
    fn test_degrees_align_with_terms() {
        let var = glucose();
        let positional = var.degrees(130.0);
        let named = var.fuzzify(130.0);
        for (term, degree) in var.terms().iter().zip(positional) {
            assert_eq!(named[&term.name], degree);
        }
    }

    #[test]
    fn test_redefining_a_term_overwrites_it() {
        let mut var = glucose();
        let replacement = MembershipFunction::triangular(60.0, 85.0, 100.0).unwrap();

        let previous = var.add_term("Normal", replacement);

        assert_eq!(previous, Some(MembershipFunction::triangular(50.0, 80.0, 99.0).unwrap()));
        assert_eq!(var.terms().len(), 3);
        assert_eq!(var.term("Normal"), Some(&replacement));
        assert_eq!(var.term_index("Normal"), Some(0));
    }

    #[test]
    fn test_unknown_term_lookup() {
        let var = glucose();
        assert!(var.term("Hipoglucemia").is_none());
        assert!(var.term_index("Hipoglucemia").is_none());
    }
}
