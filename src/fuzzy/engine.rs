//! Mamdani Inference Engine
//!
//! Pipeline per `simulate` call:
//! 1. Fuzzify every crisp input against its variable's terms
//! 2. Rule activation = min over antecedent degrees (AND)
//! 3. Aggregate = elementwise max over rules of min(activation, consequent curve)
//! 4. Centroid defuzzification over the output domain
//!
//! All name lookups are resolved to indices when the engine is built, so a
//! call can only fail on its inputs. Nothing is kept between calls; an engine
//! can be shared across threads behind an `Arc`.

use std::collections::{BTreeMap, HashMap};

use ndarray::{Array1, Zip};
use serde::Serialize;
use tracing::debug;

use super::domain::Domain;
use super::error::{FuzzyError, Result};
use super::rule::{Proposition, Rule};
use super::system::FuzzySystem;

/// A rule with every name resolved to `(variable index, term index)`.
#[derive(Debug, Clone)]
struct CompiledRule {
    antecedent: Vec<(usize, usize)>,
    consequent: (usize, usize),
    /// Consequent curve sampled over the output domain.
    curve: Array1<f64>,
}

/// Fuzzified inputs, indexed by variable then term.
#[derive(Debug, Clone)]
pub struct Fuzzified {
    degrees: Vec<Option<Vec<f64>>>,
}

/// Firing strength of one rule, in rule declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleActivation {
    pub rule: usize,
    pub activation: f64,
    pub consequent: Proposition,
}

/// Full trace of one inference run.
#[derive(Debug, Clone)]
pub struct Inference {
    /// Degrees per input variable, per term.
    pub fuzzified: BTreeMap<String, BTreeMap<String, f64>>,
    pub activations: Vec<RuleActivation>,
    pub aggregated: Array1<f64>,
    /// Defuzzified value; `0.0` when no rule fired.
    pub crisp: f64,
}

impl Inference {
    /// False when every rule had zero activation and `crisp` is the
    /// fallback value rather than a computed centroid.
    pub fn fired(&self) -> bool {
        self.aggregated.iter().any(|&d| d > 0.0)
    }
}

/// Centroid of a sampled fuzzy set, `None` when the set is empty everywhere.
pub fn centroid(domain: &Domain, aggregated: &Array1<f64>) -> Option<f64> {
    let denominator = aggregated.sum();
    if denominator == 0.0 {
        return None;
    }
    let numerator = (aggregated * &domain.samples()).sum();
    Some(numerator / denominator)
}

fn resolve_in(system: &FuzzySystem, index: &HashMap<String, usize>, p: &Proposition) -> Result<(usize, usize)> {
    let var_idx = *index
        .get(&p.variable)
        .ok_or_else(|| FuzzyError::UnknownVariable(p.variable.clone()))?;
    let term_idx = system.variables[var_idx]
        .term_index(&p.term)
        .ok_or_else(|| FuzzyError::UnknownTerm {
            variable: p.variable.clone(),
            term: p.term.clone(),
        })?;
    Ok((var_idx, term_idx))
}

#[derive(Debug)]
pub struct InferenceEngine {
    system: FuzzySystem,
    output_domain: Domain,
    index: HashMap<String, usize>,
    rules: Vec<CompiledRule>,
}

impl InferenceEngine {
    /// Freezes a knowledge base. Fails on a missing output domain, an empty
    /// antecedent, any unknown variable or term, or a consequent whose
    /// variable is sampled differently from the output domain.
    pub fn new(system: FuzzySystem) -> Result<Self> {
        let output_domain = system.output_domain.clone().ok_or(FuzzyError::MissingOutputDomain)?;

        let index: HashMap<String, usize> = system
            .variables
            .iter()
            .enumerate()
            .map(|(i, v)| (v.name().to_string(), i))
            .collect();

        let resolve = |p: &Proposition| resolve_in(&system, &index, p);

        let mut rules = Vec::with_capacity(system.rules.len());
        for (i, rule) in system.rules.iter().enumerate() {
            if rule.is_empty() {
                return Err(FuzzyError::EmptyAntecedent { rule: i });
            }
            let antecedent = rule.antecedent().map(|p| resolve(&p)).collect::<Result<Vec<_>>>()?;
            let consequent = resolve(rule.consequent())?;

            let output_var = &system.variables[consequent.0];
            if output_var.domain() != &output_domain {
                return Err(FuzzyError::ForeignOutputDomain {
                    rule: i,
                    variable: output_var.name().to_string(),
                });
            }
            let curve = output_var.terms()[consequent.1].function.evaluate_domain(&output_domain);

            rules.push(CompiledRule { antecedent, consequent, curve });
        }

        debug!(
            variables = system.variables.len(),
            rules = rules.len(),
            samples = output_domain.len(),
            "Inference engine ready"
        );

        Ok(Self { system, output_domain, index, rules })
    }

    pub fn system(&self) -> &FuzzySystem {
        &self.system
    }

    pub fn output_domain(&self) -> &Domain {
        &self.output_domain
    }

    pub fn rules(&self) -> &[Rule] {
        &self.system.rules
    }

    /// Stage 1. Every input must name a registered variable and be finite.
    /// Names are checked before values, in name order, so the same inputs
    /// always fail with the same error.
    pub fn fuzzify(&self, inputs: &HashMap<String, f64>) -> Result<Fuzzified> {
        let mut named: Vec<(&String, f64)> = inputs.iter().map(|(name, &value)| (name, value)).collect();
        named.sort_by(|a, b| a.0.cmp(b.0));

        let resolved = named
            .into_iter()
            .map(|(name, value)| {
                self.index
                    .get(name)
                    .map(|&idx| (idx, name, value))
                    .ok_or_else(|| FuzzyError::UnknownVariable(name.clone()))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut degrees = vec![None; self.system.variables.len()];
        for (idx, name, value) in resolved {
            if !value.is_finite() {
                return Err(FuzzyError::NonFiniteInput { variable: name.clone(), value });
            }
            degrees[idx] = Some(self.system.variables[idx].degrees(value));
        }
        Ok(Fuzzified { degrees })
    }

    /// Stage 2. Activation of each rule, in declaration order.
    pub fn evaluate_rules(&self, fuzzified: &Fuzzified) -> Result<Vec<RuleActivation>> {
        self.rules
            .iter()
            .enumerate()
            .map(|(i, rule)| {
                let mut activation = f64::INFINITY;
                for &(var_idx, term_idx) in &rule.antecedent {
                    let degrees = fuzzified.degrees[var_idx].as_ref().ok_or_else(|| {
                        FuzzyError::MissingInput(self.system.variables[var_idx].name().to_string())
                    })?;
                    activation = activation.min(degrees[term_idx]);
                }
                let consequent = self.proposition(rule.consequent);
                debug!(rule = i, activation, consequent = %consequent, "Rule evaluated");
                Ok(RuleActivation { rule: i, activation, consequent })
            })
            .collect()
    }

    /// Stage 3. Max over rules of each consequent curve clipped at its
    /// activation. A rule with zero activation contributes exactly nothing.
    ///
    /// Each activation must point at a rule of this engine and carry that
    /// rule's consequent.
    pub fn aggregate(&self, activations: &[RuleActivation]) -> Result<Array1<f64>> {
        let mut aggregated = Array1::<f64>::zeros(self.output_domain.len());
        for result in activations {
            let rule = self.rules.get(result.rule).ok_or(FuzzyError::UnknownRule(result.rule))?;
            if self.resolve(&result.consequent)? != rule.consequent {
                return Err(FuzzyError::ConsequentMismatch {
                    rule: result.rule,
                    expected: self.proposition(rule.consequent).to_string(),
                    found: result.consequent.to_string(),
                });
            }
            let activation = result.activation;
            Zip::from(&mut aggregated)
                .and(&rule.curve)
                .for_each(|acc, &degree| *acc = acc.max(activation.min(degree)));
        }
        Ok(aggregated)
    }

    /// Stage 4. Centroid of the aggregated set; `0.0` if it is empty.
    pub fn defuzzify(&self, aggregated: &Array1<f64>) -> f64 {
        centroid(&self.output_domain, aggregated).unwrap_or(0.0)
    }

    pub fn simulate(&self, inputs: &HashMap<String, f64>) -> Result<f64> {
        Ok(self.simulate_detailed(inputs)?.crisp)
    }

    #[tracing::instrument(level = "debug", skip_all, fields(inputs = inputs.len()))]
    pub fn simulate_detailed(&self, inputs: &HashMap<String, f64>) -> Result<Inference> {
        let fuzzified = self.fuzzify(inputs)?;
        let activations = self.evaluate_rules(&fuzzified)?;
        let aggregated = self.aggregate(&activations)?;
        let crisp = self.defuzzify(&aggregated);

        debug!(crisp, "Defuzzified");

        Ok(Inference {
            fuzzified: self.label(&fuzzified),
            activations,
            aggregated,
            crisp,
        })
    }

    fn resolve(&self, p: &Proposition) -> Result<(usize, usize)> {
        resolve_in(&self.system, &self.index, p)
    }

    fn proposition(&self, (var_idx, term_idx): (usize, usize)) -> Proposition {
        let var = &self.system.variables[var_idx];
        Proposition::new(var.name(), var.terms()[term_idx].name.as_str())
    }

    fn label(&self, fuzzified: &Fuzzified) -> BTreeMap<String, BTreeMap<String, f64>> {
        fuzzified
            .degrees
            .iter()
            .enumerate()
            .filter_map(|(i, d)| d.as_ref().map(|d| (i, d)))
            .map(|(i, degrees)| {
                let var = &self.system.variables[i];
                let terms = var
                    .term_names()
                    .zip(degrees)
                    .map(|(name, &degree)| (name.to_string(), degree))
                    .collect();
                (var.name().to_string(), terms)
            })
            .collect()
    }
}
