//! Diabetes-risk knowledge base
//!
//! Glucose (mg/dL) and BMI are fuzzified into clinical bands; 18 rules cross
//! every glucose band with every BMI band to a risk band on a 0-100 scale.

use crate::fuzzy::{Domain, FuzzyError, FuzzySystem, LinguisticVariable, MembershipFunction, Rule};

pub const GLUCOSE: &str = "Glucose";
pub const BMI: &str = "IMC";
pub const RISK: &str = "Diabetes_R";

const GLUCOSE_TERMS: &[(&str, [f64; 3])] = &[
    ("Normal", [50.0, 80.0, 99.0]),
    ("Prediabetes", [90.0, 110.0, 125.0]),
    ("Diabetes", [120.0, 150.0, 300.0]),
];

const BMI_TERMS: &[(&str, [f64; 3])] = &[
    ("Bajo", [10.0, 15.0, 18.5]),
    ("Normal", [18.0, 22.0, 24.9]),
    ("Sobrepeso", [23.0, 27.0, 29.9]),
    ("Obesidad Leve", [28.0, 32.0, 34.9]),
    ("Obesidad Moderada", [33.0, 37.0, 39.9]),
    ("Obesidad Severa", [38.0, 45.0, 50.0]),
];

// Moderado/Alto/Muy Alto overlap only at their feet; Crítico has a vertical right edge.
const RISK_TERMS: &[(&str, [f64; 3])] = &[
    ("Bajo", [0.0, 10.0, 30.0]),
    ("Moderado", [25.0, 40.0, 55.0]),
    ("Alto", [50.0, 65.0, 80.0]),
    ("Muy Alto", [75.0, 85.0, 95.0]),
    ("Crítico", [92.0, 100.0, 100.0]),
];

/// (glucose band, BMI band) -> risk band
const RULES: &[(&str, &str, &str)] = &[
    ("Normal", "Bajo", "Bajo"),
    ("Normal", "Normal", "Bajo"),
    ("Normal", "Sobrepeso", "Moderado"),
    ("Normal", "Obesidad Leve", "Moderado"),
    ("Normal", "Obesidad Moderada", "Alto"),
    ("Normal", "Obesidad Severa", "Alto"),
    ("Prediabetes", "Bajo", "Moderado"),
    ("Prediabetes", "Normal", "Alto"),
    ("Prediabetes", "Sobrepeso", "Muy Alto"),
    ("Prediabetes", "Obesidad Leve", "Muy Alto"),
    ("Prediabetes", "Obesidad Moderada", "Crítico"),
    ("Prediabetes", "Obesidad Severa", "Crítico"),
    ("Diabetes", "Bajo", "Alto"),
    ("Diabetes", "Normal", "Muy Alto"),
    ("Diabetes", "Sobrepeso", "Crítico"),
    ("Diabetes", "Obesidad Leve", "Crítico"),
    ("Diabetes", "Obesidad Moderada", "Crítico"),
    ("Diabetes", "Obesidad Severa", "Crítico"),
];

fn triangular_variable(
    name: &str,
    domain: Domain,
    terms: &[(&str, [f64; 3])],
) -> Result<LinguisticVariable, FuzzyError> {
    let mut var = LinguisticVariable::new(name, domain);
    for (term, [a, b, c]) in terms {
        var.add_term(*term, MembershipFunction::triangular(*a, *b, *c)?);
    }
    Ok(var)
}

/// The built-in glucose × BMI → risk knowledge base.
pub fn diabetes_system() -> Result<FuzzySystem, FuzzyError> {
    let risk_domain = Domain::linspace(0.0, 100.0, 100)?;

    let mut system = FuzzySystem::new();
    system
        .set_output_domain(risk_domain.clone())
        .add_variable(triangular_variable(GLUCOSE, Domain::linspace(50.0, 300.0, 100)?, GLUCOSE_TERMS)?)
        .add_variable(triangular_variable(BMI, Domain::linspace(10.0, 50.0, 100)?, BMI_TERMS)?)
        .add_variable(triangular_variable(RISK, risk_domain, RISK_TERMS)?);

    for (glucose, bmi, risk) in RULES {
        system.add_rule(Rule::when(GLUCOSE, *glucose).and(BMI, *bmi).then(RISK, *risk));
    }

    Ok(system)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fuzzy::InferenceEngine;

    #[test]
    fn test_every_band_pair_has_a_rule() {
        let system = diabetes_system().unwrap();
        assert_eq!(system.rules.len(), GLUCOSE_TERMS.len() * BMI_TERMS.len());
        assert_eq!(system.variables.len(), 3);
    }

    #[test]
    fn test_knowledge_base_compiles() {
        let engine = InferenceEngine::new(diabetes_system().unwrap()).unwrap();
        assert_eq!(engine.output_domain().len(), 100);
        assert_eq!(engine.rules().len(), 18);
    }
}
