//! Sampled Domains
//!
//! The finite, ordered sample sequence a variable's range is discretized into.
//! Output domains carry aggregation and centroid defuzzification.

use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};

use super::error::{FuzzyError, Result};

/// Domain as written in a knowledge base file: either an inclusive linear
/// sampling or an explicit list of samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DomainSpec {
    Linspace { start: f64, stop: f64, samples: usize },
    Samples(Vec<f64>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DomainSpec", into = "DomainSpec")]
pub struct Domain {
    samples: Array1<f64>,
}

impl Domain {
    /// `samples` evenly spaced points over `[start, stop]`, both ends included.
    pub fn linspace(start: f64, stop: f64, samples: usize) -> Result<Self> {
        if !(start.is_finite() && stop.is_finite()) {
            return Err(FuzzyError::InvalidDomain("bounds must be finite".to_string()));
        }
        if start > stop {
            return Err(FuzzyError::InvalidDomain(format!("start {} exceeds stop {}", start, stop)));
        }
        if samples == 0 {
            return Err(FuzzyError::InvalidDomain("at least one sample is required".to_string()));
        }
        Ok(Self { samples: Array1::linspace(start, stop, samples) })
    }

    /// Explicit samples; must be non-empty, finite and non-decreasing.
    pub fn from_samples(samples: Vec<f64>) -> Result<Self> {
        if samples.is_empty() {
            return Err(FuzzyError::InvalidDomain("at least one sample is required".to_string()));
        }
        if samples.iter().any(|s| !s.is_finite()) {
            return Err(FuzzyError::InvalidDomain("samples must be finite".to_string()));
        }
        if samples.windows(2).any(|w| w[0] > w[1]) {
            return Err(FuzzyError::InvalidDomain("samples must be ordered".to_string()));
        }
        Ok(Self { samples: Array1::from(samples) })
    }

    pub fn samples(&self) -> ArrayView1<'_, f64> {
        self.samples.view()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn min(&self) -> f64 {
        self.samples[0]
    }

    pub fn max(&self) -> f64 {
        self.samples[self.samples.len() - 1]
    }
}

impl TryFrom<DomainSpec> for Domain {
    type Error = FuzzyError;

    fn try_from(spec: DomainSpec) -> Result<Self> {
        match spec {
            DomainSpec::Linspace { start, stop, samples } => Self::linspace(start, stop, samples),
            DomainSpec::Samples(samples) => Self::from_samples(samples),
        }
    }
}

impl From<Domain> for DomainSpec {
    fn from(domain: Domain) -> Self {
        DomainSpec::Samples(domain.samples.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_includes_both_ends() {
        let domain = Domain::linspace(0.0, 100.0, 100).unwrap();
        assert_eq!(domain.len(), 100);
        assert_eq!(domain.min(), 0.0);
        assert!((domain.max() - 100.0).abs() < 1e-9);
        assert!((domain.samples()[1] - 100.0 / 99.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_bad_domains() {
        assert!(Domain::linspace(10.0, 0.0, 5).is_err());
        assert!(Domain::linspace(0.0, 10.0, 0).is_err());
        assert!(Domain::linspace(0.0, f64::INFINITY, 5).is_err());
        assert!(Domain::from_samples(vec![]).is_err());
        assert!(Domain::from_samples(vec![1.0, 3.0, 2.0]).is_err());
    }

    #[test]
    fn test_yaml_accepts_both_forms() {
        let linear: Domain = serde_yaml::from_str("start: 10\nstop: 50\nsamples: 5\n").unwrap();
        assert_eq!(linear.samples().to_vec(), vec![10.0, 20.0, 30.0, 40.0, 50.0]);

        let explicit: Domain = serde_yaml::from_str("[0.0, 0.5, 1.0]").unwrap();
        assert_eq!(explicit.len(), 3);
    }
}
