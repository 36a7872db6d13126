//! Runtime Configuration
//!
//! Read once from the environment (after `.env` is loaded by the binary).

use std::env;
use std::path::PathBuf;

use crate::risk::{RiskAssessor, RiskError};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_LOG_FILTER: &str = "fuzzy_risk=info,tower_http=info";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Address the HTTP server listens on
    pub bind_addr: String,
    /// YAML knowledge base; the built-in model is used when absent
    pub model_path: Option<PathBuf>,
    /// `EnvFilter` directive for logging
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            model_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    /// `RISK_BIND_ADDR`, `RISK_MODEL_PATH` and `RISK_LOG`, each optional.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: lookup("RISK_BIND_ADDR").unwrap_or(defaults.bind_addr),
            model_path: lookup("RISK_MODEL_PATH").filter(|p| !p.is_empty()).map(PathBuf::from),
            log_filter: lookup("RISK_LOG").unwrap_or(defaults.log_filter),
        }
    }

    /// Builds the frozen risk model this configuration points at.
    pub fn load_assessor(&self) -> Result<RiskAssessor, RiskError> {
        match &self.model_path {
            Some(path) => RiskAssessor::from_file(path),
            None => RiskAssessor::builtin(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config, AppConfig::default());
        assert!(config.load_assessor().is_ok());
    }

    #[test]
    fn test_overrides() {
        let vars = HashMap::from([
            ("RISK_BIND_ADDR", "127.0.0.1:8080"),
            ("RISK_MODEL_PATH", "models/risk.yaml"),
        ]);
        let config = AppConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.model_path, Some(PathBuf::from("models/risk.yaml")));
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_missing_model_file() {
        let config = AppConfig {
            model_path: Some(PathBuf::from("/nonexistent/risk.yaml")),
            ..AppConfig::default()
        };
        assert!(matches!(config.load_assessor(), Err(RiskError::Io(_))));
    }
}
