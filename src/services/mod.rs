//! Services Module
//!
//! HTTP surface of the risk model.

pub mod risk;

pub use risk::{router, run_risk_server, RiskServerState};
