//! Diabetes Risk Server
//!
//! Serves the fuzzy glucose × BMI risk model over HTTP.

use anyhow::Result;

use fuzzy_risk::config::AppConfig;
use fuzzy_risk::services::run_risk_server;
use fuzzy_risk::utils::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(&config.log_filter)?;

    run_risk_server(config).await
}
