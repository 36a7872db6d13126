//! One-shot risk assessment
//!
//! Usage: assess <glucose_mg_dl> <weight_kg> <height_m>

use anyhow::{bail, Context, Result};

use fuzzy_risk::config::AppConfig;
use fuzzy_risk::risk::Measurements;
use fuzzy_risk::utils::init_tracing;

fn parse_arg(args: &[String], idx: usize, name: &str) -> Result<f64> {
    args[idx]
        .parse::<f64>()
        .with_context(|| format!("{} must be a number, got '{}'", name, args[idx]))
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(&config.log_filter)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() != 3 {
        bail!("Usage: assess <glucose_mg_dl> <weight_kg> <height_m>");
    }

    let measurements = Measurements {
        glucose: parse_arg(&args, 0, "glucose")?,
        weight_kg: parse_arg(&args, 1, "weight")?,
        height_m: parse_arg(&args, 2, "height")?,
    };

    let assessor = config.load_assessor()?;
    let assessment = assessor.assess(measurements)?;

    println!("{}", serde_json::to_string_pretty(&assessment)?);
    Ok(())
}
