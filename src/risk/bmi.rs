//! Body-mass index

use super::RiskError;

/// `weight / height²`, weight in kilograms and height in metres.
pub fn body_mass_index(weight_kg: f64, height_m: f64) -> Result<f64, RiskError> {
    if !height_m.is_finite() || height_m <= 0.0 {
        return Err(RiskError::InvalidHeight(height_m));
    }
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(RiskError::InvalidWeight(weight_kg));
    }
    Ok(weight_kg / (height_m * height_m))
}
