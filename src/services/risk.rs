use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::fuzzy::FuzzySystem;
use crate::risk::{Measurements, RiskAssessor, RiskError};

pub struct RiskServerState {
    pub assessor: RiskAssessor,
}

#[derive(Debug, Deserialize)]
pub struct RiskRequest {
    #[serde(rename = "peso")]
    pub weight_kg: f64,
    #[serde(rename = "altura")]
    pub height_m: f64,
    #[serde(rename = "glucosa")]
    pub glucose: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RiskResponse {
    #[serde(rename = "riesgo_diabetes")]
    pub risk: f64,
    #[serde(rename = "imc")]
    pub bmi: f64,
}

struct ServerError(anyhow::Error);

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0.downcast_ref::<JsonRejection>() {
            Some(rejection) => (rejection.status(), rejection.body_text()),
            None => {
                let status = match self.0.downcast_ref::<RiskError>() {
                    Some(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, self.0.to_string())
            }
        };
        warn!(%status, error = %message, "Request failed");
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl<E> From<E> for ServerError where E: Into<anyhow::Error> {
    fn from(err: E) -> Self { Self(err.into()) }
}

pub fn router(state: Arc<RiskServerState>) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/calcular", post(calcular_handler))
        .route("/model", get(model_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_risk_server(config: AppConfig) -> Result<()> {
    info!("🩺 Starting Diabetes Risk Server...");

    let assessor = config.load_assessor()?;
    match &config.model_path {
        Some(path) => info!("Knowledge base loaded from {}", path.display()),
        None => info!("Using built-in knowledge base"),
    }
    let app = router(Arc::new(RiskServerState { assessor }));

    info!("🚀 Risk Server listening at http://{}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[tracing::instrument(skip_all)]
async fn calcular_handler(
    State(state): State<Arc<RiskServerState>>,
    payload: Result<Json<RiskRequest>, JsonRejection>,
) -> Result<Json<RiskResponse>, ServerError> {
    let Json(payload) = payload?;
    let assessment = state.assessor.assess(Measurements {
        weight_kg: payload.weight_kg,
        height_m: payload.height_m,
        glucose: payload.glucose,
    })?;
    Ok(Json(RiskResponse { risk: assessment.risk, bmi: assessment.bmi }))
}

async fn model_handler(State(state): State<Arc<RiskServerState>>) -> Json<FuzzySystem> {
    Json(state.assessor.engine().system().clone())
}
