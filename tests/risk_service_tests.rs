//! HTTP surface and YAML-loaded models.

use std::io::Write;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tempfile::NamedTempFile;
use tower::ServiceExt;

use fuzzy_risk::risk::{Measurements, RiskAssessor, RiskError};
use fuzzy_risk::services::{router, RiskServerState};

fn app() -> axum::Router {
    router(Arc::new(RiskServerState {
        assessor: RiskAssessor::builtin().unwrap(),
    }))
}

async fn post_json(body: Value) -> (StatusCode, Value) {
    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/calcular")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_calcular_returns_rounded_risk() {
    let (status, body) = post_json(json!({ "peso": 58.0, "altura": 1.70, "glucosa": 70.0 })).await;

    assert_eq!(status, StatusCode::OK);
    let risk = body["riesgo_diabetes"].as_f64().unwrap();
    assert!(risk > 0.0 && risk < 30.0, "risk {}", risk);
    assert_eq!(risk, (risk * 100.0).round() / 100.0);
    assert!((body["imc"].as_f64().unwrap() - 20.07).abs() < 0.01);
}

#[tokio::test]
async fn test_calcular_rejects_zero_height() {
    let (status, body) = post_json(json!({ "peso": 70.0, "altura": 0.0, "glucosa": 90.0 })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Height"));
}

#[tokio::test]
async fn test_health_and_model() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app()
        .oneshot(Request::builder().uri("/model").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let model: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(model["rules"].as_array().unwrap().len(), 18);
    assert_eq!(model["variables"].as_array().unwrap().len(), 3);
}

const SMALL_MODEL: &str = r#"
output_domain: { start: 0.0, stop: 100.0, samples: 101 }
variables:
  - name: Glucose
    domain: { start: 50.0, stop: 300.0, samples: 26 }
    terms:
      - { name: Alta, shape: trapezoidal, a: 100.0, b: 140.0, c: 300.0, d: 300.0 }
  - name: IMC
    domain: [10.0, 30.0, 50.0]
    terms:
      - { name: Cualquiera, shape: gaussian, amplitude: 1.0, center: 25.0, width: 10.0 }
  - name: Diabetes_R
    domain: { start: 0.0, stop: 100.0, samples: 101 }
    terms:
      - { name: Alto, shape: triangular, a: 60.0, b: 80.0, c: 100.0 }
rules:
  - if: { Glucose: Alta, IMC: Cualquiera }
    then: { variable: Diabetes_R, term: Alto }
"#;

#[test]
fn test_model_file_drives_assessment() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(SMALL_MODEL.as_bytes()).unwrap();

    let assessor = RiskAssessor::from_file(file.path()).unwrap();
    let assessment = assessor
        .assess(Measurements { weight_kg: 80.0, height_m: 1.80, glucose: 180.0 })
        .unwrap();

    assert!(assessment.fired);
    assert!(assessment.risk > 60.0 && assessment.risk < 100.0, "risk {}", assessment.risk);
    assert_eq!(assessment.activations.len(), 1);
}

#[test]
fn test_malformed_model_file_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(SMALL_MODEL.replace("a: 60.0, b: 80.0", "a: 90.0, b: 80.0").as_bytes()).unwrap();

    assert!(matches!(RiskAssessor::from_file(file.path()), Err(RiskError::Parse(_))));
}

#[test]
fn test_model_file_without_bmi_variable_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(SMALL_MODEL.replace("IMC", "Peso").as_bytes()).unwrap();

    let err = RiskAssessor::from_file(file.path()).unwrap_err();
    assert!(matches!(err, RiskError::MissingModelVariable("IMC")));
    assert!(!err.is_client_error());
}

#[tokio::test]
async fn test_missing_field_returns_json_error() {
    let (status, body) = post_json(json!({ "peso": 58.0, "altura": 1.70 })).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("glucosa"), "body {}", body);
}

#[tokio::test]
async fn test_malformed_json_returns_json_error() {
    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/calcular")
                .header("content-type", "application/json")
                .body(Body::from("{\"peso\": 58.0,"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());
}
