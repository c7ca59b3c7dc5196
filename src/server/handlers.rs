//! HTTP request handlers

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use tracing::warn;

use crate::inference::{
    predict, CropRecommendInput, FertilizerInput, PredictError, Prediction, Task, WeatherInput,
    YieldPredictionInput,
};

use super::error::Result;
use super::state::AppState;

const SERVICE_NAME: &str = "Agri Assistant API";

#[derive(Debug, Serialize)]
pub struct CropRecommendation {
    pub recommended_crop: String,
}

#[derive(Debug, Serialize)]
pub struct YieldPrediction {
    pub predicted_yield: f64,
    pub unit: &'static str,
}

#[derive(Debug, Serialize)]
pub struct FertilizerRecommendation {
    pub recommended_fertilizer: String,
}

#[derive(Debug, Serialize)]
pub struct WeatherForecast {
    pub forecast: String,
}

fn into_label(prediction: Prediction) -> std::result::Result<String, PredictError> {
    match prediction {
        Prediction::Label(label) => Ok(label),
        other => Err(PredictError::Failure(format!("expected a label, got {other:?}"))),
    }
}

fn endpoints() -> BTreeMap<&'static str, &'static str> {
    Task::ALL.iter().map(|task| (task.name(), task.route())).collect()
}

// ============================================================================
// Prediction Handlers
// ============================================================================

/// Recommend a crop from soil nutrients and climate
pub async fn crop_recommend(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<CropRecommendInput>, JsonRejection>,
) -> Result<Json<CropRecommendation>> {
    let Json(input) = payload?;
    let label = into_label(predict(&state.registry, &input)?)?;
    Ok(Json(CropRecommendation {
        recommended_crop: label,
    }))
}

/// Predict crop yield
pub async fn yield_predict(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<YieldPredictionInput>, JsonRejection>,
) -> Result<Json<YieldPrediction>> {
    let Json(input) = payload?;
    match predict(&state.registry, &input)? {
        Prediction::Quantity { value, unit } => Ok(Json(YieldPrediction {
            predicted_yield: value,
            unit,
        })),
        other => Err(PredictError::Failure(format!("expected a quantity, got {other:?}")).into()),
    }
}

/// Recommend a fertilizer for a soil and crop type
pub async fn fertilizer_recommend(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<FertilizerInput>, JsonRejection>,
) -> Result<Json<FertilizerRecommendation>> {
    let Json(input) = payload?;
    let label = into_label(predict(&state.registry, &input)?)?;
    Ok(Json(FertilizerRecommendation {
        recommended_fertilizer: label,
    }))
}

/// Forecast rain / no rain
pub async fn weather_forecast(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<WeatherInput>, JsonRejection>,
) -> Result<Json<WeatherForecast>> {
    let Json(input) = payload?;
    let label = into_label(predict(&state.registry, &input)?)?;
    Ok(Json(WeatherForecast { forecast: label }))
}

// ============================================================================
// Service Handlers
// ============================================================================

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "models": state.registry.available(),
    }))
}

/// Serve the landing page, or service metadata when there is none.
pub async fn index(State(state): State<Arc<AppState>>) -> Response {
    let candidates = state.config.landing_candidates();
    for path in &candidates {
        match tokio::fs::read_to_string(path).await {
            Ok(html) => return Html(html).into_response(),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(path = %path.display(), error = %e, "Failed to read landing page"),
        }
    }

    let current_dir = std::env::current_dir()
        .map(|dir| dir.display().to_string())
        .unwrap_or_else(|e| format!("unavailable: {e}"));
    let tried_paths: Vec<String> = candidates
        .iter()
        .map(|path| path.display().to_string())
        .collect();

    Json(json!({
        "error": "HTML file not found",
        "debug": {
            "current_dir": current_dir,
            "tried_paths": tried_paths,
        },
        "message": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": endpoints(),
        "models": state.registry.available(),
    }))
    .into_response()
}
