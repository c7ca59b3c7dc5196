//! API route definitions

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::inference::Task;

use super::{handlers, state::AppState};

async fn handle_404() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": true,
            "detail": "Not found. Visit / for the endpoint listing.",
        })),
    )
}

/// Create the main application router
pub fn create_router(state: Arc<AppState>) -> Router {
    // Public demo API: any origin, method and header.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health_check))
        .route(Task::CropRecommend.route(), post(handlers::crop_recommend))
        .route(Task::YieldPredict.route(), post(handlers::yield_predict))
        .route(
            Task::FertilizerRecommend.route(),
            post(handlers::fertilizer_recommend),
        )
        .route(Task::WeatherForecast.route(), post(handlers::weather_forecast))
        .fallback(handle_404)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
