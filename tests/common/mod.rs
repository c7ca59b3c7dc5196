//! Shared fixtures: tiny models fitted in-process and written to a temp dir.

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use agri_assistant::inference::{ModelArtifact, Registry};
use agri_assistant::server::{create_router, AppState, ServerConfig};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use gbdt::config::Config;
use gbdt::decision_tree::{Data, DataVec};
use gbdt::gradient_boost::GBDT;
use serde_json::{json, Value};
use tower::ServiceExt;

pub const CROP_LABELS: [&str; 3] = ["coffee", "maize", "rice"];
pub const YIELD_CROPS: [&str; 2] = ["Maize", "Wheat"];
pub const SOIL_TYPES: [&str; 3] = ["Black", "Clayey", "Sandy"];
pub const CROP_TYPES: [&str; 2] = ["Maize", "Paddy"];
pub const FERTILIZERS: [&str; 3] = ["17-17-17", "DAP", "Urea"];
pub const RAIN_LABELS: [&str; 2] = ["no rain", "rain"];

fn fit(rows: &[(Vec<f32>, f32)]) -> GBDT {
    let mut cfg = Config::new();
    cfg.set_feature_size(rows[0].0.len());
    cfg.set_max_depth(3);
    cfg.set_iterations(20);
    cfg.set_shrinkage(0.3);
    cfg.set_loss("SquaredError");
    cfg.set_data_sample_ratio(1.0);
    cfg.set_feature_sample_ratio(1.0);

    let mut data: DataVec = rows
        .iter()
        .map(|(features, label)| Data::new_training_data(features.clone(), 1.0, *label, None))
        .collect();
    let mut model = GBDT::new(&cfg);
    model.fit(&mut data);
    model
}

fn regressor(rows: &[(Vec<f32>, f32)]) -> ModelArtifact {
    ModelArtifact::Regressor {
        feature_size: rows[0].0.len(),
        model: fit(rows),
    }
}

/// One-vs-rest members over `classes` codes.
fn classifier(rows: &[(Vec<f32>, usize)], classes: usize) -> ModelArtifact {
    let members = (0..classes)
        .map(|class| {
            let indicator: Vec<(Vec<f32>, f32)> = rows
                .iter()
                .map(|(features, code)| (features.clone(), if *code == class { 1.0 } else { 0.0 }))
                .collect();
            fit(&indicator)
        })
        .collect();
    ModelArtifact::Classifier {
        feature_size: rows[0].0.len(),
        members,
    }
}

pub fn write_encoder(dir: &Path, file: &str, classes: &[&str]) {
    std::fs::write(dir.join(file), json!({ "classes": classes }).to_string()).unwrap();
}

pub fn write_crop_recommend(dir: &Path) {
    // codes follow sorted labels: coffee=0, maize=1, rice=2
    let rows = vec![
        (vec![100.0, 20.0, 30.0, 25.0, 55.0, 6.5, 160.0], 0),
        (vec![105.0, 25.0, 32.0, 26.0, 58.0, 6.8, 170.0], 0),
        (vec![75.0, 45.0, 20.0, 22.0, 65.0, 6.2, 85.0], 1),
        (vec![80.0, 48.0, 18.0, 23.0, 62.0, 6.0, 90.0], 1),
        (vec![85.0, 40.0, 40.0, 21.0, 82.0, 6.5, 230.0], 2),
        (vec![90.0, 42.0, 43.0, 20.8, 82.0, 6.5, 202.9], 2),
    ];
    classifier(&rows, CROP_LABELS.len())
        .save(&dir.join("crop_recommend_model.json"))
        .unwrap();
    write_encoder(dir, "crop_label_encoder.json", &CROP_LABELS);
}

pub fn write_yield(dir: &Path) {
    // last column is the crop code: Maize=0, Wheat=1
    let rows = vec![
        (vec![80.0, 40.0, 40.0, 25.0, 80.0, 6.5, 200.0, 0.0], 3200.0),
        (vec![70.0, 35.0, 30.0, 24.0, 75.0, 6.3, 180.0, 0.0], 2900.0),
        (vec![60.0, 30.0, 30.0, 18.0, 60.0, 7.0, 90.0, 1.0], 2100.0),
        (vec![65.0, 32.0, 28.0, 17.0, 55.0, 7.1, 80.0, 1.0], 1950.0),
    ];
    regressor(&rows).save(&dir.join("yield_model.json")).unwrap();
    write_encoder(dir, "crop_encoder.json", &YIELD_CROPS);
}

pub fn write_fertilizer(dir: &Path) {
    // soil: Black=0, Clayey=1, Sandy=2; crop type: Maize=0, Paddy=1
    let rows = vec![
        (vec![26.0, 52.0, 38.0, 2.0, 0.0, 37.0, 0.0, 0.0], 2),
        (vec![29.0, 52.0, 45.0, 1.0, 1.0, 12.0, 0.0, 36.0], 0),
        (vec![34.0, 65.0, 62.0, 0.0, 0.0, 7.0, 9.0, 30.0], 1),
        (vec![32.0, 62.0, 34.0, 1.0, 1.0, 22.0, 0.0, 20.0], 0),
        (vec![28.0, 54.0, 46.0, 2.0, 0.0, 35.0, 0.0, 0.0], 2),
        (vec![31.0, 60.0, 55.0, 0.0, 1.0, 9.0, 10.0, 28.0], 1),
    ];
    classifier(&rows, FERTILIZERS.len())
        .save(&dir.join("fertilizer_model.json"))
        .unwrap();
    write_encoder(dir, "soil_encoder.json", &SOIL_TYPES);
    write_encoder(dir, "croptype_encoder.json", &CROP_TYPES);
    write_encoder(dir, "fertilizer_encoder.json", &FERTILIZERS);
}

pub fn write_weather(dir: &Path) {
    let rows = vec![
        (vec![23.7, 89.6, 7.3, 50.5, 1032.4], 1),
        (vec![19.0, 95.0, 12.0, 90.0, 1001.0], 1),
        (vec![27.9, 46.5, 5.9, 4.9, 992.6], 0),
        (vec![30.2, 40.0, 3.1, 10.0, 1015.0], 0),
    ];
    classifier(&rows, RAIN_LABELS.len())
        .save(&dir.join("weather_model.json"))
        .unwrap();
    write_encoder(dir, "rain_encoder.json", &RAIN_LABELS);
}

/// Weather artifact that declares the 5 weather columns but whose trees were
/// trained on 8 features.
pub fn write_weather_trained_wider(dir: &Path) {
    let rows = vec![
        (vec![23.7, 89.6, 7.3, 50.5, 1032.4, 1.0, 0.0, 3.0], 1),
        (vec![19.0, 95.0, 12.0, 90.0, 1001.0, 2.0, 1.0, 4.0], 1),
        (vec![27.9, 46.5, 5.9, 4.9, 992.6, 7.0, 5.0, 9.0], 0),
        (vec![30.2, 40.0, 3.1, 10.0, 1015.0, 8.0, 6.0, 8.0], 0),
    ];
    let mut artifact = serde_json::to_value(classifier(&rows, RAIN_LABELS.len())).unwrap();
    artifact["feature_size"] = json!(5);
    std::fs::write(dir.join("weather_model.json"), artifact.to_string()).unwrap();
    write_encoder(dir, "rain_encoder.json", &RAIN_LABELS);
}

pub fn write_all(dir: &Path) {
    write_crop_recommend(dir);
    write_yield(dir);
    write_fertilizer(dir);
    write_weather(dir);
}

pub fn config(models_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        models_dir: models_dir.to_path_buf(),
        static_dir: None,
    }
}

pub fn app_with(config: ServerConfig) -> axum::Router {
    let registry = Registry::load(&config.models_dir);
    create_router(Arc::new(AppState::new(config, registry)))
}

pub fn app(models_dir: &Path) -> axum::Router {
    app_with(config(models_dir))
}

pub async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
    (status, body.to_vec())
}

pub async fn post_raw(app: &axum::Router, uri: &str, body: &Value) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: &axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let (status, bytes) = post_raw(app, uri, &body).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

pub async fn get_json(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let (status, bytes) = send(app, request).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

pub fn crop_body() -> Value {
    json!({
        "N": 90, "P": 42, "K": 43,
        "temperature": 20.8, "humidity": 82, "ph": 6.5, "rainfall": 202.9
    })
}

pub fn yield_body(crop: &str) -> Value {
    json!({
        "Nitrogen": 78, "Phosphorus": 38, "Potassium": 36,
        "Temperature": 24.5, "Humidity": 78.0, "pH_Value": 6.4,
        "Rainfall": 190.0, "Crop": crop
    })
}

pub fn fertilizer_body(soil: &str, crop_type: &str) -> Value {
    json!({
        "Temparature": 26, "Humidity": 52, "Moisture": 38,
        "Soil_Type": soil, "Crop_Type": crop_type,
        "Nitrogen": 37, "Potassium": 0, "Phosphorous": 0
    })
}

pub fn weather_body() -> Value {
    json!({
        "Temperature": 21.0, "Humidity": 92.0, "Wind_Speed": 10.0,
        "Cloud_Cover": 80.0, "Pressure": 1005.0
    })
}
