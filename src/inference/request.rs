//! Request bodies, one per task. Field names are the public JSON contract.

use serde::Deserialize;

use super::task::{Task, Vocabulary};

/// A deserialized request that can feed a task's feature row.
pub trait TaskInput {
    const TASK: Task;

    /// Categorical values in validation order.
    fn categories(&self) -> Vec<(Vocabulary, &str)> {
        Vec::new()
    }

    /// Numeric values keyed by feature column.
    fn numeric(&self) -> Vec<(&'static str, f32)>;
}

#[derive(Debug, Clone, Deserialize)]
pub struct CropRecommendInput {
    #[serde(rename = "N")]
    pub n: f32,
    #[serde(rename = "P")]
    pub p: f32,
    #[serde(rename = "K")]
    pub k: f32,
    pub temperature: f32,
    pub humidity: f32,
    pub ph: f32,
    pub rainfall: f32,
}

impl TaskInput for CropRecommendInput {
    const TASK: Task = Task::CropRecommend;

    fn numeric(&self) -> Vec<(&'static str, f32)> {
        vec![
            ("N", self.n),
            ("P", self.p),
            ("K", self.k),
            ("temperature", self.temperature),
            ("humidity", self.humidity),
            ("ph", self.ph),
            ("rainfall", self.rainfall),
        ]
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct YieldPredictionInput {
    pub nitrogen: f32,
    pub phosphorus: f32,
    pub potassium: f32,
    pub temperature: f32,
    pub humidity: f32,
    #[serde(rename = "pH_Value")]
    pub ph_value: f32,
    pub rainfall: f32,
    pub crop: String,
}

impl TaskInput for YieldPredictionInput {
    const TASK: Task = Task::YieldPredict;

    fn categories(&self) -> Vec<(Vocabulary, &str)> {
        vec![(Vocabulary::Crop, self.crop.as_str())]
    }

    fn numeric(&self) -> Vec<(&'static str, f32)> {
        vec![
            ("Nitrogen", self.nitrogen),
            ("Phosphorus", self.phosphorus),
            ("Potassium", self.potassium),
            ("Temperature", self.temperature),
            ("Humidity", self.humidity),
            ("pH_Value", self.ph_value),
            ("Rainfall", self.rainfall),
        ]
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FertilizerInput {
    // Older clients send the misspelled key the fertilizer dataset used.
    #[serde(rename = "Temperature", alias = "Temparature")]
    pub temperature: f32,
    #[serde(rename = "Humidity")]
    pub humidity: f32,
    #[serde(rename = "Moisture")]
    pub moisture: f32,
    #[serde(rename = "Soil_Type")]
    pub soil_type: String,
    #[serde(rename = "Crop_Type")]
    pub crop_type: String,
    #[serde(rename = "Nitrogen")]
    pub nitrogen: f32,
    #[serde(rename = "Potassium")]
    pub potassium: f32,
    #[serde(rename = "Phosphorous")]
    pub phosphorous: f32,
}

impl TaskInput for FertilizerInput {
    const TASK: Task = Task::FertilizerRecommend;

    fn categories(&self) -> Vec<(Vocabulary, &str)> {
        vec![
            (Vocabulary::SoilType, self.soil_type.as_str()),
            (Vocabulary::CropType, self.crop_type.as_str()),
        ]
    }

    fn numeric(&self) -> Vec<(&'static str, f32)> {
        vec![
            ("Temperature", self.temperature),
            ("Humidity", self.humidity),
            ("Moisture", self.moisture),
            ("Nitrogen", self.nitrogen),
            ("Potassium", self.potassium),
            ("Phosphorous", self.phosphorous),
        ]
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherInput {
    #[serde(rename = "Temperature")]
    pub temperature: f32,
    #[serde(rename = "Humidity")]
    pub humidity: f32,
    #[serde(rename = "Wind_Speed")]
    pub wind_speed: f32,
    #[serde(rename = "Cloud_Cover")]
    pub cloud_cover: f32,
    #[serde(rename = "Pressure")]
    pub pressure: f32,
}

impl TaskInput for WeatherInput {
    const TASK: Task = Task::WeatherForecast;

    fn numeric(&self) -> Vec<(&'static str, f32)> {
        vec![
            ("Temperature", self.temperature),
            ("Humidity", self.humidity),
            ("Wind_Speed", self.wind_speed),
            ("Cloud_Cover", self.cloud_cover),
            ("Pressure", self.pressure),
        ]
    }
}
