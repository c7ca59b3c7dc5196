//! Static description of the four prediction tasks: artifact files,
//! feature columns and vocabularies.

use std::fmt;

use serde::Serialize;

use super::schema::FeatureSchema;

pub const YIELD_UNIT: &str = "kg/hectare";

const CROP_RECOMMEND_COLUMNS: FeatureSchema =
    FeatureSchema::new(&["N", "P", "K", "temperature", "humidity", "ph", "rainfall"]);

const YIELD_COLUMNS: FeatureSchema = FeatureSchema::new(&[
    "Nitrogen",
    "Phosphorus",
    "Potassium",
    "Temperature",
    "Humidity",
    "pH_Value",
    "Rainfall",
    "Crop_encoded",
]);

const FERTILIZER_COLUMNS: FeatureSchema = FeatureSchema::new(&[
    "Temperature",
    "Humidity",
    "Moisture",
    "Soil_encoded",
    "CropType_encoded",
    "Nitrogen",
    "Potassium",
    "Phosphorous",
]);

const WEATHER_COLUMNS: FeatureSchema =
    FeatureSchema::new(&["Temperature", "Humidity", "Wind_Speed", "Cloud_Cover", "Pressure"]);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Task {
    CropRecommend,
    YieldPredict,
    FertilizerRecommend,
    WeatherForecast,
}

/// A category set fixed at training time, stored in its own encoder file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Vocabulary {
    /// Crop names the recommender can output.
    CropLabel,
    /// Crop names accepted by the yield model.
    Crop,
    SoilType,
    CropType,
    Fertilizer,
    Rain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Label(Vocabulary),
    Quantity { unit: &'static str },
}

impl Task {
    pub const ALL: [Task; 4] = [
        Task::CropRecommend,
        Task::YieldPredict,
        Task::FertilizerRecommend,
        Task::WeatherForecast,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Task::CropRecommend => "crop_recommend",
            Task::YieldPredict => "yield_predict",
            Task::FertilizerRecommend => "fertilizer_recommend",
            Task::WeatherForecast => "weather_forecast",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Task::CropRecommend => "Crop recommendation",
            Task::YieldPredict => "Yield prediction",
            Task::FertilizerRecommend => "Fertilizer recommendation",
            Task::WeatherForecast => "Weather forecast",
        }
    }

    pub fn route(self) -> &'static str {
        match self {
            Task::CropRecommend => "/crop_recommend",
            Task::YieldPredict => "/yield_predict",
            Task::FertilizerRecommend => "/fertilizer_recommend",
            Task::WeatherForecast => "/weather_forecast",
        }
    }

    pub fn model_file(self) -> &'static str {
        match self {
            Task::CropRecommend => "crop_recommend_model.json",
            Task::YieldPredict => "yield_model.json",
            Task::FertilizerRecommend => "fertilizer_model.json",
            Task::WeatherForecast => "weather_model.json",
        }
    }

    pub fn schema(self) -> FeatureSchema {
        match self {
            Task::CropRecommend => CROP_RECOMMEND_COLUMNS,
            Task::YieldPredict => YIELD_COLUMNS,
            Task::FertilizerRecommend => FERTILIZER_COLUMNS,
            Task::WeatherForecast => WEATHER_COLUMNS,
        }
    }

    /// Categorical inputs, in the order they are validated.
    pub fn inputs(self) -> &'static [Vocabulary] {
        match self {
            Task::CropRecommend | Task::WeatherForecast => &[],
            Task::YieldPredict => &[Vocabulary::Crop],
            Task::FertilizerRecommend => &[Vocabulary::SoilType, Vocabulary::CropType],
        }
    }

    pub fn output(self) -> Output {
        match self {
            Task::CropRecommend => Output::Label(Vocabulary::CropLabel),
            Task::YieldPredict => Output::Quantity { unit: YIELD_UNIT },
            Task::FertilizerRecommend => Output::Label(Vocabulary::Fertilizer),
            Task::WeatherForecast => Output::Label(Vocabulary::Rain),
        }
    }

    /// Every encoder the task needs loaded before it can serve.
    pub fn vocabularies(self) -> Vec<Vocabulary> {
        let mut all = self.inputs().to_vec();
        if let Output::Label(vocabulary) = self.output() {
            all.push(vocabulary);
        }
        all
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Vocabulary {
    pub fn file(self) -> &'static str {
        match self {
            Vocabulary::CropLabel => "crop_label_encoder.json",
            Vocabulary::Crop => "crop_encoder.json",
            Vocabulary::SoilType => "soil_encoder.json",
            Vocabulary::CropType => "croptype_encoder.json",
            Vocabulary::Fertilizer => "fertilizer_encoder.json",
            Vocabulary::Rain => "rain_encoder.json",
        }
    }

    /// Used in client-facing messages, e.g. "Unknown soil type: Peaty".
    pub fn noun(self) -> &'static str {
        match self {
            Vocabulary::CropLabel | Vocabulary::Crop => "crop",
            Vocabulary::SoilType => "soil type",
            Vocabulary::CropType => "crop type",
            Vocabulary::Fertilizer => "fertilizer",
            Vocabulary::Rain => "rain outcome",
        }
    }

    /// Feature column holding the encoded value, for input vocabularies.
    pub fn column(self) -> Option<&'static str> {
        match self {
            Vocabulary::Crop => Some("Crop_encoded"),
            Vocabulary::SoilType => Some("Soil_encoded"),
            Vocabulary::CropType => Some("CropType_encoded"),
            Vocabulary::CropLabel | Vocabulary::Fertilizer | Vocabulary::Rain => None,
        }
    }
}
