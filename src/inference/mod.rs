//! Model loading and the typed prediction protocol behind every endpoint.

pub mod encoder;
pub mod model;
pub mod pipeline;
pub mod registry;
pub mod request;
pub mod schema;
pub mod task;

pub use encoder::{EncoderError, LabelEncoder};
pub use model::{ModelArtifact, ModelError, OutputKind, Score, Scorer};
pub use pipeline::{predict, round2, PredictError, Prediction};
pub use registry::{Registry, RegistryError, TaskModel};
pub use request::{CropRecommendInput, FertilizerInput, TaskInput, WeatherInput, YieldPredictionInput};
pub use schema::{FeatureSchema, SchemaError};
pub use task::{Output, Task, Vocabulary, YIELD_UNIT};
