//! The shared prediction protocol: resolve the model, validate and encode
//! categories, assemble the row, score, decode.

use thiserror::Error;
use tracing::debug;

use super::model::{ModelError, Score};
use super::registry::Registry;
use super::request::TaskInput;
use super::schema::SchemaError;
use super::task::{Output, Task, Vocabulary};

#[derive(Error, Debug)]
pub enum PredictError {
    #[error("{} model not loaded", .0.title())]
    ModelUnavailable(Task),

    #[error("Unknown {}: {value}", .vocabulary.noun())]
    UnknownCategory {
        vocabulary: Vocabulary,
        value: String,
    },

    #[error("Prediction error: {0}")]
    Failure(String),
}

impl From<SchemaError> for PredictError {
    fn from(e: SchemaError) -> Self {
        PredictError::Failure(e.to_string())
    }
}

impl From<ModelError> for PredictError {
    fn from(e: ModelError) -> Self {
        PredictError::Failure(e.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Prediction {
    Label(String),
    Quantity { value: f64, unit: &'static str },
}

/// Round to two decimal places, exact halves to even.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

pub fn predict<I: TaskInput>(registry: &Registry, input: &I) -> Result<Prediction, PredictError> {
    let task = I::TASK;
    let model = registry
        .get(task)
        .ok_or(PredictError::ModelUnavailable(task))?;

    // Every category is checked before any scoring work.
    let mut codes = Vec::new();
    for (vocabulary, value) in input.categories() {
        let encoder = model.encoder(vocabulary).ok_or_else(|| {
            PredictError::Failure(format!("no encoder loaded for {}", vocabulary.file()))
        })?;
        let code = encoder
            .encode(value)
            .ok_or_else(|| PredictError::UnknownCategory {
                vocabulary,
                value: value.to_string(),
            })?;
        codes.push((vocabulary, code));
    }

    let mut row = task.schema().row();
    for (column, value) in input.numeric() {
        row.set(column, value)?;
    }
    for (vocabulary, code) in codes {
        let column = vocabulary.column().ok_or_else(|| {
            PredictError::Failure(format!("{} is not an input vocabulary", vocabulary.noun()))
        })?;
        row.set(column, code as f32)?;
    }
    let features = row.finish()?;

    // Scorers assume a correctly sized row; this is the only width check.
    let scorer = model.scorer();
    if features.len() != scorer.input_width() {
        return Err(ModelError::Width {
            expected: scorer.input_width(),
            actual: features.len(),
        }
        .into());
    }

    let score = scorer.score(&features)?;
    debug!(task = %task, ?features, ?score, "Scored request");

    match (task.output(), score) {
        (Output::Quantity { unit }, Score::Value(value)) => {
            let value = f64::from(value);
            if !value.is_finite() {
                return Err(PredictError::Failure(format!(
                    "model produced a non-finite value: {value}"
                )));
            }
            Ok(Prediction::Quantity {
                value: round2(value),
                unit,
            })
        }
        (Output::Label(vocabulary), Score::Class(code)) => model
            .encoder(vocabulary)
            .and_then(|encoder| encoder.decode(code))
            .map(|label| Prediction::Label(label.to_string()))
            .ok_or_else(|| {
                PredictError::Failure(format!(
                    "class code {code} is not in {}",
                    vocabulary.file()
                ))
            }),
        (_, score) => Err(PredictError::Failure(format!(
            "unexpected model output {score:?}"
        ))),
    }
}
