//! Model artifacts and the scoring capability the handlers depend on.

use std::path::Path;

use gbdt::decision_tree::{Data, DataVec, PredVec};
use gbdt::gradient_boost::GBDT;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("failed to read model {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse model {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("feature vector has {actual} columns, model expects {expected}")]
    Width { expected: usize, actual: usize },

    #[error("artifact declares {declared} features but its trees were trained on {trained}")]
    TrainedWidth { declared: usize, trained: usize },

    #[error("failed to inspect trained model: {0}")]
    Inspect(#[source] serde_json::Error),

    #[error("model produced no output")]
    NoOutput,

    #[error("classifier has no members")]
    NoClasses,
}

/// What a scorer hands back for a single row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Score {
    Value(f32),
    Class(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Continuous,
    Classes(usize),
}

/// An immutable, already-trained model that can score one feature row.
pub trait Scorer: Send + Sync {
    /// Number of feature columns a row must carry.
    fn input_width(&self) -> usize;

    fn output(&self) -> OutputKind;

    /// Callers pass rows of exactly `input_width()` columns.
    fn score(&self, row: &[f32]) -> Result<Score, ModelError>;
}

/// The part of a serialized `GBDT` that records its training width.
#[derive(Deserialize)]
struct TrainedConf {
    conf: TrainedFeatures,
}

#[derive(Deserialize)]
struct TrainedFeatures {
    feature_size: usize,
}

fn trained_width(model: &GBDT) -> Result<usize, ModelError> {
    let value = serde_json::to_value(model).map_err(ModelError::Inspect)?;
    let header: TrainedConf = serde_json::from_value(value).map_err(ModelError::Inspect)?;
    Ok(header.conf.feature_size)
}

/// On-disk model artifact backed by gradient boosted trees.
#[derive(Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Regressor {
        feature_size: usize,
        model: GBDT,
    },
    /// One-vs-rest: member `i` scores class code `i`.
    Classifier {
        feature_size: usize,
        members: Vec<GBDT>,
    },
}

impl ModelArtifact {
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: display.clone(),
            source,
        })?;
        let artifact: ModelArtifact =
            serde_json::from_str(&raw).map_err(|source| ModelError::Json {
                path: display,
                source,
            })?;
        artifact.check_trained_width()?;
        Ok(artifact)
    }

    /// The declared `feature_size` must match what every tree set was
    /// trained on; gbdt panics on rows narrower than its split features.
    pub fn check_trained_width(&self) -> Result<(), ModelError> {
        let (declared, models): (usize, Vec<&GBDT>) = match self {
            ModelArtifact::Regressor {
                feature_size,
                model,
            } => (*feature_size, vec![model]),
            ModelArtifact::Classifier {
                feature_size,
                members,
            } => (*feature_size, members.iter().collect()),
        };
        if models.is_empty() {
            return Err(ModelError::NoClasses);
        }
        for model in models {
            let trained = trained_width(model)?;
            if trained != declared {
                return Err(ModelError::TrainedWidth { declared, trained });
            }
        }
        Ok(())
    }

    pub fn save(&self, path: &Path) -> Result<(), ModelError> {
        let display = path.display().to_string();
        let serialized = serde_json::to_string(self).map_err(|source| ModelError::Json {
            path: display.clone(),
            source,
        })?;
        std::fs::write(path, serialized).map_err(|source| ModelError::Io {
            path: display,
            source,
        })
    }
}

fn predict_one(model: &GBDT, row: &[f32]) -> Result<f32, ModelError> {
    let test_data: DataVec = vec![Data::new_test_data(row.to_vec(), None)];
    let predicted: PredVec = model.predict(&test_data);
    predicted.first().copied().ok_or(ModelError::NoOutput)
}

impl Scorer for ModelArtifact {
    fn input_width(&self) -> usize {
        match self {
            ModelArtifact::Regressor { feature_size, .. }
            | ModelArtifact::Classifier { feature_size, .. } => *feature_size,
        }
    }

    fn output(&self) -> OutputKind {
        match self {
            ModelArtifact::Regressor { .. } => OutputKind::Continuous,
            ModelArtifact::Classifier { members, .. } => OutputKind::Classes(members.len()),
        }
    }

    fn score(&self, row: &[f32]) -> Result<Score, ModelError> {
        match self {
            ModelArtifact::Regressor { model, .. } => predict_one(model, row).map(Score::Value),
            ModelArtifact::Classifier { members, .. } => {
                let mut best: Option<(usize, f32)> = None;
                for (code, member) in members.iter().enumerate() {
                    let value = predict_one(member, row)?;
                    // strict comparison keeps the lowest code on ties
                    if best.map_or(true, |(_, top)| value > top) {
                        best = Some((code, value));
                    }
                }
                best.map(|(code, _)| Score::Class(code))
                    .ok_or(ModelError::NoClasses)
            }
        }
    }
}
