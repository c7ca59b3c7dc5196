//! Startup snapshot of every model and encoder the service can use.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use thiserror::Error;
use tracing::{error, info};

use super::encoder::{EncoderError, LabelEncoder};
use super::model::{ModelArtifact, ModelError, OutputKind, Scorer};
use super::task::{Output, Task, Vocabulary};

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Encoder(#[from] EncoderError),

    #[error("{task} needs encoder {file}")]
    MissingEncoder { task: Task, file: &'static str },

    #[error("{task} model takes {actual} features, expected {expected}")]
    Width {
        task: Task,
        expected: usize,
        actual: usize,
    },

    #[error("{task} model has the wrong output kind: {actual:?}")]
    OutputKind { task: Task, actual: OutputKind },

    #[error("{task} model predicts {classes} classes but {file} lists {labels}")]
    ClassCount {
        task: Task,
        file: &'static str,
        classes: usize,
        labels: usize,
    },
}

/// A loaded model plus the encoders its task depends on.
pub struct TaskModel {
    scorer: Box<dyn Scorer>,
    encoders: HashMap<Vocabulary, LabelEncoder>,
}

impl TaskModel {
    pub fn new(scorer: impl Scorer + 'static) -> Self {
        Self {
            scorer: Box::new(scorer),
            encoders: HashMap::new(),
        }
    }

    pub fn with_encoder(mut self, vocabulary: Vocabulary, encoder: LabelEncoder) -> Self {
        self.encoders.insert(vocabulary, encoder);
        self
    }

    pub fn scorer(&self) -> &dyn Scorer {
        self.scorer.as_ref()
    }

    pub fn encoder(&self, vocabulary: Vocabulary) -> Option<&LabelEncoder> {
        self.encoders.get(&vocabulary)
    }

    fn validate(&self, task: Task) -> Result<(), RegistryError> {
        let expected = task.schema().width();
        let actual = self.scorer.input_width();
        if expected != actual {
            return Err(RegistryError::Width {
                task,
                expected,
                actual,
            });
        }

        for vocabulary in task.vocabularies() {
            if !self.encoders.contains_key(&vocabulary) {
                return Err(RegistryError::MissingEncoder {
                    task,
                    file: vocabulary.file(),
                });
            }
        }

        match (task.output(), self.scorer.output()) {
            (Output::Quantity { .. }, OutputKind::Continuous) => Ok(()),
            (Output::Label(vocabulary), OutputKind::Classes(classes)) => {
                let labels = self.encoders.get(&vocabulary).map_or(0, LabelEncoder::len);
                if classes == labels {
                    Ok(())
                } else {
                    Err(RegistryError::ClassCount {
                        task,
                        file: vocabulary.file(),
                        classes,
                        labels,
                    })
                }
            }
            (_, actual) => Err(RegistryError::OutputKind { task, actual }),
        }
    }
}

/// Immutable after construction; share it behind an `Arc`.
#[derive(Default)]
pub struct Registry {
    tasks: BTreeMap<Task, TaskModel>,
}

impl Registry {
    /// Load every task whose model file exists under `dir`.
    ///
    /// A task with no model file is skipped. A task whose artifacts fail to
    /// load is logged and skipped; the other tasks are unaffected.
    pub fn load(dir: &Path) -> Self {
        let mut registry = Self::default();
        for task in Task::ALL {
            let path = dir.join(task.model_file());
            if !path.exists() {
                info!(task = %task, path = %path.display(), "Model artifact absent, endpoint unavailable");
                continue;
            }
            match load_task(dir, task) {
                Ok(model) => {
                    info!(task = %task, path = %path.display(), "Model loaded");
                    registry.tasks.insert(task, model);
                }
                Err(e) => {
                    error!(task = %task, error = %e, "Failed to load model, endpoint unavailable");
                }
            }
        }
        info!(
            loaded = registry.tasks.len(),
            total = Task::ALL.len(),
            "Model registry ready"
        );
        registry
    }

    pub fn with_task(mut self, task: Task, model: TaskModel) -> Result<Self, RegistryError> {
        model.validate(task)?;
        self.tasks.insert(task, model);
        Ok(self)
    }

    pub fn get(&self, task: Task) -> Option<&TaskModel> {
        self.tasks.get(&task)
    }

    pub fn available(&self) -> Vec<Task> {
        self.tasks.keys().copied().collect()
    }
}

fn load_task(dir: &Path, task: Task) -> Result<TaskModel, RegistryError> {
    let artifact = ModelArtifact::load(&dir.join(task.model_file()))?;
    let mut model = TaskModel::new(artifact);
    for vocabulary in task.vocabularies() {
        let path = dir.join(vocabulary.file());
        if !path.exists() {
            return Err(RegistryError::MissingEncoder {
                task,
                file: vocabulary.file(),
            });
        }
        model = model.with_encoder(vocabulary, LabelEncoder::load(&path)?);
    }
    model.validate(task)?;
    Ok(model)
}
