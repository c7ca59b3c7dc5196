//! Label encoders: bidirectional mapping between category strings and the
//! integer codes the models were trained on.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EncoderError {
    #[error("failed to read encoder {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse encoder {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("encoder {0} has no classes")]
    Empty(String),
}

/// Codes are indices into the sorted, de-duplicated class list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn from_classes<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut classes: Vec<String> = classes.into_iter().map(Into::into).collect();
        classes.sort();
        classes.dedup();
        Self { classes }
    }

    /// Load an encoder file of the form `{"classes": [...]}`.
    pub fn load(path: &Path) -> Result<Self, EncoderError> {
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| EncoderError::Io {
            path: display.clone(),
            source,
        })?;
        let parsed: LabelEncoder = serde_json::from_str(&raw).map_err(|source| EncoderError::Json {
            path: display.clone(),
            source,
        })?;
        if parsed.classes.is_empty() {
            return Err(EncoderError::Empty(display));
        }
        // Files written by hand may not be sorted.
        Ok(Self::from_classes(parsed.classes))
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.encode(value).is_some()
    }

    pub fn encode(&self, value: &str) -> Option<usize> {
        self.classes
            .binary_search_by(|class| class.as_str().cmp(value))
            .ok()
    }

    pub fn decode(&self, code: usize) -> Option<&str> {
        self.classes.get(code).map(String::as_str)
    }
}
