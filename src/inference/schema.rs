//! Name-to-position binding for model input columns.
//!
//! Models see a bare vector, so column order must match training order
//! exactly. Rows are built by column name and ordered by the schema alone.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SchemaError {
    #[error("unknown feature column {0}")]
    UnknownColumn(String),

    #[error("feature column {0} set twice")]
    DuplicateColumn(&'static str),

    #[error("feature column {0} was not set")]
    MissingColumn(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureSchema {
    columns: &'static [&'static str],
}

impl FeatureSchema {
    pub const fn new(columns: &'static [&'static str]) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        self.columns
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| *column == name)
    }

    pub fn row(&self) -> RowBuilder {
        RowBuilder {
            schema: *self,
            values: vec![None; self.columns.len()],
        }
    }
}

pub struct RowBuilder {
    schema: FeatureSchema,
    values: Vec<Option<f32>>,
}

impl RowBuilder {
    pub fn set(&mut self, name: &str, value: f32) -> Result<&mut Self, SchemaError> {
        let index = self
            .schema
            .position(name)
            .ok_or_else(|| SchemaError::UnknownColumn(name.to_string()))?;
        let slot = &mut self.values[index];
        if slot.is_some() {
            return Err(SchemaError::DuplicateColumn(self.schema.columns[index]));
        }
        *slot = Some(value);
        Ok(self)
    }

    pub fn finish(self) -> Result<Vec<f32>, SchemaError> {
        let columns = self.schema.columns;
        self.values
            .into_iter()
            .zip(columns.iter().copied())
            .map(|(value, column)| value.ok_or(SchemaError::MissingColumn(column)))
            .collect()
    }
}
