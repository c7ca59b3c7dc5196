//! Agri Assistant: a JSON API over four pre-trained tabular models for crop
//! recommendation, yield prediction, fertilizer recommendation and rain
//! forecasting.

pub mod cli;
pub mod inference;
pub mod server;
