//! Credit Prediction Demo Client Library
//!
//! This library provides the core functionality for the credit prediction
//! demo dashboard: loading the client sample database and the precomputed
//! SHAP explanation collection, building model feature vectors, calling the
//! remote prediction API, and shaping waterfall chart data.
//!
//! # Modules
//!
//! - `config`: Configuration management.
//! - `database`: Client sample database (CSV, read-only).
//! - `errors`: Error handling types.
//! - `explanations`: Precomputed SHAP explanation collection.
//! - `features`: Feature vector builder and sanitization.
//! - `models`: Core data models.
//! - `prediction_client`: Prediction API client.
//! - `waterfall`: Waterfall chart data and rendering.

pub mod config;
pub mod database;
pub mod errors;
pub mod explanations;
pub mod features;
pub mod models;
pub mod prediction_client;
pub mod waterfall;
