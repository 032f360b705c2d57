use crate::errors::{AppError, ResultExt};
use flate2::read::GzDecoder;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Precomputed SHAP explanation for one database row.
///
/// `values[i]` is the attribution of `feature_names[i]`, `data[i]` the
/// feature's input value, and `base_value` the model's baseline output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub values: Vec<f64>,
    pub base_value: f64,
    pub data: Vec<f64>,
    pub feature_names: Vec<String>,
}

impl Explanation {
    /// Rebuilds this explanation with its features in the given display
    /// order, dropping any requested feature the explanation does not carry.
    ///
    /// Attribution values and data stay aligned with their feature names.
    pub fn reordered(&self, display_order: &[&str]) -> Explanation {
        let feature_to_index: HashMap<&str, usize> = self
            .feature_names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), i))
            .collect();

        let indices: Vec<usize> = display_order
            .iter()
            .filter_map(|name| feature_to_index.get(name).copied())
            .collect();

        Explanation {
            values: indices.iter().map(|&i| self.values[i]).collect(),
            base_value: self.base_value,
            data: indices.iter().map(|&i| self.data[i]).collect(),
            feature_names: indices
                .iter()
                .map(|&i| self.feature_names[i].clone())
                .collect(),
        }
    }
}

/// The precomputed explanation collection, one entry per database row in the
/// same row order. Loaded once, read-only thereafter.
#[derive(Debug, Clone)]
pub struct ExplanationSet {
    entries: Vec<Explanation>,
}

impl ExplanationSet {
    /// Loads the collection from a gzip-compressed JSON array.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            AppError::NotFound(format!(
                "SHAP values file '{}' could not be opened: {}",
                path.display(),
                e
            ))
        })?;
        let set = Self::from_reader(GzDecoder::new(file))
            .with_context(|| format!("decoding '{}'", path.display()))?;
        tracing::info!(
            "Loaded {} SHAP explanations from {}",
            set.len(),
            path.display()
        );
        Ok(set)
    }

    /// Decodes an already-decompressed JSON stream of explanation entries.
    pub fn from_reader(reader: impl Read) -> Result<Self, AppError> {
        let entries: Vec<Explanation> = serde_json::from_reader(reader)
            .map_err(|e| AppError::InternalError(format!("invalid SHAP values file: {}", e)))?;

        for (position, entry) in entries.iter().enumerate() {
            if entry.values.len() != entry.feature_names.len()
                || entry.data.len() != entry.feature_names.len()
            {
                return Err(AppError::InternalError(format!(
                    "SHAP entry {} is inconsistent: {} values, {} data, {} feature names",
                    position,
                    entry.values.len(),
                    entry.data.len(),
                    entry.feature_names.len()
                )));
            }
        }

        Ok(Self { entries })
    }

    /// Number of explanation entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Selects the explanation at a database row position.
    ///
    /// Out-of-range positions are reported, never a panic; the caller omits
    /// the chart for that action.
    pub fn select(&self, position: usize) -> Result<&Explanation, AppError> {
        self.entries.get(position).ok_or_else(|| {
            AppError::BadRequest(format!(
                "explanation position {} is invalid (max = {})",
                position,
                self.entries.len().saturating_sub(1)
            ))
        })
    }
}
