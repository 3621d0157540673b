use crate::features::{FeatureTable, FEATURE_COLUMNS};
use crate::models::ScreeningError;
use crate::scoring::Classifier;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use tracing::info;

/// A pre-trained logistic classifier deserialized from a JSON artifact.
///
/// The artifact is produced by the offline training pipeline and loaded once
/// at process start; it is never mutated. Training logic lives elsewhere.
#[derive(Debug, Clone, Deserialize)]
pub struct LogisticModel {
    /// One weight per feature column, in `FEATURE_COLUMNS` order.
    weights: Vec<f64>,
    /// Intercept term.
    bias: f64,
    /// Decision threshold on the fraud probability.
    threshold: f64
}

impl LogisticModel {
    /// Loads the model artifact from disk and validates its shape against
    /// the feature contract.
    pub fn load(path: &str) -> Result<Self, ScreeningError> {
        let file = File::open(path)
            .map_err(|error| ScreeningError::model_load(path, error))?;

        let model: LogisticModel = serde_json::from_reader(BufReader::new(file))
            .map_err(|error| ScreeningError::model_load(path, error))?;

        if model.weights.len() != FEATURE_COLUMNS.len() {
            return Err(ScreeningError::model_load(
                path,
                format!(
                    "expected {} weights, artifact has {}",
                    FEATURE_COLUMNS.len(),
                    model.weights.len()
                )
            ));
        }

        info!("Loaded model artifact from [{path}] (threshold {})", model.threshold);

        Ok(model)
    }

    fn probability(&self, row: &[f64]) -> f64 {
        let logit: f64 = row.iter()
            .zip(&self.weights)
            .map(|(feature, weight)| feature * weight)
            .sum::<f64>() + self.bias;

        1.0 / (1.0 + (-logit).exp())
    }
}

impl Classifier for LogisticModel {
    fn predict(&self, features: &FeatureTable) -> Result<Vec<u8>, ScreeningError> {
        features.rows()
            .iter()
            .map(|row| {
                if row.len() != self.weights.len() {
                    return Err(ScreeningError::scoring_failure(format!(
                        "feature row has {} columns, model expects {}",
                        row.len(),
                        self.weights.len()
                    )));
                }

                Ok(u8::from(self.probability(row) >= self.threshold))
            })
            .collect()
    }
}
