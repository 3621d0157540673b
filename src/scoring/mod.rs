mod model;

pub use model::LogisticModel;

use crate::features::FeatureTable;
use crate::models::ScreeningError;

/// The scoring seam between the pipeline and the pre-trained model.
///
/// Implementations are stateless and deterministic: one binary label per
/// feature row, in row order.
pub trait Classifier {
    fn predict(&self, features: &FeatureTable) -> Result<Vec<u8>, ScreeningError>;
}
