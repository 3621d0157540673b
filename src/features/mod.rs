mod encoder;
mod preprocessor;
mod scaler;

pub use preprocessor::{preprocess, FeatureTable, FEATURE_COLUMNS};
