use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScreeningError {
    #[error("Input schema is invalid: {reason}")]
    BadInputSchema {
        reason: String
    },
    #[error("Input contains no transactions")]
    EmptyInput,
    #[error("Column [{column}] has zero variance and cannot be standardized")]
    ZeroVariance {
        column: &'static str
    },
    #[error("No encoding exists for value [{value}] in column [{column}]")]
    UnseenCategory {
        column: &'static str,
        value: String
    },
    #[error("Model artifact at [{path}] could not be loaded: {reason}")]
    ModelLoad {
        path: String,
        reason: String
    },
    #[error("Scoring failed: {reason}")]
    ScoringFailure {
        reason: String
    },
    #[error("Failed to write processed CSV: {0}")]
    Export(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error)
}

impl ScreeningError {
    //NOTE: Factory constructors keep call sites short where the same variant is
    //      built from several error sources.

    pub fn bad_input_schema(error: &csv::Error) -> Self {
        Self::BadInputSchema { reason: error.to_string() }
    }

    pub fn zero_variance(column: &'static str) -> Self {
        Self::ZeroVariance { column }
    }

    pub fn unseen_category(column: &'static str, value: &str) -> Self {
        Self::UnseenCategory {
            column,
            value: value.to_string()
        }
    }

    pub fn model_load(path: &str, reason: impl ToString) -> Self {
        Self::ModelLoad {
            path: path.to_string(),
            reason: reason.to_string()
        }
    }

    pub fn scoring_failure(reason: impl ToString) -> Self {
        Self::ScoringFailure { reason: reason.to_string() }
    }
}
