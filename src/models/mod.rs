mod errors;
mod transaction;

use serde::Deserialize;
use std::fmt;
use std::fmt::{Display, Formatter};

pub use errors::ScreeningError;
pub use transaction::{ScoredTransaction, Transaction};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female
}

impl Gender {
    /// Numeric code expected by the classifier: M = 1, F = 0.
    pub fn code(&self) -> f64 {
        match self {
            Gender::Male => 1.0,
            Gender::Female => 0.0
        }
    }
}

impl Display for Gender {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(formatter, "M"),
            Gender::Female => write!(formatter, "F")
        }
    }
}
