mod heuristic;

pub use heuristic::{label_time_gaps, FLAG_GAP_SECONDS};
