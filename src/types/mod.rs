mod errors;
mod timestamp;

pub use timestamp::{DateOfBirth, Timestamp};

pub type EpochSeconds = i64;
