use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimestampError {
    #[error("Timestamp error: value [{value}] does not match format [{format}]")]
    InvalidFormat {
        value: String,
        format: &'static str
    }
}
