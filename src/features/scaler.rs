use crate::models::ScreeningError;

/// Rescales a column to zero mean and unit variance in place.
///
/// Statistics come from the current batch only; nothing is persisted between
/// runs. Uses the population standard deviation, matching how the model's
/// training pipeline scaled its input.
pub fn standardize(values: &mut [f64], column: &'static str) -> Result<(), ScreeningError> {
    if values.is_empty() {
        return Err(ScreeningError::EmptyInput);
    }

    let count = values.len() as f64;
    let mean = values.iter().sum::<f64>() / count;
    let variance = values.iter().map(|value| (value - mean).powi(2)).sum::<f64>() / count;
    let std_dev = variance.sqrt();

    if std_dev == 0.0 {
        return Err(ScreeningError::zero_variance(column));
    }

    for value in values.iter_mut() {
        *value = (*value - mean) / std_dev;
    }

    Ok(())
}
