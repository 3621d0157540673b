use crate::models::ScreeningError;
use std::collections::HashMap;

/// Replaces each categorical value with the mean of the provisional fraud
/// flag among rows sharing that value.
///
/// The encoding map is built fresh from the batch being encoded, so every
/// value present in `values` has a mapping. The `UnseenCategory` arm keeps
/// the failure class typed should the encoder ever run against a map built
/// elsewhere.
pub fn target_encode(
    values: &[&str],
    flags: &[u8],
    column: &'static str
) -> Result<Vec<f64>, ScreeningError> {
    debug_assert_eq!(values.len(), flags.len());

    let mut totals: HashMap<&str, (f64, f64)> = HashMap::new();

    for (value, flag) in values.iter().zip(flags) {
        let entry = totals.entry(value).or_insert((0.0, 0.0));
        entry.0 += f64::from(*flag);
        entry.1 += 1.0;
    }

    values.iter()
        .map(|value| {
            totals.get(value)
                .map(|(flag_sum, count)| flag_sum / count)
                .ok_or_else(|| ScreeningError::unseen_category(column, value))
        })
        .collect()
}
