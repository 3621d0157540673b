use crate::features::{encoder, scaler};
use crate::labeler::label_time_gaps;
use crate::models::{ScreeningError, Transaction};
use crate::types::EpochSeconds;
use rust_decimal::prelude::ToPrimitive;
use tracing::debug;

/// Feature columns in the exact order the pre-trained classifier expects:
/// the raw table's column order with the identifier columns removed.
pub const FEATURE_COLUMNS: [&str; 19] = [
    "trans_date_trans_time",
    "merchant",
    "category",
    "amt",
    "first",
    "last",
    "gender",
    "street",
    "city",
    "state",
    "zip",
    "lat",
    "long",
    "city_pop",
    "job",
    "dob",
    "unix_time",
    "merch_lat",
    "merch_long"
];

/// A fully numeric table derived from a batch of transactions.
///
/// Same row count and row order as the input batch. One column per entry in
/// [`FEATURE_COLUMNS`].
#[derive(Debug, Clone)]
pub struct FeatureTable {
    rows: Vec<Vec<f64>>
}

impl FeatureTable {
    #[cfg(test)]
    pub(crate) fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn width(&self) -> usize {
        FEATURE_COLUMNS.len()
    }
}

/// Transforms a raw transaction batch into the classifier's feature table.
///
/// Reproduces the training pipeline exactly: drop identifiers, convert the
/// timestamp and date of birth to epoch seconds, derive provisional flags
/// over the timestamp-sorted view, standardize the numeric columns with
/// batch statistics, target-encode the categorical columns against the
/// provisional flags, and map gender to its binary code. The provisional
/// flags never appear in the output.
///
/// # Errors
/// Returns `ScreeningError` if the batch is empty or any designated numeric
/// column has zero variance.
pub fn preprocess(records: &[Transaction]) -> Result<FeatureTable, ScreeningError> {
    if records.is_empty() {
        return Err(ScreeningError::EmptyInput);
    }

    let flags = provisional_flags(records);

    debug!(
        "Derived provisional flags for {} transactions ({} flagged)",
        records.len(),
        flags.iter().filter(|&&flag| flag == 1).count()
    );

    let mut timestamps = numeric_column(records, |record| record.timestamp.epoch() as f64);
    let mut amounts = numeric_column(records, |record| record.amount.to_f64().unwrap_or_default());
    let mut zips = numeric_column(records, |record| f64::from(record.zip));
    let mut latitudes = numeric_column(records, |record| record.lat);
    let mut longitudes = numeric_column(records, |record| record.long);
    let mut populations = numeric_column(records, |record| record.city_pop as f64);
    let mut birth_dates = numeric_column(records, |record| record.dob.epoch() as f64);
    let mut unix_times = numeric_column(records, |record| record.unix_time as f64);
    let mut merchant_latitudes = numeric_column(records, |record| record.merch_lat);
    let mut merchant_longitudes = numeric_column(records, |record| record.merch_long);

    scaler::standardize(&mut timestamps, "trans_date_trans_time")?;
    scaler::standardize(&mut amounts, "amt")?;
    scaler::standardize(&mut zips, "zip")?;
    scaler::standardize(&mut latitudes, "lat")?;
    scaler::standardize(&mut longitudes, "long")?;
    scaler::standardize(&mut populations, "city_pop")?;
    scaler::standardize(&mut birth_dates, "dob")?;
    scaler::standardize(&mut unix_times, "unix_time")?;
    scaler::standardize(&mut merchant_latitudes, "merch_lat")?;
    scaler::standardize(&mut merchant_longitudes, "merch_long")?;

    let merchants = encode_column(records, &flags, "merchant", |record| record.merchant.as_str())?;
    let categories = encode_column(records, &flags, "category", |record| record.category.as_str())?;
    let first_names = encode_column(records, &flags, "first", |record| record.first_name.as_str())?;
    let last_names = encode_column(records, &flags, "last", |record| record.last_name.as_str())?;
    let streets = encode_column(records, &flags, "street", |record| record.street.as_str())?;
    let cities = encode_column(records, &flags, "city", |record| record.city.as_str())?;
    let states = encode_column(records, &flags, "state", |record| record.state.as_str())?;
    let jobs = encode_column(records, &flags, "job", |record| record.job.as_str())?;

    let rows = (0..records.len())
        .map(|index| {
            vec![
                timestamps[index],
                merchants[index],
                categories[index],
                amounts[index],
                first_names[index],
                last_names[index],
                records[index].gender.code(),
                streets[index],
                cities[index],
                states[index],
                zips[index],
                latitudes[index],
                longitudes[index],
                populations[index],
                jobs[index],
                birth_dates[index],
                unix_times[index],
                merchant_latitudes[index],
                merchant_longitudes[index]
            ]
        })
        .collect();

    Ok(FeatureTable { rows })
}

/// Provisional flags in the batch's original row order.
///
/// The seven-day gap rule is defined over the timestamp-sorted view, so the
/// records are ordered internally and the resulting flags are mapped back to
/// their source positions.
pub(crate) fn provisional_flags(records: &[Transaction]) -> Vec<u8> {
    let mut order: Vec<usize> = (0..records.len()).collect();
    order.sort_by_key(|&index| records[index].timestamp);

    let sorted_timestamps: Vec<EpochSeconds> = order.iter()
        .map(|&index| records[index].timestamp.epoch())
        .collect();

    let sorted_flags = label_time_gaps(&sorted_timestamps);
    let mut flags = vec![0u8; records.len()];

    for (position, &index) in order.iter().enumerate() {
        flags[index] = sorted_flags[position];
    }

    flags
}

fn numeric_column<F>(records: &[Transaction], extract: F) -> Vec<f64>
where
    F: Fn(&Transaction) -> f64,
{
    records.iter().map(extract).collect()
}

fn encode_column<F>(
    records: &[Transaction],
    flags: &[u8],
    column: &'static str,
    extract: F
) -> Result<Vec<f64>, ScreeningError>
where
    F: Fn(&Transaction) -> &str,
{
    let values: Vec<&str> = records.iter().map(|record| extract(record)).collect();
    encoder::target_encode(&values, flags, column)
}
