use crate::features::preprocess;
use crate::models::{ScoredTransaction, ScreeningError, Transaction};
use crate::report::render_table;
use crate::scoring::Classifier;
use csv::{ReaderBuilder, Trim, WriterBuilder};
use std::fs;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tracing::info;

/// Side-effect paths for a screening run.
///
/// Both files are overwritten on every run, which matches the original
/// single-user behavior; concurrent runs against the same paths are not
/// supported.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Where the raw upload is copied before processing.
    pub upload_copy_path: PathBuf,
    /// Where the scored table (original columns plus `is_fraud`) is written.
    pub processed_csv_path: PathBuf
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            upload_copy_path: PathBuf::from("uploaded_file.csv"),
            processed_csv_path: PathBuf::from("processed_data.csv")
        }
    }
}

/// Request-scoped screening pipeline.
///
/// Owns the classifier and the side-effect paths so handlers receive an
/// explicitly constructed context instead of reaching for process globals.
/// The classifier is loaded once and shared read-only across runs.
pub struct ScreeningPipeline<C: Classifier> {
    classifier: C,
    config: PipelineConfig
}

impl<C: Classifier> ScreeningPipeline<C> {
    pub fn new(classifier: C) -> Self {
        Self {
            classifier,
            config: PipelineConfig::default()
        }
    }

    pub fn with_config(classifier: C, config: PipelineConfig) -> Self {
        Self { classifier, config }
    }

    /// Screens one uploaded CSV end to end and returns the HTML fragment.
    ///
    /// Copies the upload aside, deserializes the batch, builds the feature
    /// table, scores it, attaches predictions back onto the raw records by
    /// row order, exports the processed CSV, and renders the review table.
    ///
    /// # Errors
    /// Any malformed row, preprocessing precondition failure, or scoring
    /// failure aborts the whole run with a typed `ScreeningError`.
    pub fn run(&self, path: &str) -> Result<String, ScreeningError> {
        fs::copy(path, &self.config.upload_copy_path)?;

        let records = self.ingest(path)?;
        info!("Ingested {} transactions from [{path}]", records.len());

        let features = preprocess(&records)?;
        let labels = self.classifier.predict(&features)?;

        if labels.len() != records.len() {
            return Err(ScreeningError::scoring_failure(format!(
                "classifier returned {} labels for {} rows",
                labels.len(),
                records.len()
            )));
        }

        let scored: Vec<ScoredTransaction> = records.into_iter()
            .zip(labels)
            .map(|(transaction, is_fraud)| ScoredTransaction { transaction, is_fraud })
            .collect();

        let flagged = scored.iter().filter(|row| row.is_fraud == 1).count();
        info!("Scored {} transactions, {flagged} flagged as likely fraud", scored.len());

        self.export_processed(&scored)?;

        let mut buffer = Vec::new();
        render_table(&mut buffer, &scored)?;

        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    fn ingest(&self, path: &str) -> Result<Vec<Transaction>, ScreeningError> {
        let file = File::open(path)?;

        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .from_reader(BufReader::new(file));

        let mut records = Vec::new();

        for result in reader.deserialize::<Transaction>() {
            records.push(result.map_err(|error| ScreeningError::bad_input_schema(&error))?);
        }

        Ok(records)
    }

    fn export_processed(&self, scored: &[ScoredTransaction]) -> Result<(), ScreeningError> {
        let mut writer = WriterBuilder::new().from_writer(File::create(&self.config.processed_csv_path)?);

        writer.write_record([
            "trans_date_trans_time", "cc_num", "merchant", "category", "amt",
            "first", "last", "gender", "street", "city", "state", "zip",
            "lat", "long", "city_pop", "job", "dob", "trans_num", "unix_time",
            "merch_lat", "merch_long", "is_fraud"
        ])?;

        for row in scored {
            let transaction = &row.transaction;

            writer.write_record([
                transaction.timestamp.to_string(),
                transaction.card_number.clone(),
                transaction.merchant.clone(),
                transaction.category.clone(),
                transaction.amount.to_string(),
                transaction.first_name.clone(),
                transaction.last_name.clone(),
                transaction.gender.to_string(),
                transaction.street.clone(),
                transaction.city.clone(),
                transaction.state.clone(),
                transaction.zip.to_string(),
                transaction.lat.to_string(),
                transaction.long.to_string(),
                transaction.city_pop.to_string(),
                transaction.job.clone(),
                transaction.dob.to_string(),
                transaction.transaction_id.clone(),
                transaction.unix_time.to_string(),
                transaction.merch_lat.to_string(),
                transaction.merch_long.to_string(),
                row.is_fraud.to_string()
            ])?;
        }

        writer.flush()?;
        info!("Wrote processed CSV to [{}]", self.config.processed_csv_path.display());

        Ok(())
    }
}
