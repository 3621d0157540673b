use super::{PipelineConfig, ScreeningPipeline};

use std::fs;
use std::io::Write;

use anyhow::Result;
use tempfile::{tempdir, NamedTempFile, TempDir};

use crate::features::FeatureTable;
use crate::models::ScreeningError;
use crate::scoring::Classifier;

/// Deterministic stand-in for the pre-trained model.
struct StubClassifier {
    labels: Vec<u8>
}

impl Classifier for StubClassifier {
    fn predict(&self, features: &FeatureTable) -> Result<Vec<u8>, ScreeningError> {
        Ok((0..features.len())
            .map(|index| self.labels[index % self.labels.len()])
            .collect())
    }
}

const HEADER: &str = "trans_date_trans_time,cc_num,merchant,category,amt,first,last,gender,street,city,state,zip,lat,long,city_pop,job,dob,trans_num,unix_time,merch_lat,merch_long";

fn csv_row(seed: u32, timestamp: &str, amount: &str) -> String {
    format!(
        "{timestamp},40000000000{seed:05},shop_{seed},misc_net,{amount},Jennifer,Banks,F,{seed} Perry Cove,Moravian Falls,NC,{zip},{lat},{long},{pop},Psychologist,19{year:02}-03-09,tx{seed:08},{unix},{merch_lat},{merch_long}",
        zip = 28_000 + seed,
        lat = 36.0 + f64::from(seed),
        long = -81.0 - f64::from(seed),
        pop = 1_000 + seed * 10,
        year = 60 + seed % 30,
        unix = 1_300_000_000 + u64::from(seed) * 86_400,
        merch_lat = 35.0 + f64::from(seed),
        merch_long = -80.0 - f64::from(seed)
    )
}

fn write_csv(rows: &[String]) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "{HEADER}")?;

    for row in rows {
        writeln!(file, "{row}")?;
    }

    Ok(file)
}

fn pipeline_in(directory: &TempDir, labels: Vec<u8>) -> ScreeningPipeline<StubClassifier> {
    let config = PipelineConfig {
        upload_copy_path: directory.path().join("uploaded_file.csv"),
        processed_csv_path: directory.path().join("processed_data.csv")
    };

    ScreeningPipeline::with_config(StubClassifier { labels }, config)
}

fn input_path(file: &NamedTempFile) -> &str {
    file.path().to_str().expect("temp path is valid utf-8")
}

#[test]
fn test_pipeline_screens_a_batch_end_to_end() -> Result<()> {
    let directory = tempdir()?;
    let file = write_csv(&[
        csv_row(0, "2019-01-01 00:00:18", "4.97"),
        csv_row(1, "2019-01-04 12:30:00", "41.96"),
        csv_row(2, "2019-01-11 13:00:00", "94.63"),
        csv_row(3, "2019-02-01 09:15:00", "289.10")
    ])?;

    let pipeline = pipeline_in(&directory, vec![1, 0]);
    let html = pipeline.run(input_path(&file))?;

    assert!(html.starts_with("<table"));
    assert_eq!(html.matches("color: orange;").count(), 2);
    assert_eq!(html.matches("color: green;").count(), 2);

    Ok(())
}

#[test]
fn test_pipeline_writes_upload_copy_and_processed_csv() -> Result<()> {
    let directory = tempdir()?;
    let file = write_csv(&[
        csv_row(0, "2019-01-01 00:00:18", "4.97"),
        csv_row(1, "2019-01-04 12:30:00", "41.96")
    ])?;

    let pipeline = pipeline_in(&directory, vec![0]);
    pipeline.run(input_path(&file))?;

    let upload_copy = fs::read_to_string(directory.path().join("uploaded_file.csv"))?;
    assert_eq!(upload_copy, fs::read_to_string(file.path())?);

    let processed = fs::read_to_string(directory.path().join("processed_data.csv"))?;
    let lines: Vec<&str> = processed.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].ends_with(",is_fraud"));
    assert!(lines[1].ends_with(",0"));
    assert!(lines[2].ends_with(",0"));

    Ok(())
}

#[test]
fn test_pipeline_attaches_predictions_in_original_row_order() -> Result<()> {
    let directory = tempdir()?;

    // Newest transaction first: attachment must follow input order, not
    // timestamp order.
    let file = write_csv(&[
        csv_row(3, "2019-02-01 09:15:00", "289.10"),
        csv_row(0, "2019-01-01 00:00:18", "4.97"),
        csv_row(1, "2019-01-04 12:30:00", "41.96"),
        csv_row(2, "2019-01-11 13:00:00", "94.63")
    ])?;

    let pipeline = pipeline_in(&directory, vec![1, 0, 0, 1]);
    pipeline.run(input_path(&file))?;

    let processed = fs::read_to_string(directory.path().join("processed_data.csv"))?;
    let verdicts: Vec<&str> = processed.lines()
        .skip(1)
        .map(|line| line.rsplit(',').next().expect("row has fields"))
        .collect();

    assert_eq!(verdicts, vec!["1", "0", "0", "1"]);

    let identifiers: Vec<String> = processed.lines()
        .skip(1)
        .map(|line| line.split(',').nth(17).expect("row has trans_num").to_string())
        .collect();

    assert_eq!(identifiers, vec!["tx00000003", "tx00000000", "tx00000001", "tx00000002"]);

    Ok(())
}

#[test]
fn test_pipeline_rejects_csv_with_missing_columns() -> Result<()> {
    let directory = tempdir()?;

    let mut file = NamedTempFile::new()?;
    writeln!(file, "trans_date_trans_time,cc_num,merchant")?;
    writeln!(file, "2019-01-01 00:00:18,4000000000000000,shop_a")?;

    let pipeline = pipeline_in(&directory, vec![0]);
    let result = pipeline.run(input_path(&file));

    assert!(matches!(result, Err(ScreeningError::BadInputSchema { .. })));

    Ok(())
}

#[test]
fn test_pipeline_rejects_unparseable_dates() -> Result<()> {
    let directory = tempdir()?;
    let bad_row = csv_row(0, "01/01/2019 00:00", "4.97");
    let file = write_csv(&[bad_row])?;

    let pipeline = pipeline_in(&directory, vec![0]);
    let result = pipeline.run(input_path(&file));

    assert!(matches!(result, Err(ScreeningError::BadInputSchema { .. })));

    Ok(())
}

#[test]
fn test_pipeline_rejects_header_only_input() -> Result<()> {
    let directory = tempdir()?;
    let file = write_csv(&[])?;

    let pipeline = pipeline_in(&directory, vec![0]);
    let result = pipeline.run(input_path(&file));

    assert!(matches!(result, Err(ScreeningError::EmptyInput)));

    Ok(())
}

#[test]
fn test_pipeline_surfaces_missing_input_file() -> Result<()> {
    let directory = tempdir()?;
    let pipeline = pipeline_in(&directory, vec![0]);

    let result = pipeline.run("missing_upload.csv");

    assert!(matches!(result, Err(ScreeningError::Io(_))));

    Ok(())
}

#[test]
fn test_pipeline_overwrites_side_effect_files_between_runs() -> Result<()> {
    let directory = tempdir()?;

    let first = write_csv(&[
        csv_row(0, "2019-01-01 00:00:18", "4.97"),
        csv_row(1, "2019-01-04 12:30:00", "41.96"),
        csv_row(2, "2019-01-11 13:00:00", "94.63")
    ])?;

    let second = write_csv(&[
        csv_row(4, "2019-03-01 10:00:00", "12.50"),
        csv_row(5, "2019-03-02 10:00:00", "13.75")
    ])?;

    let pipeline = pipeline_in(&directory, vec![0]);
    pipeline.run(input_path(&first))?;
    pipeline.run(input_path(&second))?;

    let processed = fs::read_to_string(directory.path().join("processed_data.csv"))?;

    assert_eq!(processed.lines().count(), 3);
    assert!(processed.contains("tx00000004"));
    assert!(!processed.contains("tx00000000"));

    Ok(())
}
