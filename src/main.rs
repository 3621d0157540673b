mod engine;
mod features;
mod labeler;
mod models;
mod report;
mod scoring;
mod types;

use std::io::{stderr, stdout, BufWriter, Write};
use std::process::exit;
use std::time::Instant;

use anyhow::Result;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::engine::ScreeningPipeline;
use crate::scoring::LogisticModel;

const DEFAULT_MODEL_PATH: &str = "model.json";

fn main() -> Result<()> {
    //NOTE: If I was making a much more sophisticated CLI application, I would have used the clap crate
    //      to handle the CLI parsing and execution.
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: fraud-screener [input].csv [model.json:optional] [log_level:optional] > [report].html");
        eprintln!("Available log levels: error, warn, info, debug, trace (default: error)");
        exit(1);
    }

    let input_path = &args[1];
    let model_path = args.get(2).map(String::as_str).unwrap_or(DEFAULT_MODEL_PATH);
    let log_level = args.get(3)
        .map(|s| parse_log_level(s)).unwrap_or_else(|| LevelFilter::ERROR);

    setup_logging(log_level);

    let model = LogisticModel::load(model_path)?;
    let pipeline = ScreeningPipeline::new(model);

    let timer = Instant::now();
    let html = pipeline.run(input_path)?;
    let duration = timer.elapsed();

    info!("Screened transactions in: {duration:?}");

    write_report_to_stdout(&html)?;

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: Because we are doing stdout redirection, we will need to utilize stderr to display logging
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_report_to_stdout(html: &str) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    output.write_all(html.as_bytes())?;
    output.flush()?;

    Ok(())
}
