//! Process command - extract health parameters from a single report.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use labscan_core::{load_document_text, LabReportParser, NewReport, ReportStore};

use super::output::{format_counts, format_parameters, OutputFormat};
use super::{load_config, open_store};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (recognized text or PDF)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Save the report to the history store
    #[arg(long, requires = "user")]
    save: bool,

    /// Owner of the saved report
    #[arg(short, long)]
    user: Option<String>,

    /// History store file (overrides config)
    #[arg(long)]
    store: Option<PathBuf>,

    /// Log every extraction decision at trace level
    #[arg(long)]
    trace: bool,

    /// Print a status breakdown after the output
    #[arg(long)]
    summary: bool,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if args.trace {
        config.extraction.trace = true;
    }

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")?
            .progress_chars("##-"),
    );

    pb.set_message("Loading text...");
    pb.set_position(10);

    let document = load_document_text(&args.input, &config.pdf)?;
    if document.text.is_empty() {
        pb.finish_and_clear();
        anyhow::bail!("No text provided in {}", args.input.display());
    }

    pb.set_message("Extracting parameters...");
    pb.set_position(50);

    let parser = LabReportParser::from_config(&config.extraction);
    let result = parser.parse(&document.text);

    pb.set_position(100);
    pb.finish_and_clear();

    let output = format_parameters(&result.parameters, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.save {
        let mut store = open_store(args.store.as_ref(), &config);
        let receipt = store.save(NewReport {
            user_id: args.user.clone(),
            file_name: document.file_name.clone(),
            file_size: Some(document.file_size),
            extracted_text: Some(document.text.clone()),
            health_parameters: result.parameters.clone(),
        })?;

        eprintln!(
            "{} {} (id {}, {} parameters)",
            style("✓").green(),
            receipt.message,
            receipt.report_id,
            receipt.parameters_count
        );
    }

    if args.summary {
        eprintln!();
        eprintln!(
            "{} {}",
            style("ℹ").blue(),
            format_counts(&result.status_counts())
        );
        eprintln!(
            "{} Processing time: {}ms",
            style("ℹ").blue(),
            result.processing_time_ms
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
