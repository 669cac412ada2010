//! Batch processing command for multiple report files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use labscan_core::models::config::LabConfig;
use labscan_core::source::is_supported;
use labscan_core::{load_document_text, ExtractionResult, LabReportParser};

use super::load_config;
use super::output::{format_parameters, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

const SUMMARY_HEADER: [&str; 8] = [
    "filename",
    "status",
    "parameters",
    "normal",
    "high",
    "low",
    "processing_time_ms",
    "error",
];

/// What happened to one input file.
struct FileOutcome {
    path: PathBuf,
    elapsed_ms: u64,
    result: Result<ExtractionResult, String>,
}

impl FileOutcome {
    fn file_name(&self) -> &str {
        self.path.file_name().and_then(|s| s.to_str()).unwrap_or("")
    }

    /// One `summary.csv` row; failures leave the count columns empty.
    fn summary_row(&self) -> Vec<String> {
        let elapsed = self.elapsed_ms.to_string();
        match &self.result {
            Ok(extraction) => {
                let counts = extraction.status_counts();
                vec![
                    self.file_name().to_string(),
                    "success".to_string(),
                    extraction.parameters.len().to_string(),
                    counts.normal.to_string(),
                    counts.high.to_string(),
                    counts.low.to_string(),
                    elapsed,
                    String::new(),
                ]
            }
            Err(message) => {
                let mut row = vec![self.file_name().to_string(), "error".to_string()];
                row.extend(std::iter::repeat(String::new()).take(4));
                row.push(elapsed);
                row.push(message.clone());
                row
            }
        }
    }
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files = matching_files(&args.input)?;
    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(dir) = &args.output_dir {
        fs::create_dir_all(dir)?;
    }

    let outcomes = process_files(files, &config, args.continue_on_error)?;

    if let Some(dir) = &args.output_dir {
        write_outputs(dir, &outcomes, args.format)?;
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_deref()
            .unwrap_or_else(|| Path::new("."))
            .join("summary.csv");
        write_summary(&summary_path, &outcomes)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<&FileOutcome> = outcomes.iter().filter(|o| o.result.is_err()).collect();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        outcomes.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(outcomes.len() - failed.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for outcome in failed {
            if let Err(message) = &outcome.result {
                println!("  - {}: {}", outcome.path.display(), message);
            }
        }
    }

    Ok(())
}

/// Expand the glob, keeping only files the loader understands.
fn matching_files(pattern: &str) -> anyhow::Result<Vec<PathBuf>> {
    let files: Vec<PathBuf> = glob(pattern)?
        .filter_map(|r| r.ok())
        .filter(|p| is_supported(p))
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", pattern);
    }
    Ok(files)
}

fn process_files(
    files: Vec<PathBuf>,
    config: &LabConfig,
    continue_on_error: bool,
) -> anyhow::Result<Vec<FileOutcome>> {
    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let parser = LabReportParser::from_config(&config.extraction);
    let mut outcomes = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let result = extract_file(&path, &parser, config).map_err(|e| e.to_string());
        let elapsed_ms = file_start.elapsed().as_millis() as u64;

        if let Err(message) = &result {
            if !continue_on_error {
                progress.abandon();
                error!("Failed to process {}: {}", path.display(), message);
                anyhow::bail!("Processing failed for {}: {}", path.display(), message);
            }
            warn!("Failed to process {}: {}", path.display(), message);
        }

        outcomes.push(FileOutcome {
            path,
            elapsed_ms,
            result,
        });
        progress.inc(1);
    }

    progress.finish_with_message("Complete");
    Ok(outcomes)
}

fn extract_file(
    path: &Path,
    parser: &LabReportParser,
    config: &LabConfig,
) -> anyhow::Result<ExtractionResult> {
    let document = load_document_text(path, &config.pdf)?;
    if document.text.is_empty() {
        anyhow::bail!("No text provided");
    }

    Ok(parser.parse(&document.text))
}

/// Write `<stem>.<ext>` for every successfully processed file.
fn write_outputs(dir: &Path, outcomes: &[FileOutcome], format: OutputFormat) -> anyhow::Result<()> {
    for outcome in outcomes {
        let Ok(extraction) = &outcome.result else {
            continue;
        };

        let stem = outcome
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("report");
        let output_path = dir.join(format!("{}.{}", stem, format.extension()));

        fs::write(&output_path, format_parameters(&extraction.parameters, format)?)?;
        debug!("Wrote output to {}", output_path.display());
    }
    Ok(())
}

fn write_summary(path: &Path, outcomes: &[FileOutcome]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(SUMMARY_HEADER)?;
    for outcome in outcomes {
        wtr.write_record(outcome.summary_row())?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(name: &str, result: Result<ExtractionResult, String>) -> FileOutcome {
        FileOutcome {
            path: PathBuf::from("reports").join(name),
            elapsed_ms: 3,
            result,
        }
    }

    #[test]
    fn test_summary_row_success() {
        let extraction = LabReportParser::new().parse("HAEMOGLOBIN 10.0 g/dL (12.0-15.0)");
        let row = outcome("a.txt", Ok(extraction)).summary_row();

        assert_eq!(row.len(), SUMMARY_HEADER.len());
        assert_eq!(row, vec!["a.txt", "success", "2", "0", "0", "2", "3", ""]);
    }

    #[test]
    fn test_summary_row_error() {
        let row = outcome("broken.txt", Err("bad bytes".to_string())).summary_row();

        assert_eq!(row.len(), SUMMARY_HEADER.len());
        assert_eq!(row, vec!["broken.txt", "error", "", "", "", "", "3", "bad bytes"]);
    }

    #[test]
    fn test_matching_files_filters_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "x").unwrap();
        fs::write(dir.path().join("scan.png"), "x").unwrap();

        let files = matching_files(&format!("{}/*", dir.path().display())).unwrap();
        assert_eq!(files, vec![dir.path().join("a.txt")]);

        assert!(matching_files(&format!("{}/*.pdf", dir.path().display())).is_err());
    }
}
