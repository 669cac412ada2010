//! History command - list saved reports.

use std::path::PathBuf;

use chrono::Local;
use clap::{Args, Subcommand, ValueEnum};
use console::style;

use labscan_core::history::{format_file_size, ReportListing};
use labscan_core::ReportStore;

use super::{load_config, open_store};

/// Arguments for the history command.
#[derive(Args)]
pub struct HistoryArgs {
    #[command(subcommand)]
    command: HistoryCommand,
}

#[derive(Subcommand)]
enum HistoryCommand {
    /// List a user's reports, most recent first
    List(ListArgs),
}

#[derive(Args)]
struct ListArgs {
    /// Owner of the reports
    #[arg(short, long)]
    user: Option<String>,

    /// History store file (overrides config)
    #[arg(long)]
    store: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: ListFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ListFormat {
    /// JSON output
    Json,
    /// Plain text listing
    Text,
}

pub async fn run(args: HistoryArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    match args.command {
        HistoryCommand::List(list_args) => list_reports(list_args, config_path),
    }
}

fn list_reports(args: ListArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let store = open_store(args.store.as_ref(), &config);

    let listing = store.list(args.user.as_deref().unwrap_or(""))?;

    match args.format {
        ListFormat::Json => println!("{}", serde_json::to_string_pretty(&listing)?),
        ListFormat::Text => print!("{}", format_listing(&listing)),
    }

    Ok(())
}

fn format_listing(listing: &ReportListing) -> String {
    if listing.reports.is_empty() {
        return "No saved reports\n".to_string();
    }

    let mut output = String::new();
    for report in &listing.reports {
        let counts = report.status_counts();
        output.push_str(&format!(
            "{}  {}  {}  {}\n",
            report.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
            style(&report.file_name).bold(),
            format_file_size(report.file_size),
            report.id
        ));
        output.push_str(&format!(
            "    {} parameters, {} normal, {} abnormal\n",
            report.parameters_count,
            counts.normal,
            counts.abnormal()
        ));
    }
    output.push_str(&format!("\n{} reports\n", listing.total_reports));
    output
}
