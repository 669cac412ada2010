//! Rendering of extracted parameters.

use labscan_core::{HealthParameter, StatusCounts};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text table
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub fn format_parameters(
    parameters: &[HealthParameter],
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => format_json(parameters),
        OutputFormat::Csv => format_csv(parameters),
        OutputFormat::Text => Ok(format_text(parameters)),
    }
}

fn format_json(parameters: &[HealthParameter]) -> anyhow::Result<String> {
    let body = serde_json::json!({
        "success": true,
        "parameters": parameters,
    });
    Ok(serde_json::to_string(&body)?)
}

fn format_csv(parameters: &[HealthParameter]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["name", "value", "unit", "normal_range", "status"])?;

    for parameter in parameters {
        wtr.write_record([
            parameter.name.as_str(),
            parameter.value.as_str(),
            parameter.unit.as_deref().unwrap_or(""),
            parameter.normal_range.as_deref().unwrap_or(""),
            parameter.status.map(|s| s.as_str()).unwrap_or(""),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(parameters: &[HealthParameter]) -> String {
    if parameters.is_empty() {
        return "No health parameters found\n".to_string();
    }

    let name_width = parameters
        .iter()
        .map(|p| p.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Parameter".len());

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:>10}  {:<10}  {:<14}  {}\n",
        "Parameter", "Value", "Unit", "Normal range", "Status"
    ));

    for parameter in parameters {
        output.push_str(&format!(
            "{:<name_width$}  {:>10}  {:<10}  {:<14}  {}\n",
            parameter.name,
            parameter.value,
            parameter.unit.as_deref().unwrap_or("-"),
            parameter.normal_range.as_deref().unwrap_or("-"),
            parameter.status.map(|s| s.as_str()).unwrap_or("-"),
        ));
    }

    output.push('\n');
    output.push_str(&format_counts(&StatusCounts::from_parameters(parameters)));
    output.push('\n');
    output
}

/// One-line status breakdown.
pub fn format_counts(counts: &StatusCounts) -> String {
    format!(
        "{} parameters: {} normal, {} high, {} low, {} unknown ({} abnormal)",
        counts.total(),
        counts.normal,
        counts.high,
        counts.low,
        counts.unknown,
        counts.abnormal()
    )
}
