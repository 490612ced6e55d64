//! Extract command - resolve fields from a single confirmation.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info, warn};

use tradeconf_core::{
    Document, ExtractionResult, FieldName, RowBuilder, TradeParser, write_csv,
};

use super::config::load_config;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file (PDF or extracted text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON field record
    Json,
    /// Plain text summary
    Text,
    /// Single import row
    Row,
}

pub fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let document = Document::open(&args.input)?;
    if document.text_len() < config.pdf.min_text_length {
        warn!("{} contains no text", document.id);
        eprintln!(
            "{} No text found in {}",
            style("!").yellow(),
            document.id
        );
    }

    let parser = TradeParser::with_config(config.extraction.clone());
    let result = parser.resolve_document(&document);

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&result.record)?,
        OutputFormat::Text => format_text(&document.id, &result),
        OutputFormat::Row => {
            let row = RowBuilder::from_config(&config.export).build(&result.record);
            let mut buf = Vec::new();
            write_csv(&mut buf, &[row])?;
            String::from_utf8(buf)?.trim_end().to_string()
        }
    };

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

    if !result.warnings.is_empty() {
        eprintln!("{}", style("Warnings:").yellow());
        for warning in &result.warnings {
            eprintln!("  - {}", warning);
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn format_text(id: &str, result: &ExtractionResult) -> String {
    let mut lines = vec![format!("Document: {}", id)];

    for name in FieldName::ALL {
        let value = result.record.get(name);
        let shown = if value.is_empty() { "-" } else { value };
        lines.push(format!("{:<16} {}", name.as_str(), shown));
    }

    lines.push(format!("{:<16} {}", "separator", result.separator));
    lines.push(format!("{:<16} {}ms", "processing time", result.processing_time_ms));
    lines.join("\n")
}
