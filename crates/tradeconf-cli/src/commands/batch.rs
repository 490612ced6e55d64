//! Batch command - build one import CSV from many confirmations.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, info, warn};

use tradeconf_core::{
    CorrectionBook, Document, FieldCorrection, FieldRecord, OutputRow, RowBuilder, TradeConfConfig,
    TradeParser, write_csv,
};

use super::config::load_config;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output CSV file (default: export.output_file from config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Apply manual corrections from this JSON file
    #[arg(long)]
    corrections: Option<PathBuf>,

    /// Write a pre-filled review sheet to this JSON file
    #[arg(long)]
    review: Option<PathBuf>,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Outcome of resolving a single file.
struct FileOutcome {
    path: PathBuf,
    record: Option<FieldRecord>,
    error: Option<String>,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let mut files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "pdf" | "txt")
        })
        .collect();
    files.sort();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let corrections = match &args.corrections {
        Some(path) => {
            let book = CorrectionBook::load(path)?;
            info!("Loaded {} corrections from {}", book.len(), path.display());
            book
        }
        None => CorrectionBook::new(),
    };

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let parser = TradeParser::with_config(config.extraction.clone());
    let mut outcomes = Vec::with_capacity(files.len());

    for path in files {
        match resolve_file(&path, &parser, &config) {
            Ok(record) => outcomes.push(FileOutcome {
                path,
                record: Some(record),
                error: None,
            }),
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    outcomes.push(FileOutcome {
                        path,
                        record: None,
                        error: Some(error_msg),
                    });
                } else {
                    pb.abandon();
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed: {}", error_msg);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    if let Some(review_path) = &args.review {
        let mut sheet = CorrectionBook::new();
        for outcome in &outcomes {
            if let Some(record) = &outcome.record {
                sheet.insert(document_id(&outcome.path), FieldCorrection::from_record(record));
            }
        }
        sheet.save(review_path)?;
        println!(
            "{} Review sheet written to {}",
            style("✓").green(),
            review_path.display()
        );
    }

    let builder = RowBuilder::from_config(&config.export);
    let mut rows: Vec<OutputRow> = Vec::new();
    let mut corrected = 0;

    for outcome in &outcomes {
        let Some(record) = &outcome.record else {
            continue;
        };

        let mut record = record.clone();
        if let Some(correction) = corrections.get(&document_id(&outcome.path)) {
            debug!("Applying correction to {}", outcome.path.display());
            record.apply(correction);
            corrected += 1;
        }
        rows.push(builder.build(&record));
    }

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.export.output_file));
    let file = File::create(&output_path)?;
    write_csv(BufWriter::new(file), &rows)?;

    let failed: Vec<_> = outcomes.iter().filter(|o| o.error.is_some()).collect();

    println!(
        "{} Wrote {} rows to {}",
        style("✓").green(),
        rows.len(),
        output_path.display()
    );
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        outcomes.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} corrected, {} failed",
        style(rows.len()).green(),
        style(corrected).cyan(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for outcome in &failed {
            println!(
                "  - {}: {}",
                outcome.path.display(),
                outcome.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn resolve_file(
    path: &Path,
    parser: &TradeParser,
    config: &TradeConfConfig,
) -> anyhow::Result<FieldRecord> {
    let document = Document::open(path)?;

    if document.text_len() < config.pdf.min_text_length {
        warn!("{} contains no text", document.id);
    }

    Ok(parser.resolve_document(&document).record)
}

/// Corrections are keyed by file name.
fn document_id(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("document")
        .to_string()
}
