//! `flexacc` CLI: scores an OCR transcription against ground truth.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use flexacc::ingest::{ingest, IngestOptions, ReadingOrderStrategy};
use flexacc::flexible_character_accuracy;

#[derive(Parser)]
#[command(name = "flexacc", about = "Reading-order-independent character accuracy for OCR output")]
struct Cli {
    /// Ground truth file (ALTO XML, PAGE XML, or plain text).
    gt: PathBuf,
    /// OCR output file (ALTO XML, PAGE XML, or plain text).
    ocr: PathBuf,
    /// Reading-order strategy for PAGE inputs.
    #[arg(long, default_value = "reading_order")]
    reading_order: String,
    /// Grid size, only meaningful with `--reading-order grid`.
    #[arg(long, default_value_t = 10)]
    grid_size: usize,
    /// Output format.
    #[arg(long, default_value = "text")]
    format: Format,
    /// Increase log verbosity; repeatable.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Serialize)]
struct MatchReport {
    gt_line: usize,
    gt_start: usize,
    gt_text: String,
    ocr_line: usize,
    ocr_start: usize,
    ocr_text: String,
    insert: usize,
    delete: usize,
    replace: usize,
    r#match: usize,
}

#[derive(Serialize)]
struct Report {
    score: f64,
    matches: Vec<MatchReport>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new().filter_level(level).init();

    let strategy: ReadingOrderStrategy = cli
        .reading_order
        .parse()
        .context("invalid --reading-order")?;
    let opts = IngestOptions { reading_order: strategy, grid_size: cli.grid_size };

    let gt_lines = ingest(&cli.gt, &opts).with_context(|| format!("reading {}", cli.gt.display()))?;
    let ocr_lines =
        ingest(&cli.ocr, &opts).with_context(|| format!("reading {}", cli.ocr.display()))?;

    let gt_text = gt_lines.join("\n");
    let ocr_text = ocr_lines.join("\n");

    let (score, matches) = flexible_character_accuracy(&gt_text, &ocr_text);

    match cli.format {
        Format::Text => {
            println!("score: {score:.4} ({} matches)", matches.len());
        }
        Format::Json => {
            // Re-sort into deterministic line order; the picker commits
            // matches in whatever order it finds them.
            let mut sorted: Vec<_> = matches.iter().collect();
            sorted.sort_by(|a, b| {
                let ka = a.gt.line as f64 + a.gt.start as f64 / 10_000.0;
                let kb = b.gt.line as f64 + b.gt.start as f64 / 10_000.0;
                ka.partial_cmp(&kb).unwrap()
            });

            let report = Report {
                score,
                matches: sorted
                    .into_iter()
                    .map(|m| MatchReport {
                        gt_line: m.gt.line,
                        gt_start: m.gt.start,
                        gt_text: m.gt.text.clone(),
                        ocr_line: m.ocr.line,
                        ocr_start: m.ocr.start,
                        ocr_text: m.ocr.text.clone(),
                        insert: m.dist.insert,
                        delete: m.dist.delete,
                        replace: m.dist.replace,
                        r#match: m.dist.r#match,
                    })
                    .collect(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
