//! Find command - match a query invoice against historical invoices.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, info};

use invmatch_core::collection::{InvoiceCollection, SimilarityMatch};
use invmatch_core::invoice::{FeatureExtractor, FeatureSet};
use invmatch_core::models::record::InvoiceRecord;
use invmatch_core::pdf::{PdfExtractor, TextSource};

use super::extract::format_features_text;
use super::{emit, expand_inputs, load_config, OutputFormat};

/// Arguments for the find command.
#[derive(Args)]
pub struct FindArgs {
    /// Query invoice (PDF)
    #[arg(required = true)]
    query: PathBuf,

    /// Historical invoices: files or glob patterns
    #[arg(short = 'H', long, num_args = 1.., required = true)]
    history: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Only report matches scoring above this (overrides config)
    #[arg(long)]
    min_score: Option<f64>,
}

/// Outcome of matching one query invoice.
#[derive(Debug, Serialize)]
struct MatchReport<'a> {
    query: &'a str,
    history_count: usize,
    matched: Option<&'a str>,
    score: f64,
    features: &'a FeatureSet,
}

impl<'a> MatchReport<'a> {
    fn new(
        query: &'a InvoiceRecord,
        history_count: usize,
        result: &SimilarityMatch<'a>,
        features: &'a FeatureSet,
    ) -> Self {
        Self {
            query: query.identifier(),
            history_count,
            matched: result.record.map(InvoiceRecord::identifier),
            score: if result.record.is_some() { result.score } else { 0.0 },
            features,
        }
    }
}

pub fn run(args: FindArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(min_score) = args.min_score {
        config.similarity.min_score = min_score;
    }

    let source = PdfExtractor::from_config(&config.pdf);
    let extractor = FeatureExtractor::from_config(&config.extraction)?;
    let mut collection = InvoiceCollection::from_config(&config.similarity);

    let files = expand_inputs(&args.history)?;
    if files.is_empty() {
        anyhow::bail!("No history invoices given");
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut failed = 0usize;
    for path in files {
        let text = match source.try_extract_text(&path) {
            Ok(text) => {
                let line = format!(
                    "{} Successfully processed {}",
                    style("✓").green(),
                    path.display()
                );
                // keep stdout parseable for machine formats
                pb.suspend(|| {
                    if args.format == OutputFormat::Text && args.output.is_none() {
                        println!("{}", line);
                    } else {
                        eprintln!("{}", line);
                    }
                });
                text
            }
            Err(e) => {
                failed += 1;
                pb.suspend(|| {
                    eprintln!(
                        "{} Error reading {}: {}",
                        style("✗").red(),
                        path.display(),
                        e
                    );
                });
                String::new()
            }
        };

        collection.add(InvoiceRecord::new(text, path.display().to_string()));
        pb.inc(1);
    }
    pb.finish_and_clear();

    info!(
        "Loaded {} history invoices ({} unreadable)",
        collection.len(),
        failed
    );

    let query = source.read_record(&args.query);
    let result = collection.find_most_similar(&query);
    let features = extractor.extract(query.text());
    let report = MatchReport::new(&query, collection.len(), &result, &features);

    let output = match args.format {
        OutputFormat::Text => format_text(&report),
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(&report)?),
        OutputFormat::Csv => format_csv(&report)?,
    };

    emit(&output, args.output.as_deref())?;

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn format_text(report: &MatchReport<'_>) -> String {
    let mut output = String::new();

    match report.matched {
        Some(matched) => {
            output.push_str(&format!("Most similar invoice: {}\n", matched));
            output.push_str(&format!("Similarity score: {}\n", report.score));
        }
        None => output.push_str("No similar invoice found.\n"),
    }

    output.push('\n');
    output.push_str(&format_features_text("Input Invoice Features:", report.features));
    output
}

fn format_csv(report: &MatchReport<'_>) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header = vec!["query", "matched", "score"];
    header.extend(report.features.iter().map(|f| f.label.as_str()));
    wtr.write_record(&header)?;

    let score = report.score.to_string();
    let mut row = vec![report.query, report.matched.unwrap_or(""), score.as_str()];
    row.extend(
        report
            .features
            .iter()
            .map(|f| f.value.as_deref().unwrap_or("")),
    );
    wtr.write_record(&row)?;

    Ok(String::from_utf8(wtr.into_inner()?)?)
}
