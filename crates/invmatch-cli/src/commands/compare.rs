//! Compare command - similarity of two invoices.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use invmatch_core::pdf::{PdfExtractor, TextSource};
use invmatch_core::similarity::{SimilarityScorer, TfidfScorer};

use super::{emit, load_config, OutputFormat};

/// Arguments for the compare command.
#[derive(Args)]
pub struct CompareArgs {
    /// First invoice
    #[arg(required = true)]
    first: PathBuf,

    /// Second invoice
    #[arg(required = true)]
    second: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Serialize)]
struct Comparison {
    first: String,
    second: String,
    score: f64,
}

pub fn run(args: CompareArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let source = PdfExtractor::from_config(&config.pdf);
    let scorer = TfidfScorer::from_config(&config.similarity);

    let first = source.read_record(&args.first);
    let second = source.read_record(&args.second);

    let comparison = Comparison {
        score: scorer.score(first.text(), second.text()),
        first: first.identifier().to_string(),
        second: second.identifier().to_string(),
    };

    let output = match args.format {
        OutputFormat::Text => format!(
            "{} <-> {}\nSimilarity score: {}\n",
            comparison.first, comparison.second, comparison.score
        ),
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(&comparison)?),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(vec![]);
            wtr.serialize(&comparison)?;
            String::from_utf8(wtr.into_inner()?)?
        }
    };

    emit(&output, None)
}
