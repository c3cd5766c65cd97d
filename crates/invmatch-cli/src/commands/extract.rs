//! Extract command - pull labeled fields out of a single invoice.

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use invmatch_core::invoice::{FeatureExtractor, FeatureSet};
use invmatch_core::pdf::{PdfExtractor, TextSource};

use super::{emit, load_config, OutputFormat};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

pub fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let source = PdfExtractor::from_config(&config.pdf);
    let extractor = FeatureExtractor::from_config(&config.extraction)?;

    info!("Extracting fields from {}", args.input.display());
    let text = source.extract_text(&args.input);
    let features = extractor.extract(&text);

    let output = match args.format {
        OutputFormat::Text => format_features_text("Invoice Features:", &features),
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(&features)?),
        OutputFormat::Csv => format_features_csv(&features)?,
    };

    emit(&output, args.output.as_deref())
}

/// One `label: value` line per feature, `Not found` for absent values.
pub fn format_features_text(title: &str, features: &FeatureSet) -> String {
    let mut output = format!("{}\n", title);
    for feature in features.iter() {
        let value = feature.value.as_deref().unwrap_or("Not found");
        output.push_str(&format!("{}: {}\n", feature.label, value));
    }
    output
}

fn format_features_csv(features: &FeatureSet) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(features.iter().map(|f| f.label.as_str()))?;
    wtr.write_record(features.iter().map(|f| f.value.as_deref().unwrap_or("")))?;

    Ok(String::from_utf8(wtr.into_inner()?)?)
}
