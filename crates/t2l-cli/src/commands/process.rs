//! Process command - extract line items from a single declaration.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, info};

use t2l_core::declaration::rules::container_code;
use t2l_core::declaration::{DocumentTotals, FieldLocator, SourceDocument};
use t2l_core::LineItemRecord;

use super::config::load_config;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input declaration (PDF, or plain text with --text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Treat the input as already extracted text
    #[arg(long)]
    text: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

/// Everything extracted from one declaration.
#[derive(Debug, Serialize)]
struct Extraction {
    source: String,
    container: String,
    records: Vec<LineItemRecord>,
    totals: DocumentTotals,
    /// Placeholder label, present only when no line item was found.
    #[serde(skip_serializing_if = "Option::is_none")]
    placeholder: Option<String>,
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);

    pb.set_message("Loading document...");
    let document = if args.text {
        let name = args
            .input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        SourceDocument::from_raw(name, &fs::read_to_string(&args.input)?)
    } else {
        SourceDocument::from_pdf_path(&args.input)?
    };
    debug!("Document has {} text lines", document.text.len());

    pb.set_message("Extracting line items...");
    let records = FieldLocator::new().locate(&document.text).align();
    let extraction = Extraction {
        container: container_code(&document.name),
        totals: DocumentTotals::from_records(&records),
        placeholder: records
            .is_empty()
            .then(|| config.sheet.placeholder_label.clone()),
        source: document.name,
        records,
    };

    pb.finish_and_clear();

    let output = format_extraction(&extraction, args.format)?;

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

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn format_extraction(extraction: &Extraction, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(extraction)?),
        OutputFormat::Csv => format_csv(extraction),
        OutputFormat::Text => Ok(format_text(extraction)),
    }
}

fn format_csv(extraction: &Extraction) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["order", "packages", "gross_mass"])?;

    for record in &extraction.records {
        wtr.write_record([
            record.order.to_string().as_str(),
            &record.packages,
            &record.gross_mass,
        ])?;
    }

    if let Some(label) = &extraction.placeholder {
        wtr.write_record([label.as_str(), "", ""])?;
    } else {
        wtr.write_record([
            "TOTAL",
            &extraction.totals.packages.to_string(),
            &extraction.totals.gross_mass_text(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(extraction: &Extraction) -> String {
    let mut output = String::new();

    output.push_str(&format!("Source:    {}\n", extraction.source));
    output.push_str(&format!("Container: {}\n", extraction.container));
    output.push_str(&format!("Items:     {}\n", extraction.records.len()));

    if let Some(label) = &extraction.placeholder {
        output.push('\n');
        output.push_str(label);
        output.push('\n');
    }

    if !extraction.records.is_empty() {
        output.push('\n');
        output.push_str(&format!("{:>5}  {:>10}  {:>14}\n", "Order", "Packages", "Gross mass"));
        for record in &extraction.records {
            output.push_str(&format!(
                "{:>5}  {:>10}  {:>14}\n",
                record.order, record.packages, record.gross_mass
            ));
        }
        output.push_str(&format!(
            "{:>5}  {:>10}  {:>14}\n",
            "TOTAL",
            extraction.totals.packages,
            extraction.totals.gross_mass_text()
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use t2l_core::align_pairs;

    fn extraction() -> Extraction {
        let records = align_pairs(
            &["10".to_string(), "20".to_string(), "5".to_string()],
            &["450.5".to_string(), "900.25".to_string()],
        );
        Extraction {
            source: "T2L_MSCU1234567.pdf".to_string(),
            container: "MSCU123456".to_string(),
            totals: DocumentTotals::from_records(&records),
            records,
            placeholder: None,
        }
    }

    fn empty_extraction() -> Extraction {
        Extraction {
            source: "scan.pdf".to_string(),
            container: "SINCONT".to_string(),
            records: Vec::new(),
            totals: DocumentTotals::default(),
            placeholder: Some("SIN PARTIDAS".to_string()),
        }
    }

    #[test]
    fn test_format_csv() {
        let csv = format_csv(&extraction()).unwrap();
        assert_eq!(
            csv,
            "order,packages,gross_mass\n1,10,450.5\n2,20,900.25\n3,5,\nTOTAL,35,1350.75\n"
        );
    }

    #[test]
    fn test_format_csv_without_records() {
        assert_eq!(
            format_csv(&empty_extraction()).unwrap(),
            "order,packages,gross_mass\nSIN PARTIDAS,,\n"
        );
    }

    #[test]
    fn test_placeholder_in_json_and_text() {
        let json = serde_json::to_value(empty_extraction()).unwrap();
        assert_eq!(json["placeholder"], "SIN PARTIDAS");
        assert_eq!(json["records"].as_array().unwrap().len(), 0);

        let text = format_text(&empty_extraction());
        assert!(text.contains("Items:     0"));
        assert!(text.contains("SIN PARTIDAS"));
        assert!(!text.contains("TOTAL"));

        let json = serde_json::to_value(extraction()).unwrap();
        assert!(json.get("placeholder").is_none());
    }

    #[test]
    fn test_format_text() {
        let text = format_text(&extraction());
        assert!(text.contains("Container: MSCU123456"));
        assert!(text.contains("Items:     3"));
        assert!(text.contains("TOTAL"));
        assert!(text.contains("1350.75"));
    }
}
