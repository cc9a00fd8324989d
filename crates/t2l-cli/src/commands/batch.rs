//! Batch command - process a set of declarations into the review workbook,
//! summary report and (optionally) customs TXT files.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error};

use t2l_core::export::BatchOutputs;
use t2l_core::{BatchProcessor, SourceDocument, Sumaria};

use super::config::load_config;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob patterns, processed in the order given
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Eleven-digit customs manifest reference (sumaria)
    #[arg(short, long)]
    sumaria: String,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Also write one customs TXT file per document
    #[arg(long)]
    txt: bool,

    /// Also write every artifact into a single zip archive
    #[arg(long)]
    zip: bool,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let sumaria = Sumaria::parse(&args.sumaria)?;

    let files = expand_inputs(&args.inputs)?;
    if files.is_empty() {
        anyhow::bail!("No matching files found for: {}", args.inputs.join(" "));
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    fs::create_dir_all(&args.output_dir)?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut processor = BatchProcessor::new(sumaria, config.sheet.clone());

    for path in &files {
        let document = SourceDocument::from_pdf_path(path).map_err(|e| {
            error!("Failed to process {}: {}", path.display(), e);
            anyhow::anyhow!("Processing failed for {}: {}", path.display(), e)
        })?;

        let sheet = processor.process_document(&document);
        debug!("{} -> sheet {:?}", path.display(), sheet.name);

        pb.inc(1);
    }

    pb.finish_and_clear();

    let result = processor.finish()?;
    let mut outputs = BatchOutputs::build(&result, &config)?;
    if args.txt {
        outputs = outputs.with_txt(&config)?;
    }

    write_file(&args.output_dir, &outputs.workbook.name, &outputs.workbook.data)?;
    write_file(&args.output_dir, &outputs.report.name, &outputs.report.data)?;
    for txt in &outputs.txt_files {
        write_file(&args.output_dir, &txt.file_name(), txt.content.as_bytes())?;
    }
    if args.zip || config.output.write_bundle {
        write_file(&args.output_dir, &config.output.bundle_name, &outputs.bundle()?)?;
    }

    println!();
    println!("{}", outputs.report_text);
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        result.sheets.len(),
        result.elapsed
    );

    Ok(())
}

/// Expand each pattern in turn; a pattern matching nothing is taken as a
/// literal path so a missing file is reported rather than skipped.
fn expand_inputs(inputs: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        let mut matched: Vec<PathBuf> = glob(input)?.filter_map(|r| r.ok()).collect();
        if matched.is_empty() {
            files.push(PathBuf::from(input));
        } else {
            matched.sort();
            files.append(&mut matched);
        }
    }

    Ok(files)
}

fn write_file(dir: &Path, name: &str, data: &[u8]) -> anyhow::Result<()> {
    let path = dir.join(name);
    fs::write(&path, data)?;
    println!("{} Wrote {}", style("✓").green(), path.display());
    Ok(())
}
