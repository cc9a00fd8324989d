//! Export command - turn a reviewed workbook into customs TXT files.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use t2l_core::export::{read_workbook, render_all};

use super::config::load_config;

/// Arguments for the export command.
#[derive(Args)]
pub struct ExportArgs {
    /// Reviewed workbook (.xlsx)
    #[arg(required = true)]
    workbook: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,
}

pub fn run(args: ExportArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.workbook.exists() {
        anyhow::bail!("Workbook not found: {}", args.workbook.display());
    }

    let data = fs::read(&args.workbook)?;
    let sheets = read_workbook(&data)?;
    info!("Read {} sheets from {}", sheets.len(), args.workbook.display());

    let files = render_all(&sheets, &config.txt)?;
    if files.is_empty() {
        println!("{} No sheets with data, nothing written", style("ℹ").blue());
        return Ok(());
    }

    fs::create_dir_all(&args.output_dir)?;
    for file in &files {
        let path = args.output_dir.join(file.file_name());
        fs::write(&path, &file.content)?;
        println!("{} Wrote {}", style("✓").green(), path.display());
    }

    Ok(())
}
