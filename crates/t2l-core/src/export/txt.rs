//! Flat delimited files for customs-system ingestion.

use csv::{Terminator, WriterBuilder};
use tracing::debug;

use super::workbook::ReviewedSheet;
use crate::declaration::totals::{format_mass, parse_mass};
use crate::error::OutputError;
use crate::models::config::TxtConfig;

/// Columns holding integers; spreadsheet edits may have turned them into
/// `12.0`.
const INTEGER_COLUMNS: [&str; 6] = ["Bultos", "Fijo_col3", "Fijo_col7", "Fijo_col8", "Sumaria", "Orden"];

const MASS_COLUMN: &str = "Kilos";

const TOTAL_MARKER: &str = "TOTAL";

/// A rendered TXT file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxtFile {
    /// File stem (the sheet name).
    pub name: String,
    pub content: String,
}

impl TxtFile {
    pub fn file_name(&self) -> String {
        format!("{}.txt", self.name)
    }
}

/// Render every non-empty sheet.
pub fn render_all(sheets: &[ReviewedSheet], config: &TxtConfig) -> Result<Vec<TxtFile>, OutputError> {
    let mut files = Vec::new();
    for sheet in sheets {
        if let Some(content) = render_txt(sheet, config)? {
            files.push(TxtFile {
                name: sheet.name.clone(),
                content,
            });
        }
    }
    Ok(files)
}

/// Render one sheet without header. Empty sheets give `None`.
pub fn render_txt(sheet: &ReviewedSheet, config: &TxtConfig) -> Result<Option<String>, OutputError> {
    if !config.delimiter.is_ascii() {
        return Err(OutputError::InvalidDelimiter(config.delimiter));
    }

    if sheet.is_empty() {
        debug!("Sheet {} is empty, no TXT", sheet.name);
        return Ok(None);
    }

    let mut rows: &[Vec<String>] = &sheet.rows;
    if rows.len() > 1 && rows[rows.len() - 1].iter().any(|c| c.contains(TOTAL_MARKER)) {
        rows = &rows[..rows.len() - 1];
    }

    let integer_cols: Vec<usize> = INTEGER_COLUMNS
        .iter()
        .filter_map(|name| sheet.column(name))
        .collect();
    let mass_col = sheet.column(MASS_COLUMN);

    let mut writer = WriterBuilder::new()
        .delimiter(config.delimiter as u8)
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::<u8>::new());

    for row in rows {
        let cleaned: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                if integer_cols.contains(&i) {
                    clean_integer(cell)
                } else if mass_col == Some(i) {
                    clean_mass(cell, config.decimal_separator)
                } else {
                    cell.clone()
                }
            })
            .collect();
        writer.write_record(&cleaned)?;
    }
    writer.flush().map_err(csv::Error::from)?;

    let bytes = writer
        .into_inner()
        .map_err(|error| OutputError::Txt(error.into_error().into()))?;
    String::from_utf8(bytes)
        .map(Some)
        .map_err(|error| {
            OutputError::Txt(std::io::Error::new(std::io::ErrorKind::InvalidData, error).into())
        })
}

/// Trim and drop a trailing `.0`.
pub fn clean_integer(cell: &str) -> String {
    let s = cell.trim();
    s.strip_suffix(".0").unwrap_or(s).to_string()
}

/// Normalize a mass cell: integral values without fraction, others with the
/// given decimal separator. Unparseable values become empty.
pub fn clean_mass(cell: &str, decimal_separator: char) -> String {
    let compact: String = cell.chars().filter(|c| !c.is_whitespace()).collect();
    match parse_mass(&compact) {
        Some(mass) => format_mass(mass).replace('.', &decimal_separator.to_string()),
        None => String::new(),
    }
}
