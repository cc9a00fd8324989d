//! Per-document output table.
//!
//! Every document becomes exactly one sheet: its line-item rows followed by
//! a TOTAL row, or a single placeholder row when nothing was found.

use serde::{Deserialize, Serialize};

use crate::declaration::totals::DocumentTotals;
use crate::models::config::SheetConfig;
use crate::models::declaration::{LineItemRecord, Sumaria};

/// Column headers, in output order.
pub const COLUMNS: [&str; 13] = [
    "Bultos",
    "Kilos",
    "Fijo_col3",
    "Fijo_col4",
    "Vacio5",
    "Vacio6",
    "Fijo_col7",
    "Fijo_col8",
    "Contenedor",
    "Fijo_col10",
    "Vacio11",
    "Sumaria",
    "Orden",
];

/// Spreadsheet limit on sheet name length.
pub const MAX_SHEET_NAME: usize = 31;

pub type SheetRow = [String; 13];

/// One document's table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSheet {
    /// Sheet name (sanitized, at most 31 characters).
    pub name: String,

    /// Original file name of the document.
    pub source: String,

    /// Container code derived from the file name.
    pub container: String,

    /// Extracted line items.
    pub records: Vec<LineItemRecord>,

    /// Totals, absent for placeholder sheets.
    pub totals: Option<DocumentTotals>,

    /// Rendered rows, without the header.
    pub rows: Vec<SheetRow>,
}

impl DocumentSheet {
    /// Build the rows for one document.
    pub fn build(
        source: &str,
        container: &str,
        sumaria: &Sumaria,
        records: Vec<LineItemRecord>,
        config: &SheetConfig,
    ) -> Self {
        let (rows, totals) = if records.is_empty() {
            (vec![placeholder_row(container, sumaria, config)], None)
        } else {
            let totals = DocumentTotals::from_records(&records);
            let mut rows: Vec<SheetRow> = records
                .iter()
                .map(|r| item_row(r, container, sumaria, config))
                .collect();
            rows.push(total_row(&totals, config));
            (rows, Some(totals))
        };

        Self {
            name: sheet_name(source),
            source: source.to_string(),
            container: container.to_string(),
            records,
            totals,
            rows,
        }
    }

    /// Number of line items (zero for placeholder sheets).
    pub fn item_count(&self) -> usize {
        self.records.len()
    }

    pub fn is_placeholder(&self) -> bool {
        self.records.is_empty()
    }
}

fn item_row(
    record: &LineItemRecord,
    container: &str,
    sumaria: &Sumaria,
    config: &SheetConfig,
) -> SheetRow {
    [
        record.packages.clone(),
        record.gross_mass.clone(),
        config.unit_flag.clone(),
        config.reception_label.clone(),
        String::new(),
        String::new(),
        config.tariff_code.clone(),
        config.unit_flag.clone(),
        container.to_string(),
        config.country_code.clone(),
        String::new(),
        sumaria.to_string(),
        record.order.to_string(),
    ]
}

fn placeholder_row(container: &str, sumaria: &Sumaria, config: &SheetConfig) -> SheetRow {
    let mut row = SheetRow::default();
    row[3] = config.placeholder_label.clone();
    row[8] = container.to_string();
    row[11] = sumaria.to_string();
    row
}

fn total_row(totals: &DocumentTotals, config: &SheetConfig) -> SheetRow {
    let mut row = SheetRow::default();
    row[0] = totals.packages.to_string();
    row[1] = totals.gross_mass_text();
    row[3] = config.total_label.clone();
    row
}

/// Sheet name for a source file: characters spreadsheets reject become `_`,
/// then the name is cut to 31 characters.
pub fn sheet_name(source: &str) -> String {
    let cleaned: String = source
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
            c => c,
        })
        .take(MAX_SHEET_NAME)
        .collect();

    let trimmed = cleaned.trim_matches('\'');
    if trimmed.is_empty() {
        "Sheet".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Make `name` distinct from `taken` (case-insensitive) with a `~N` suffix,
/// staying within the 31-character limit.
pub fn unique_sheet_name(name: &str, taken: &[String]) -> String {
    let clashes = |candidate: &str| taken.iter().any(|t| t.eq_ignore_ascii_case(candidate));

    if !clashes(name) {
        return name.to_string();
    }

    (2..)
        .map(|n| {
            let suffix = format!("~{n}");
            let keep = MAX_SHEET_NAME.saturating_sub(suffix.chars().count());
            let base: String = name.chars().take(keep).collect();
            format!("{base}{suffix}")
        })
        .find(|candidate| !clashes(candidate))
        .unwrap_or_else(|| name.to_string())
}
