//! Review workbook: written after extraction, edited by an operator, then
//! read back to produce the TXT files.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use rust_xlsxwriter::{Format, Workbook};
use tracing::debug;

use super::sheet::{DocumentSheet, COLUMNS};
use crate::error::OutputError;

/// A worksheet as read back from a (possibly edited) workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewedSheet {
    pub name: String,
    /// First row of the sheet.
    pub header: Vec<String>,
    /// Remaining rows, every cell stringified.
    pub rows: Vec<Vec<String>>,
}

impl ReviewedSheet {
    /// Position of a named column.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Write one worksheet per document. Every cell is written as text.
pub fn write_workbook(sheets: &[DocumentSheet]) -> Result<Vec<u8>, OutputError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet.name.as_str())?;

        for (col, title) in COLUMNS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *title, &header_format)?;
        }

        for (r, row) in sheet.rows.iter().enumerate() {
            for (col, value) in row.iter().enumerate() {
                if !value.is_empty() {
                    worksheet.write_string(r as u32 + 1, col as u16, value.as_str())?;
                }
            }
        }

        worksheet.autofit();
    }

    let bytes = workbook.save_to_buffer()?;
    debug!("Wrote workbook with {} sheets ({} bytes)", sheets.len(), bytes.len());
    Ok(bytes)
}

/// Read every worksheet of an xlsx/xls/ods workbook.
pub fn read_workbook(bytes: &[u8]) -> Result<Vec<ReviewedSheet>, OutputError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| OutputError::WorkbookRead(format!("failed to open workbook: {}", e)))?;

    let names: Vec<String> = workbook.sheet_names().to_vec();
    let mut sheets = Vec::with_capacity(names.len());

    for name in names {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| OutputError::WorkbookRead(format!("sheet {}: {}", name, e)))?;
        sheets.push(parse_sheet(&name, &range));
    }

    debug!("Read {} sheets from workbook", sheets.len());
    Ok(sheets)
}

fn parse_sheet(name: &str, range: &Range<Data>) -> ReviewedSheet {
    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect::<Vec<_>>());

    let header = rows.next().unwrap_or_default();
    let rows = rows
        .filter(|row| row.iter().any(|c| !c.is_empty()))
        .collect();

    ReviewedSheet {
        name: name.to_string(),
        header,
        rows,
    }
}

/// Stringify a cell; integral floats lose their fraction.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{:.0}", f),
        Data::Float(f) => f.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::SheetConfig;
    use crate::models::declaration::{LineItemRecord, Sumaria};
    use pretty_assertions::assert_eq;

    fn sheets() -> Vec<DocumentSheet> {
        let sumaria = Sumaria::parse("12345678901").unwrap();
        let config = SheetConfig::default();
        vec![
            DocumentSheet::build(
                "MSCU123456.pdf",
                "MSCU123456",
                &sumaria,
                vec![LineItemRecord {
                    order: 1,
                    packages: "10".to_string(),
                    gross_mass: "450.5".to_string(),
                }],
                &config,
            ),
            DocumentSheet::build("scan.pdf", "SINCONT", &sumaria, Vec::new(), &config),
        ]
    }

    #[test]
    fn test_workbook_round_trip() {
        let written = sheets();
        let bytes = write_workbook(&written).unwrap();
        let read = read_workbook(&bytes).unwrap();

        assert_eq!(read.len(), 2);
        assert_eq!(read[0].name, "MSCU123456.pdf");
        assert_eq!(read[0].header, COLUMNS.map(String::from).to_vec());
        assert_eq!(read[0].rows, written[0].rows.iter().map(|r| r.to_vec()).collect::<Vec<_>>());
        assert_eq!(read[1].rows.len(), 1);
        assert_eq!(read[1].rows[0][3], "SIN PARTIDAS");
        assert_eq!(read[1].column("Sumaria"), Some(11));
    }

    #[test]
    fn test_read_rejects_garbage() {
        assert!(matches!(
            read_workbook(b"definitely not a spreadsheet"),
            Err(OutputError::WorkbookRead(_))
        ));
    }

    #[test]
    fn test_cell_to_string() {
        assert_eq!(cell_to_string(&Data::Float(10.0)), "10");
        assert_eq!(cell_to_string(&Data::Float(450.5)), "450.5");
        assert_eq!(cell_to_string(&Data::Int(3)), "3");
        assert_eq!(cell_to_string(&Data::String(" x ".to_string())), "x");
        assert_eq!(cell_to_string(&Data::Empty), "");
    }
}
