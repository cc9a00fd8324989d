//! Configuration structures for the T2L pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration for the t2l pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct T2lConfig {
    /// Constant columns written on every line-item row.
    pub sheet: SheetConfig,

    /// Customs ingestion TXT settings.
    pub txt: TxtConfig,

    /// Summary report settings.
    pub report: ReportConfig,

    /// Output file naming.
    pub output: OutputConfig,
}

/// Fixed values of the per-document sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    /// Value of `Fijo_col3` and `Fijo_col8` on line-item rows.
    pub unit_flag: String,

    /// Value of `Fijo_col4` on line-item rows.
    pub reception_label: String,

    /// Value of `Fijo_col7` (tariff code).
    pub tariff_code: String,

    /// Value of `Fijo_col10` (country code).
    pub country_code: String,

    /// `Fijo_col4` of the row emitted for documents without line items.
    pub placeholder_label: String,

    /// `Fijo_col4` of the trailing totals row.
    pub total_label: String,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            unit_flag: "1".to_string(),
            reception_label: "RECEPCION T2L".to_string(),
            tariff_code: "3401110000".to_string(),
            country_code: "ES".to_string(),
            placeholder_label: "SIN PARTIDAS".to_string(),
            total_label: "TOTAL".to_string(),
        }
    }
}

/// Delimited TXT output for the customs system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TxtConfig {
    /// Field delimiter.
    pub delimiter: char,

    /// Decimal separator used for fractional masses.
    pub decimal_separator: char,
}

impl Default for TxtConfig {
    fn default() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
        }
    }
}

/// Human-readable summary report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Report heading.
    pub title: String,

    /// Signature line printed at the bottom of the last page.
    pub footer: String,

    /// Optional logo (PNG or JPEG) drawn in the top-left corner of the
    /// first page.
    pub logo_path: Option<PathBuf>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "INFORME PROCESAMIENTO T2L".to_string(),
            footer: "Firmado: Sistema Automatizado Departamento de Procesos".to_string(),
            logo_path: None,
        }
    }
}

/// Output file names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Review workbook file name.
    pub workbook_name: String,

    /// PDF report file name.
    pub report_name: String,

    /// Archive file name.
    pub bundle_name: String,

    /// Also package every artifact into a zip archive.
    pub write_bundle: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            workbook_name: "T2L_RESULTADO.xlsx".to_string(),
            report_name: "INFORME_T2L.pdf".to_string(),
            bundle_name: "T2L_SALIDA.zip".to_string(),
            write_bundle: false,
        }
    }
}

impl T2lConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
