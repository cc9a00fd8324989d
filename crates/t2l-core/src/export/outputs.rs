//! Assembles every artifact of a finished batch.

use tracing::info;

use super::bundle::{write_bundle, BundleEntry};
use super::report::Report;
use super::txt::{render_all, TxtFile};
use super::workbook::{read_workbook, write_workbook};
use crate::declaration::BatchResult;
use crate::error::Result;
use crate::models::config::T2lConfig;

/// Workbook, report and (optionally) TXT files for one batch.
#[derive(Debug, Clone)]
pub struct BatchOutputs {
    pub workbook: BundleEntry,
    pub report: BundleEntry,
    pub report_text: String,
    pub txt_files: Vec<TxtFile>,
}

impl BatchOutputs {
    /// Render the review workbook and the report.
    pub fn build(result: &BatchResult, config: &T2lConfig) -> Result<Self> {
        let workbook = write_workbook(&result.sheets)?;

        let report = Report::new(&config.report, result.summary.clone(), result.elapsed);
        let report_pdf = report.render_pdf()?;

        Ok(Self {
            workbook: BundleEntry::new(config.output.workbook_name.as_str(), workbook),
            report: BundleEntry::new(config.output.report_name.as_str(), report_pdf),
            report_text: report.render_text(),
            txt_files: Vec::new(),
        })
    }

    /// Produce the TXT files straight from the unreviewed workbook.
    pub fn with_txt(mut self, config: &T2lConfig) -> Result<Self> {
        let sheets = read_workbook(&self.workbook.data)?;
        self.txt_files = render_all(&sheets, &config.txt)?;
        info!("Rendered {} TXT files", self.txt_files.len());
        Ok(self)
    }

    /// Every artifact as archive entries: workbook, report, then TXT files.
    pub fn entries(&self) -> Vec<BundleEntry> {
        let mut entries = vec![self.workbook.clone(), self.report.clone()];
        entries.extend(
            self.txt_files
                .iter()
                .map(|f| BundleEntry::new(f.file_name(), f.content.as_bytes())),
        );
        entries
    }

    /// Zip every artifact into memory.
    pub fn bundle(&self) -> Result<Vec<u8>> {
        let cursor = write_bundle(std::io::Cursor::new(Vec::new()), &self.entries())?;
        Ok(cursor.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::{BatchProcessor, SourceDocument};
    use crate::models::declaration::Sumaria;
    use pretty_assertions::assert_eq;

    fn batch() -> BatchResult {
        let docs = [
            SourceDocument::from_raw(
                "T2L_MSCU1234567.pdf",
                "Number of Packages: 10\n35 Gross Mass (kg)\n450.5\n\
                 Number of Packages: 20\n35 Gross Mass (kg)\n900,25",
            ),
            SourceDocument::from_raw("scan.pdf", ""),
        ];
        let config = T2lConfig::default();
        BatchProcessor::new(Sumaria::parse("12345678901").unwrap(), config.sheet)
            .process_all(&docs)
            .unwrap()
    }

    #[test]
    fn test_build_with_txt() {
        let config = T2lConfig::default();
        let outputs = BatchOutputs::build(&batch(), &config)
            .unwrap()
            .with_txt(&config)
            .unwrap();

        assert_eq!(outputs.workbook.name, "T2L_RESULTADO.xlsx");
        assert_eq!(outputs.report.name, "INFORME_T2L.pdf");
        assert!(outputs.report_text.contains("MSCU123456   Total partidas: 2"));
        assert!(outputs.report_text.contains("SINCONT   Total partidas: 0"));

        assert_eq!(outputs.txt_files.len(), 2);
        assert_eq!(
            outputs.txt_files[0].content,
            "10;450,5;1;RECEPCION T2L;;;3401110000;1;MSCU123456;ES;;12345678901;1\n\
             20;900,25;1;RECEPCION T2L;;;3401110000;1;MSCU123456;ES;;12345678901;2\n"
        );
        assert_eq!(
            outputs.txt_files[1].content,
            ";;;SIN PARTIDAS;;;;;SINCONT;;;12345678901;\n"
        );
    }

    #[test]
    fn test_entries_and_bundle() {
        let config = T2lConfig::default();
        let outputs = BatchOutputs::build(&batch(), &config)
            .unwrap()
            .with_txt(&config)
            .unwrap();

        let names: Vec<_> = outputs.entries().into_iter().map(|e| e.name).collect();
        assert_eq!(
            names,
            vec![
                "T2L_RESULTADO.xlsx",
                "INFORME_T2L.pdf",
                "T2L_MSCU1234567.pdf.txt",
                "scan.pdf.txt",
            ]
        );
        assert!(outputs.bundle().unwrap().starts_with(b"PK"));
    }
}
