//! Sequential processing of a batch of declarations.

use std::path::Path;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::error::{ExtractionError, Result};
use crate::export::sheet::{unique_sheet_name, DocumentSheet};
use crate::models::config::SheetConfig;
use crate::models::declaration::{ContainerSummary, DocumentText, Sumaria};
use crate::pdf::PdfExtractor;

use super::locator::FieldLocator;
use super::rules::container_code;

/// One uploaded document: its file name and extracted text.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub name: String,
    pub text: DocumentText,
}

impl SourceDocument {
    pub fn new(name: impl Into<String>, text: DocumentText) -> Self {
        Self {
            name: name.into(),
            text,
        }
    }

    /// Convenience constructor from unnormalized text.
    pub fn from_raw(name: impl Into<String>, text: &str) -> Self {
        Self::new(name, DocumentText::from_raw(text))
    }

    /// Extract the text layer of an in-memory PDF.
    pub fn from_pdf(name: impl Into<String>, data: &[u8]) -> Result<Self> {
        Ok(Self::new(name, PdfExtractor::document_text(data)?))
    }

    /// Read a PDF from disk; the document is named after the file.
    pub fn from_pdf_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let data = std::fs::read(path)?;
        Self::from_pdf(name, &data)
    }
}

/// Output of a finished batch.
#[derive(Debug, Clone)]
pub struct BatchResult {
    /// One sheet per document, in input order.
    pub sheets: Vec<DocumentSheet>,
    /// Line-item count per container.
    pub summary: ContainerSummary,
    /// Wall time spent processing.
    pub elapsed: Duration,
}

/// Processes documents one at a time, in the order they are given.
pub struct BatchProcessor {
    sumaria: Sumaria,
    config: SheetConfig,
    locator: FieldLocator,
    sheets: Vec<DocumentSheet>,
    summary: ContainerSummary,
    started: Instant,
}

impl BatchProcessor {
    pub fn new(sumaria: Sumaria, config: SheetConfig) -> Self {
        Self {
            sumaria,
            config,
            locator: FieldLocator::new(),
            sheets: Vec::new(),
            summary: ContainerSummary::new(),
            started: Instant::now(),
        }
    }

    /// Extract one document and append its sheet and summary entry.
    pub fn process_document(&mut self, document: &SourceDocument) -> &DocumentSheet {
        let container = container_code(&document.name);
        let records = self.locator.locate(&document.text).align();

        let mut sheet = DocumentSheet::build(
            &document.name,
            &container,
            &self.sumaria,
            records,
            &self.config,
        );

        let taken: Vec<String> = self.sheets.iter().map(|s| s.name.clone()).collect();
        let name = unique_sheet_name(&sheet.name, &taken);
        if name != sheet.name {
            debug!("Sheet name {:?} already used, renamed to {:?}", sheet.name, name);
            sheet.name = name;
        }

        info!(
            "{}: container {}, {} line items",
            document.name,
            container,
            sheet.item_count()
        );

        self.summary.record(container, sheet.item_count());
        self.sheets.push(sheet);
        &self.sheets[self.sheets.len() - 1]
    }

    /// Process every document and finish the batch.
    pub fn process_all<'a, I>(mut self, documents: I) -> Result<BatchResult>
    where
        I: IntoIterator<Item = &'a SourceDocument>,
    {
        for document in documents {
            self.process_document(document);
        }
        self.finish()
    }

    /// Number of documents processed so far.
    pub fn processed(&self) -> usize {
        self.sheets.len()
    }

    pub fn finish(self) -> Result<BatchResult> {
        if self.sheets.is_empty() {
            return Err(ExtractionError::NoDocuments.into());
        }

        let elapsed = self.started.elapsed();
        info!(
            "Processed {} documents ({} line items) in {:?}",
            self.sheets.len(),
            self.summary.total_items(),
            elapsed
        );

        Ok(BatchResult {
            sheets: self.sheets,
            summary: self.summary,
            elapsed,
        })
    }
}
