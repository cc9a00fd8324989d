//! Error types for the t2l-core library.
//!
//! Field location, pairing and totals never fail; everything in here comes
//! from the collaborators around them (PDF loading, spreadsheet and archive
//! I/O, batch input validation).

use thiserror::Error;

/// Main error type for the t2l library.
#[derive(Error, Debug)]
pub enum T2lError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Batch input could not be accepted.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Writing or reading an output artifact failed.
    #[error("output error: {0}")]
    Output(#[from] OutputError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors raised while validating batch input.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The manifest reference is not exactly 11 digits.
    #[error("invalid sumaria {0:?}: expected exactly 11 digits")]
    InvalidSumaria(String),

    /// The batch contained no documents.
    #[error("no documents to process")]
    NoDocuments,
}

/// Errors related to writing and reading output artifacts.
#[derive(Error, Debug)]
pub enum OutputError {
    /// Spreadsheet could not be written.
    #[error("failed to write workbook: {0}")]
    WorkbookWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Spreadsheet could not be read back.
    #[error("failed to read workbook: {0}")]
    WorkbookRead(String),

    /// Delimited text output failed.
    #[error("failed to write TXT: {0}")]
    Txt(#[from] csv::Error),

    /// The configured TXT delimiter cannot be written as one byte.
    #[error("invalid TXT delimiter {0:?}: expected a single ASCII character")]
    InvalidDelimiter(char),

    /// PDF report rendering failed.
    #[error("failed to render report: {0}")]
    Report(String),

    /// Archive creation failed.
    #[error("failed to write bundle: {0}")]
    Bundle(#[from] zip::result::ZipError),
}

/// Result type for the t2l library.
pub type Result<T> = std::result::Result<T, T2lError>;
