//! Core library for T2L customs declaration processing.
//!
//! This crate provides:
//! - PDF text-layer loading
//! - Package count and gross mass extraction with positional pairing
//! - Per-document sheets with totals and a per-container summary
//! - Review workbook, customs TXT files, summary report and zip bundle

pub mod declaration;
pub mod error;
pub mod export;
pub mod models;
pub mod pdf;

pub use declaration::{align_pairs, locate_fields, BatchProcessor, BatchResult, SourceDocument};
pub use error::{ExtractionError, OutputError, PdfError, Result, T2lError};
pub use models::config::T2lConfig;
pub use models::declaration::{ContainerSummary, DocumentText, LineItemRecord, LocatedFields, Sumaria};
pub use pdf::{PdfExtractor, PdfProcessor};
