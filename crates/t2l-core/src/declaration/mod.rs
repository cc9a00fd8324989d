//! T2L declaration field extraction.
//!
//! Text flows through [`locate_fields`] into [`align_pairs`], producing one
//! [`LineItemRecord`](crate::models::declaration::LineItemRecord) per
//! package/mass pair. [`BatchProcessor`] runs that pipeline over a batch
//! of documents and builds their output sheets.

mod aligner;
pub mod batch;
mod locator;
pub mod rules;
pub mod totals;

pub use aligner::align_pairs;
pub use batch::{BatchProcessor, BatchResult, SourceDocument};
pub use locator::{locate_fields, FieldLocator};
pub use totals::DocumentTotals;
