//! Output artifacts built from a processed batch.

pub mod bundle;
pub mod outputs;
pub mod report;
pub mod sheet;
pub mod txt;
pub mod workbook;

pub use bundle::{write_bundle, BundleEntry};
pub use outputs::BatchOutputs;
pub use report::Report;
pub use sheet::{DocumentSheet, COLUMNS};
pub use txt::{render_all, render_txt, TxtFile};
pub use workbook::{read_workbook, write_workbook, ReviewedSheet};
