//! Zip archive of every output artifact.

use std::io::{Seek, Write};

use tracing::debug;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::OutputError;

/// One file inside the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleEntry {
    pub name: String,
    pub data: Vec<u8>,
}

impl BundleEntry {
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }
}

/// Write the entries, deflated, in the order given.
pub fn write_bundle<W: Write + Seek>(writer: W, entries: &[BundleEntry]) -> Result<W, OutputError> {
    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in entries {
        zip.start_file(entry.name.as_str(), options)?;
        zip.write_all(&entry.data).map_err(ZipError::from)?;
        debug!("Bundled {} ({} bytes)", entry.name, entry.data.len());
    }

    Ok(zip.finish()?)
}
