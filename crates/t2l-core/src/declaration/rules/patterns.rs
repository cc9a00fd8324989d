//! Regex patterns for T2L field extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // "Number of Packages: 12", "NUMBER  OF PACKAGES - 12", "number of packages12"
    pub static ref PACKAGES: Regex = Regex::new(
        r"(?i)number\s+of\s+packages\s*[:\-]?\s*(\d+)"
    ).unwrap();

    // Box 35 label, with or without the unit suffix
    pub static ref GROSS_MASS_LABEL: Regex = Regex::new(
        r"(?i)35\s+gross\s+mass(?:\s*\(\s*kg\s*\))?"
    ).unwrap();

    // Mass value: a fractional part is required, either separator
    pub static ref MASS_VALUE: Regex = Regex::new(
        r"\d+[.,]\d+"
    ).unwrap();

    // Container code embedded in the file name (owner code + serial)
    pub static ref CONTAINER_CODE: Regex = Regex::new(
        r"[A-Z]{4}\d{6}"
    ).unwrap();
}
