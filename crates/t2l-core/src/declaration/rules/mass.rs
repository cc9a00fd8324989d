//! Box 35 "Gross Mass" extraction.
//!
//! The value usually sits on the line after the label, so the rule searches
//! the label line joined with the following one. Only values with a
//! fractional part are accepted: a bare integer such as `1234` is never
//! picked up.

use super::patterns::{GROSS_MASS_LABEL, MASS_VALUE};
use super::{ExtractionMatch, FieldExtractor};

/// Gross mass extractor.
pub struct GrossMassExtractor;

impl GrossMassExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Label line plus the next line, joined by a single space so digit runs
    /// on both sides of the break stay apart.
    fn window(lines: &[String], index: usize) -> Option<String> {
        let line = lines.get(index)?;
        Some(match lines.get(index + 1) {
            Some(next) => format!("{line} {next}"),
            None => line.clone(),
        })
    }
}

impl Default for GrossMassExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for GrossMassExtractor {
    type Output = ExtractionMatch<String>;

    fn extract_at(&self, lines: &[String], index: usize) -> Option<Self::Output> {
        if !GROSS_MASS_LABEL.is_match(lines.get(index)?) {
            return None;
        }

        let window = Self::window(lines, index)?;
        let found = MASS_VALUE.find(&window)?;
        Some(ExtractionMatch::new(
            normalize_mass(found.as_str()),
            index,
            found.as_str(),
        ))
    }
}

/// Rewrite the decimal separator to `.`.
pub fn normalize_mass(raw: &str) -> String {
    raw.replace(',', ".")
}
