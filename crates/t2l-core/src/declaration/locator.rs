//! Field locator: finds every package count and gross mass in a document.
//!
//! Two independent passes over the lines, one per field. Neither pass looks
//! at the other's results; pairing happens later in the aligner. Lines that
//! do not match are skipped without error, so any text (including garbage)
//! yields two possibly empty sequences.

use tracing::{debug, trace};

use crate::models::declaration::{DocumentText, LocatedFields};

use super::rules::{FieldExtractor, GrossMassExtractor, PackageCountExtractor};

/// Locates package and mass fields in extracted document text.
pub struct FieldLocator {
    packages: PackageCountExtractor,
    mass: GrossMassExtractor,
}

impl FieldLocator {
    pub fn new() -> Self {
        Self {
            packages: PackageCountExtractor::new(),
            mass: GrossMassExtractor::new(),
        }
    }

    /// Scan the document and return both value sequences in line order.
    pub fn locate(&self, text: &DocumentText) -> LocatedFields {
        let lines = text.lines();

        let packages: Vec<String> = self
            .packages
            .extract_all(lines)
            .into_iter()
            .map(|m| {
                trace!(line = m.line + 1, value = %m.value, "package count");
                m.value
            })
            .collect();

        let masses: Vec<String> = self
            .mass
            .extract_all(lines)
            .into_iter()
            .map(|m| {
                trace!(line = m.line + 1, source = %m.source, value = %m.value, "gross mass");
                m.value
            })
            .collect();

        debug!(
            "Located {} package counts and {} gross masses in {} lines",
            packages.len(),
            masses.len(),
            lines.len()
        );

        LocatedFields { packages, masses }
    }
}

impl Default for FieldLocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Locate package and mass fields with the default rules.
pub fn locate_fields(text: &DocumentText) -> LocatedFields {
    FieldLocator::new().locate(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TWO_ITEMS: &str = "
        T2L
        Number of Packages: 10
        35 Gross Mass (kg)
        450.5
        Number of Packages: 20
        35 Gross Mass (kg)
        900,25
    ";

    #[test]
    fn test_locate_two_items() {
        let fields = locate_fields(&DocumentText::from_raw(TWO_ITEMS));
        assert_eq!(fields.packages, vec!["10", "20"]);
        assert_eq!(fields.masses, vec!["450.5", "900.25"]);
        assert_eq!(fields.item_count(), 2);
    }

    #[test]
    fn test_empty_text() {
        let fields = locate_fields(&DocumentText::from_raw(""));
        assert!(fields.is_empty());
        assert_eq!(fields.item_count(), 0);
    }

    #[test]
    fn test_garbage_text() {
        let bytes: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
        let text = String::from_utf8_lossy(&bytes);
        let fields = locate_fields(&DocumentText::from_raw(&text));
        assert!(fields.is_empty());
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let text = DocumentText::from_raw(TWO_ITEMS);
        assert_eq!(locate_fields(&text), locate_fields(&text));
    }

    #[test]
    fn test_sequences_are_independent() {
        let text = DocumentText::from_raw(
            "Number of Packages: 1\nNumber of Packages: 2\nNumber of Packages: 3\n35 Gross Mass\n5,5",
        );
        let fields = locate_fields(&text);
        assert_eq!(fields.packages, vec!["1", "2", "3"]);
        assert_eq!(fields.masses, vec!["5.5"]);
    }

    #[test]
    fn test_label_line_counts_for_both_fields() {
        let text = DocumentText::from_raw("Number of Packages: 8 35 Gross Mass (kg) 80,0");
        let fields = locate_fields(&text);
        assert_eq!(fields.packages, vec!["8"]);
        assert_eq!(fields.masses, vec!["80.0"]);
    }
}
