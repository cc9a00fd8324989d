//! "Number of Packages" extraction.

use super::patterns::PACKAGES;
use super::{ExtractionMatch, FieldExtractor};

/// Package count extractor. One value per line at most.
pub struct PackageCountExtractor;

impl PackageCountExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PackageCountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for PackageCountExtractor {
    type Output = ExtractionMatch<String>;

    fn extract_at(&self, lines: &[String], index: usize) -> Option<Self::Output> {
        let line = lines.get(index)?;
        let caps = PACKAGES.captures(line)?;
        let full = caps.get(0)?;
        Some(ExtractionMatch::new(caps[1].to_string(), index, full.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &[&str]) -> Vec<String> {
        text.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_label_variants() {
        let extractor = PackageCountExtractor::new();
        let cases = [
            ("Number of Packages: 10", "10"),
            ("NUMBER   OF\tPACKAGES - 7", "7"),
            ("number of packages42", "42"),
            ("31 Number of Packages 003", "003"),
        ];

        for (line, expected) in cases {
            let found = extractor.extract_at(&lines(&[line]), 0);
            assert_eq!(found.map(|m| m.value), Some(expected.to_string()), "{line}");
        }
    }

    #[test]
    fn test_one_value_per_line() {
        let extractor = PackageCountExtractor::new();
        let text = lines(&["Number of Packages: 4 Number of Packages: 9"]);
        let all = extractor.extract_all(&text);
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].value, "4");
    }

    #[test]
    fn test_label_without_digits_is_skipped() {
        let extractor = PackageCountExtractor::new();
        let text = lines(&["Number of Packages:", "12", "Packages: 3"]);
        assert!(extractor.extract_all(&text).is_empty());
    }

    #[test]
    fn test_out_of_range_index() {
        let extractor = PackageCountExtractor::new();
        assert!(extractor.extract_at(&[], 0).is_none());
    }
}
