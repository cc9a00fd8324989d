//! Data models for T2L transit declarations.

use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;

/// Text extracted from one document, as trimmed non-empty lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentText {
    lines: Vec<String>,
}

impl DocumentText {
    /// Normalize raw extracted text: split into lines, trim each one and
    /// drop the empty ones.
    pub fn from_raw(text: &str) -> Self {
        Self::from_lines(text.lines())
    }

    /// Apply the same normalization to text that is already split.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines = lines
            .into_iter()
            .map(|l| l.as_ref().trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Raw field values found in one document, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocatedFields {
    /// Digit strings captured next to "Number of Packages".
    pub packages: Vec<String>,
    /// Decimal strings captured after "35 Gross Mass", with `.` as separator.
    pub masses: Vec<String>,
}

impl LocatedFields {
    /// Number of line items these values describe.
    pub fn item_count(&self) -> usize {
        self.packages.len().max(self.masses.len())
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty() && self.masses.is_empty()
    }
}

/// One declared package/mass pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemRecord {
    /// 1-based position in emission order ("Orden").
    pub order: u32,

    /// Package count ("Bultos"), empty when missing.
    pub packages: String,

    /// Gross mass in kg ("Kilos"), empty when missing.
    pub gross_mass: String,
}

/// Customs manifest reference shared by every line item of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Sumaria(String);

impl Sumaria {
    /// Required length of a manifest reference.
    pub const LEN: usize = 11;

    /// Accept exactly eleven ASCII digits (surrounding whitespace ignored).
    pub fn parse(s: &str) -> Result<Self, ExtractionError> {
        let s = s.trim();
        if s.len() == Self::LEN && s.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(s.to_string()))
        } else {
            Err(ExtractionError::InvalidSumaria(s.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Sumaria {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Sumaria {
    type Error = ExtractionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Sumaria> for String {
    fn from(value: Sumaria) -> Self {
        value.0
    }
}

/// Line-item count per container, in first-seen order.
///
/// Append-only: each processed document contributes exactly one entry.
/// A container seen again keeps its position and takes the later count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSummary {
    entries: Vec<(String, usize)>,
}

impl ContainerSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the line-item count for a finished document.
    pub fn record(&mut self, container: impl Into<String>, items: usize) {
        let container = container.into();
        match self.entries.iter_mut().find(|(c, _)| *c == container) {
            Some(entry) => entry.1 = items,
            None => self.entries.push((container, items)),
        }
    }

    /// Count recorded for a container.
    pub fn get(&self, container: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(c, _)| c == container)
            .map(|(_, n)| *n)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(c, n)| (c.as_str(), *n))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of line items across all containers.
    pub fn total_items(&self) -> usize {
        self.entries.iter().map(|(_, n)| n).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_document_text_normalization() {
        let text = DocumentText::from_raw("  first \r\n\n\t\n second\n   \nthird  ");
        assert_eq!(text.lines(), ["first", "second", "third"]);
        assert_eq!(text.len(), 3);
    }

    #[test]
    fn test_document_text_empty() {
        assert!(DocumentText::from_raw("").is_empty());
        assert!(DocumentText::from_raw(" \n \r\n\t").is_empty());
    }

    #[test]
    fn test_sumaria_validation() {
        assert_eq!(Sumaria::parse(" 12345678901 ").unwrap().as_str(), "12345678901");
        assert!(Sumaria::parse("1234567890").is_err());
        assert!(Sumaria::parse("123456789012").is_err());
        assert!(Sumaria::parse("1234567890a").is_err());
        assert!(Sumaria::parse("").is_err());
    }

    #[test]
    fn test_container_summary_order_and_replace() {
        let mut summary = ContainerSummary::new();
        summary.record("MSCU123456", 3);
        summary.record("SINCONT", 0);
        summary.record("MSCU123456", 5);

        let entries: Vec<_> = summary.iter().collect();
        assert_eq!(entries, vec![("MSCU123456", 5), ("SINCONT", 0)]);
        assert_eq!(summary.total_items(), 5);
        assert_eq!(summary.get("SINCONT"), Some(0));
        assert_eq!(summary.get("ABCD000000"), None);
    }
}
