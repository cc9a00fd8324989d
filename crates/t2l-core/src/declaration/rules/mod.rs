//! Line-anchored field rules for T2L declarations.

pub mod container;
pub mod mass;
pub mod packages;
pub mod patterns;

pub use container::{container_code, NO_CONTAINER};
pub use mass::{normalize_mass, GrossMassExtractor};
pub use packages::PackageCountExtractor;

/// Trait for field extractors that look at one line at a time.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field anchored at `lines[index]`, if any.
    ///
    /// Implementations may look past `index` but must not panic when it is
    /// the last line.
    fn extract_at(&self, lines: &[String], index: usize) -> Option<Self::Output>;

    /// Extract every occurrence, in line order.
    fn extract_all(&self, lines: &[String]) -> Vec<Self::Output> {
        (0..lines.len())
            .filter_map(|i| self.extract_at(lines, i))
            .collect()
    }
}

/// A value matched on a given line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Index of the line carrying the field label.
    pub line: usize,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, line: usize, source: impl Into<String>) -> Self {
        Self {
            value,
            line,
            source: source.into(),
        }
    }
}
