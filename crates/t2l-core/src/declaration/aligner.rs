//! Pair aligner: turns the two located value sequences into line items.
//!
//! Pairing is purely positional: the n-th package count goes with the n-th
//! gross mass. This assumes a declaration prints both fields of an item in
//! the same relative order. Nothing checks that assumption; when the
//! sequences differ in length the shorter one is padded with empty values
//! and a debug event is emitted so the mismatch is visible in logs.

use tracing::debug;

use crate::models::declaration::{LineItemRecord, LocatedFields};

/// Zip package and mass values by index, padding the shorter side with
/// empty strings. Orders start at 1.
pub fn align_pairs(packages: &[String], masses: &[String]) -> Vec<LineItemRecord> {
    let n = packages.len().max(masses.len());

    if packages.len() != masses.len() {
        debug!(
            packages = packages.len(),
            masses = masses.len(),
            "Package and mass counts differ, padding {} records",
            n - packages.len().min(masses.len())
        );
    }

    (0..n)
        .map(|idx| LineItemRecord {
            order: (idx + 1) as u32,
            packages: packages.get(idx).cloned().unwrap_or_default(),
            gross_mass: masses.get(idx).cloned().unwrap_or_default(),
        })
        .collect()
}

impl LocatedFields {
    /// Align these fields into line items.
    pub fn align(&self) -> Vec<LineItemRecord> {
        align_pairs(&self.packages, &self.masses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::locate_fields;
    use crate::models::declaration::DocumentText;
    use pretty_assertions::assert_eq;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn record(order: u32, packages: &str, gross_mass: &str) -> LineItemRecord {
        LineItemRecord {
            order,
            packages: packages.to_string(),
            gross_mass: gross_mass.to_string(),
        }
    }

    #[test]
    fn test_equal_lengths() {
        let records = align_pairs(&strings(&["10", "20"]), &strings(&["450.5", "900.25"]));
        assert_eq!(
            records,
            vec![record(1, "10", "450.5"), record(2, "20", "900.25")]
        );
    }

    #[test]
    fn test_more_packages_than_masses() {
        let records = align_pairs(&strings(&["1", "2", "3"]), &strings(&["5.5"]));
        assert_eq!(
            records,
            vec![record(1, "1", "5.5"), record(2, "2", ""), record(3, "3", "")]
        );
    }

    #[test]
    fn test_more_masses_than_packages() {
        let records = align_pairs(&[], &strings(&["1.5", "2.5"]));
        assert_eq!(records, vec![record(1, "", "1.5"), record(2, "", "2.5")]);
    }

    #[test]
    fn test_both_empty() {
        assert!(align_pairs(&[], &[]).is_empty());
    }

    #[test]
    fn test_orders_are_contiguous() {
        let packages: Vec<String> = (0..50).map(|i| i.to_string()).collect();
        let records = align_pairs(&packages, &strings(&["1.0"]));
        assert_eq!(records.len(), 50);
        for (idx, record) in records.iter().enumerate() {
            assert_eq!(record.order as usize, idx + 1);
        }
    }

    /// Both package counts printed ahead of both masses, with the masses
    /// listed in reverse item order. Pairing follows text order only, so
    /// the counts get swapped masses. Pins current behavior.
    #[test]
    fn test_out_of_order_fields_pair_by_position() {
        let text = DocumentText::from_raw(
            "Number of Packages: 10\n\
             Number of Packages: 20\n\
             35 Gross Mass (kg)\n\
             200,0\n\
             35 Gross Mass (kg)\n\
             100,0",
        );
        let records = locate_fields(&text).align();
        assert_eq!(
            records,
            vec![record(1, "10", "200.0"), record(2, "20", "100.0")]
        );
    }
}
