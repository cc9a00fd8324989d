//! Per-document totals for the trailing TOTAL row.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

use crate::models::declaration::LineItemRecord;

/// Summed package count and gross mass of one document.
///
/// Tokens that do not parse, or would overflow the running sum, are left
/// out of the sum entirely; they do not count as zero and do not poison the
/// total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentTotals {
    /// Sum of all-digit package tokens.
    pub packages: u64,
    /// Sum of decimal mass tokens.
    pub gross_mass: Decimal,
}

impl DocumentTotals {
    pub fn from_records(records: &[LineItemRecord]) -> Self {
        let mut totals = Self::default();

        for record in records {
            match parse_package_count(&record.packages) {
                Some(n) => match totals.packages.checked_add(n) {
                    Some(sum) => totals.packages = sum,
                    None => debug!(order = record.order, token = %record.packages, "Package sum overflows, skipping token"),
                },
                None if !record.packages.is_empty() => {
                    debug!(order = record.order, token = %record.packages, "Skipping package token");
                }
                None => {}
            }

            match parse_mass(&record.gross_mass) {
                Some(m) => match totals.gross_mass.checked_add(m) {
                    Some(sum) => totals.gross_mass = sum,
                    None => debug!(order = record.order, token = %record.gross_mass, "Mass sum overflows, skipping token"),
                },
                None if !record.gross_mass.is_empty() => {
                    debug!(order = record.order, token = %record.gross_mass, "Skipping mass token");
                }
                None => {}
            }
        }

        totals
    }

    /// Total mass as written in the TOTAL row.
    pub fn gross_mass_text(&self) -> String {
        format_mass(self.gross_mass)
    }
}

/// Parse a package token: non-empty, ASCII digits only.
pub fn parse_package_count(token: &str) -> Option<u64> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

/// Parse a mass token, accepting `,` or `.` as the decimal separator.
pub fn parse_mass(token: &str) -> Option<Decimal> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    Decimal::from_str(&token.replace(',', ".")).ok()
}

/// Render a mass without trailing zeros; integral values lose the fraction.
pub fn format_mass(mass: Decimal) -> String {
    mass.normalize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn records(pairs: &[(&str, &str)]) -> Vec<LineItemRecord> {
        pairs
            .iter()
            .enumerate()
            .map(|(i, (p, m))| LineItemRecord {
                order: i as u32 + 1,
                packages: p.to_string(),
                gross_mass: m.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_empty_package_token_is_skipped() {
        let totals = DocumentTotals::from_records(&records(&[("10", ""), ("", ""), ("5", "")]));
        assert_eq!(totals.packages, 15);
        assert_eq!(totals.gross_mass, Decimal::ZERO);
    }

    #[test]
    fn test_non_numeric_tokens_are_skipped() {
        let totals = DocumentTotals::from_records(&records(&[
            ("10", "1.5"),
            ("1O", "abc"),
            ("+3", "2,5"),
        ]));
        assert_eq!(totals.packages, 10);
        assert_eq!(totals.gross_mass_text(), "4");
    }

    #[test]
    fn test_two_item_totals() {
        let totals =
            DocumentTotals::from_records(&records(&[("10", "450.5"), ("20", "900.25")]));
        assert_eq!(totals.packages, 30);
        assert_eq!(totals.gross_mass_text(), "1350.75");
    }

    #[test]
    fn test_overflowing_tokens_are_skipped() {
        let huge = "79228162514264337593543950335.0";
        let totals = DocumentTotals::from_records(&records(&[
            ("18446744073709551615", huge),
            ("5", huge),
            ("", "1.5"),
        ]));
        assert_eq!(totals.packages, u64::MAX);
        assert_eq!(totals.gross_mass, Decimal::MAX);
    }

    #[test]
    fn test_format_mass() {
        assert_eq!(format_mass(Decimal::from_str("1351.00").unwrap()), "1351");
        assert_eq!(format_mass(Decimal::from_str("80.0").unwrap()), "80");
        assert_eq!(format_mass(Decimal::from_str("0.50").unwrap()), "0.5");
        assert_eq!(format_mass(Decimal::ZERO), "0");
    }

    #[test]
    fn test_parse_mass() {
        assert_eq!(parse_mass("1234,56"), parse_mass("1234.56"));
        assert_eq!(parse_mass(" 7 "), Some(Decimal::from(7)));
        assert_eq!(parse_mass(""), None);
        assert_eq!(parse_mass("1.2.3"), None);
    }
}
