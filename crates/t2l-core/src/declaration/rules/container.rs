//! Container identifier from the document file name.

use super::patterns::CONTAINER_CODE;

/// Used when the file name carries no container code.
pub const NO_CONTAINER: &str = "SINCONT";

/// First `AAAA000000` code in the file name, or [`NO_CONTAINER`].
pub fn container_code(file_name: &str) -> String {
    CONTAINER_CODE
        .find(file_name)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| NO_CONTAINER.to_string())
}
