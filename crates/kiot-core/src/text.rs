//! Small text helpers for report output.

use crate::credentials::prefix_chars;

/// Keep at most `limit` characters, appending `...` when anything was cut.
pub fn truncate(value: &str, limit: usize) -> String {
    let head = prefix_chars(value, limit);
    if head.len() < value.len() {
        format!("{}...", head)
    } else {
        head.to_string()
    }
}
