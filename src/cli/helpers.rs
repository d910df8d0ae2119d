//! Shared helper functions for CLI commands
//!
//! This module contains utility functions that are used across multiple
//! command modules to avoid code duplication.

use console::style;

use crate::model::notice::{Notice, Severity};

/// Truncate a string to max_len bytes, adding "..." if truncated
///
/// Useful for table columns that need fixed-width output. Cuts on a char
/// boundary, so multi-byte names from catalog documents never split.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }

    let budget = max_len.saturating_sub(3);
    let mut end = 0;
    for (idx, ch) in s.char_indices() {
        if idx + ch.len_utf8() > budget {
            break;
        }
        end = idx + ch.len_utf8();
    }
    format!("{}...", &s[..end])
}

/// Escape a string for CSV output
///
/// Handles commas, quotes, and newlines according to RFC 4180.
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Format a price in whole currency units
pub fn format_price(price: f64) -> String {
    format!("${}", price.round() as i64)
}

/// Render a notice with its severity color
pub fn styled_notice(notice: &Notice) -> String {
    let tag = format!("[{}] {}", notice.severity, notice.kind);
    let tag = match notice.severity {
        Severity::Warning => style(tag).yellow(),
        Severity::Error => style(tag).red(),
        Severity::Critical => style(tag).red().bold(),
    };
    format!("{} {}", tag, notice.message)
}
