//! Shared parsing utilities for directory and scheduler output.
//!
//! This crate provides the parsing and command helpers used by the
//! identity, accounting, and quota crates.

pub mod command;
pub mod nss;
pub mod time;

pub use command::{CommandError, run_command};
pub use nss::{GroupEntry, PasswdEntry, parse_group, parse_group_line, parse_passwd, parse_passwd_line};
pub use time::{parse_cpu_time_raw, parse_report_date};

/// Filter helper for optional string fields.
/// Returns None if the string is blank. Any other text, including
/// placeholder-looking values such as `-` or `NA`, is kept as written.
pub fn non_empty_string(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Split a delimited line and validate field count.
pub fn split_delimited(line: &str, sep: char, min_fields: usize) -> Result<Vec<&str>, String> {
    let fields: Vec<&str> = line.split(sep).collect();
    if fields.len() < min_fields {
        return Err(format!(
            "Expected {} fields, got {}: {}",
            min_fields,
            fields.len(),
            line
        ));
    }
    Ok(fields)
}
