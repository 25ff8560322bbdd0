//! Time parsing utilities for accounting output and report windows.

use chrono::NaiveDate;

/// Parse one `CPUTimeRaw` value (whole CPU-seconds) from sacct output.
///
/// sacct pads columns with spaces, so surrounding whitespace is ignored.
pub fn parse_cpu_time_raw(s: &str) -> Result<u64, String> {
    let trimmed = s.trim();
    trimmed
        .parse::<u64>()
        .map_err(|_| format!("Invalid CPUTimeRaw value: '{}'", trimmed))
}

/// Parse a report boundary date formatted as `YYYY-MM-DD`.
pub fn parse_report_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| format!("Invalid date '{}' (expected YYYY-MM-DD): {}", s, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cpu_time_raw() {
        assert_eq!(parse_cpu_time_raw("3600"), Ok(3600));
        assert_eq!(parse_cpu_time_raw("      42 "), Ok(42));
        assert_eq!(parse_cpu_time_raw("0"), Ok(0));
        assert!(parse_cpu_time_raw("01:00:00").is_err());
        assert!(parse_cpu_time_raw("").is_err());
        assert!(parse_cpu_time_raw("-5").is_err());
    }

    #[test]
    fn test_parse_report_date() {
        let date = parse_report_date("2023-01-31").unwrap();
        assert_eq!(date.format("%Y-%m-%d").to_string(), "2023-01-31");

        assert!(parse_report_date("2023-02-30").is_err());
        assert!(parse_report_date("01/31/2023").is_err());
        assert!(parse_report_date("").is_err());
    }
}
