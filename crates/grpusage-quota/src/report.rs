use crate::types::QuotaReport;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuotaError {
    #[error("Failed to read quota report {path}: {source}")]
    Io {
        path: Utf8PathBuf,
        source: std::io::Error,
    },
    #[error("Malformed quota report at line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// Default directory holding the generated `<group>-quota-report.txt` files.
pub const DEFAULT_QUOTA_ROOT: &str = "/gpfs/data/ccvstaff/quota-reports";

/// Header lines preceding the data rows.
const HEADER_LINES: usize = 4;

/// Columns per row: username, parent, type, GB used/avail/hard/grace,
/// an unlabelled column, then file counts used/soft/hard/grace.
const FIELD_COUNT: usize = 12;

const USERNAME_COL: usize = 0;
const GB_USED_COL: usize = 3;
const GB_AVAIL_COL: usize = 4;

/// Path of the quota report for `group` under `root`.
pub fn quota_report_path(root: &Utf8Path, group: &str) -> Utf8PathBuf {
    root.join(format!("{group}-quota-report.txt"))
}

/// Parse quota report text.
///
/// The first data row after the headers is the group total and is returned
/// separately; it never appears in the per-user table.
pub fn parse_quota_report(content: &str) -> Result<QuotaReport, QuotaError> {
    let mut rows = content
        .lines()
        .enumerate()
        .skip(HEADER_LINES)
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| parse_row(idx + 1, line));

    let (_, total_used_gb, total_avail_gb) = rows.next().transpose()?.ok_or(QuotaError::Parse {
        line: HEADER_LINES + 1,
        message: "missing total row".to_string(),
    })?;

    let mut users = std::collections::BTreeMap::new();
    for row in rows {
        let (username, used_gb, _) = row?;
        if users.insert(username.clone(), used_gb).is_some() {
            tracing::warn!(user = %username, "duplicate quota report row, keeping the last");
        }
    }

    Ok(QuotaReport {
        total_used_gb,
        total_avail_gb,
        users,
    })
}

/// Read and parse the quota report at `path`.
pub fn read_quota_report(path: &Utf8Path) -> Result<QuotaReport, QuotaError> {
    let content = fs::read_to_string(path).map_err(|source| QuotaError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let report = parse_quota_report(&content)?;

    tracing::info!(
        %path,
        users = report.users.len(),
        total_used_gb = report.total_used_gb,
        total_avail_gb = report.total_avail_gb,
        "read quota report"
    );

    Ok(report)
}

/// Parse one data row into (username, GB used, GB available).
fn parse_row(line: usize, text: &str) -> Result<(String, f64, f64), QuotaError> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.len() != FIELD_COUNT {
        return Err(QuotaError::Parse {
            line,
            message: format!("expected {} fields, got {}", FIELD_COUNT, fields.len()),
        });
    }

    let number = |col: usize, what: &str| {
        fields[col].parse::<f64>().map_err(|_| QuotaError::Parse {
            line,
            message: format!("invalid {} value '{}'", what, fields[col]),
        })
    };

    Ok((
        fields[USERNAME_COL].to_string(),
        number(GB_USED_COL, "GB_used")?,
        number(GB_AVAIL_COL, "GB_avail")?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    const SAMPLE: &str = "\
Quota report for fileset ccv-lab
Generated 2023-02-01 03:00

Name       fileset type      GB_used  GB_avail  GB_hard  GB_grace | files_used files_soft files_hard files_grace
TOTAL      ccv-lab FILESET   1200     1000      1100     none     |  50000  1000000  1100000  none
alice      ccv-lab USR       42       0         0        none     |  12000  0        0        none
bob        ccv-lab USR       7.9      0         0        none     |  300    0        0        none
";

    #[test]
    fn test_parse_quota_report() {
        let report = parse_quota_report(SAMPLE).unwrap();
        assert_eq!(report.total_used_gb, 1200.0);
        assert_eq!(report.total_avail_gb, 1000.0);
        assert_eq!(report.users.len(), 2);
        assert_eq!(report.used_gb("alice"), Some(42.0));
        assert_eq!(report.used_gb("bob"), Some(7.9));
    }

    #[test]
    fn test_total_row_excluded() {
        let report = parse_quota_report(SAMPLE).unwrap();
        assert!(report.used_gb("TOTAL").is_none());
    }

    #[test]
    fn test_parse_is_idempotent() {
        assert_eq!(
            parse_quota_report(SAMPLE).unwrap(),
            parse_quota_report(SAMPLE).unwrap()
        );
    }

    #[test]
    fn test_missing_total_row() {
        let result = parse_quota_report("h1\nh2\nh3\nh4\n");
        assert!(matches!(result, Err(QuotaError::Parse { line: 5, .. })));
    }

    #[test]
    fn test_wrong_field_count() {
        let content = SAMPLE.replace("bob        ccv-lab USR", "bob ccv-lab");
        let result = parse_quota_report(&content);
        assert!(matches!(result, Err(QuotaError::Parse { line: 7, .. })));
    }

    #[test]
    fn test_non_numeric_usage() {
        let content = SAMPLE.replace("42 ", "lots");
        let result = parse_quota_report(&content);
        assert!(matches!(result, Err(QuotaError::Parse { line: 6, .. })));
    }

    #[test]
    fn test_quota_report_path() {
        let path = quota_report_path(Utf8Path::new("/gpfs/data/ccvstaff/quota-reports"), "ccv-lab");
        assert_eq!(path.as_str(), "/gpfs/data/ccvstaff/quota-reports/ccv-lab-quota-report.txt");
    }

    #[test]
    fn test_read_quota_report() {
        let temp = TempDir::new().unwrap();
        let root = Utf8Path::from_path(temp.path()).unwrap();
        let path = quota_report_path(root, "ccv-lab");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let report = read_quota_report(&path).unwrap();
        assert_eq!(report.users.len(), 2);
    }

    #[test]
    fn test_read_missing_report() {
        let result = read_quota_report(Utf8Path::new("/nonexistent/none-quota-report.txt"));
        assert!(matches!(result, Err(QuotaError::Io { .. })));
    }
}
