//! Per-user record and report types.

use crate::error::StageWarning;
use grpusage_identity::Affiliation;
use grpusage_slurm::{Partition, PartitionUsage, UsageWindow};
use serde::Serialize;
use std::collections::BTreeMap;
use tabled::Tabled;

/// Placeholder for missing text fields.
pub const MISSING_TEXT: &str = "NA";

/// Placeholder for a user without account tiers.
pub const NO_ACCOUNT: &str = "-";

/// Everything known about one user, before default filling.
///
/// A field is `None` when its source had nothing for the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserRecord {
    /// Display name from the comment field
    pub name: Option<String>,

    /// Email from the comment field
    pub email: Option<String>,

    /// Group affiliation (None for users only seen in the quota report)
    pub affiliation: Option<Affiliation>,

    /// Account tier labels in catalogue order
    pub account_tiers: Option<Vec<String>>,

    /// Usage per partition
    pub usage: BTreeMap<Partition, PartitionUsage>,

    /// Storage used in GB, as reported
    pub gb_used: Option<f64>,
}

/// All user records keyed by username.
pub type ReportTable = BTreeMap<String, UserRecord>;

/// Fully normalized output row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Tabled)]
pub struct ReportRow {
    #[tabled(rename = "User")]
    #[serde(rename = "User")]
    pub username: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Email")]
    #[serde(rename = "Email")]
    pub email: String,
    #[tabled(rename = "Affiliation")]
    #[serde(rename = "Affiliation")]
    pub affiliation: String,
    #[tabled(rename = "Account")]
    #[serde(rename = "Account")]
    pub account: String,
    #[tabled(rename = "BatchJobs")]
    #[serde(rename = "BatchJobs")]
    pub batch_jobs: u64,
    #[tabled(rename = "BatchUsage")]
    #[serde(rename = "BatchUsage")]
    pub batch_usage: u64,
    #[tabled(rename = "BigmemJobs")]
    #[serde(rename = "BigmemJobs")]
    pub bigmem_jobs: u64,
    #[tabled(rename = "BigmemUsage")]
    #[serde(rename = "BigmemUsage")]
    pub bigmem_usage: u64,
    #[tabled(rename = "GPUJobs")]
    #[serde(rename = "GPUJobs")]
    pub gpu_jobs: u64,
    #[tabled(rename = "GPUUsage")]
    #[serde(rename = "GPUUsage")]
    pub gpu_usage: u64,
    #[tabled(rename = "GB_used")]
    #[serde(rename = "GB_used")]
    pub gb_used: u64,
}

/// Assembled report for one group.
#[derive(Debug, Clone)]
pub struct GroupReport {
    pub group: String,
    pub window: UsageWindow,
    pub total_used_gb: f64,
    pub total_avail_gb: f64,
    /// Rows ordered by username
    pub rows: Vec<ReportRow>,
    /// Non-fatal problems hit while resolving users
    pub warnings: Vec<StageWarning>,
}

impl GroupReport {
    /// One-line description of the run: group, job window, and storage totals.
    pub fn summary(&self) -> String {
        let bound = |date: &Option<String>| date.clone().unwrap_or_else(|| "default".to_string());
        format!(
            "{}: {} user(s), jobs {} to {}, {:.0} GB used of {:.0} GB",
            self.group,
            self.rows.len(),
            bound(&self.window.start),
            bound(&self.window.end),
            self.total_used_gb,
            self.total_avail_gb,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_without_dates() {
        let report = GroupReport {
            group: "lab".to_string(),
            window: UsageWindow::new(None, Some("2024-06-30".to_string())),
            total_used_gb: 12.7,
            total_avail_gb: 100.0,
            rows: Vec::new(),
            warnings: Vec::new(),
        };
        assert_eq!(
            report.summary(),
            "lab: 0 user(s), jobs default to 2024-06-30, 13 GB used of 100 GB"
        );
    }
}
