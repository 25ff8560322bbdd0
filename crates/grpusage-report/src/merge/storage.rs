//! Quota report merging.

use crate::types::ReportTable;
use grpusage_quota::QuotaReport;

/// Add storage used for every user in the quota report.
///
/// Users only present in the quota report get a row of their own.
pub fn merge_storage(table: &mut ReportTable, quota: &QuotaReport) {
    for (username, used_gb) in &quota.users {
        let record = table.entry(username.clone()).or_default();
        if record.affiliation.is_none() {
            tracing::debug!(user = %username, "quota report user outside group membership");
        }
        record.gb_used = Some(*used_gb);
    }
}
