use std::collections::BTreeMap;

/// Storage usage for a group's shared directory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuotaReport {
    /// Group-wide GB used (from the total row).
    pub total_used_gb: f64,

    /// Group-wide GB available (from the total row).
    pub total_avail_gb: f64,

    /// GB used per user, excluding the total row.
    pub users: BTreeMap<String, f64>,
}

impl QuotaReport {
    /// GB used by `username`, if the user appears in the report.
    pub fn used_gb(&self, username: &str) -> Option<f64> {
        self.users.get(username).copied()
    }
}
