//! Per-user resolution merging.

use crate::types::ReportTable;
use grpusage_identity::IdentityFields;
use grpusage_slurm::{Partition, PartitionUsage};
use std::collections::BTreeMap;

/// Results of resolving one user against the per-user sources.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserResolution {
    pub username: String,
    pub fields: IdentityFields,
    /// `None` when the group list could not be obtained
    pub account_tiers: Option<Vec<String>>,
    pub usage: BTreeMap<Partition, PartitionUsage>,
}

/// Fold one user's resolution into the table.
pub fn merge_resolution(table: &mut ReportTable, resolution: UserResolution) {
    let record = table.entry(resolution.username).or_default();
    record.name = resolution.fields.name;
    record.email = resolution.fields.email;
    record.account_tiers = resolution.account_tiers;
    record.usage.extend(resolution.usage);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_resolution() {
        let mut table = ReportTable::new();
        merge_resolution(
            &mut table,
            UserResolution {
                username: "alice".to_string(),
                fields: IdentityFields {
                    name: Some("Alice Smith".to_string()),
                    email: None,
                },
                account_tiers: Some(vec!["priority".to_string()]),
                usage: BTreeMap::from([(
                    Partition::Gpu,
                    PartitionUsage {
                        jobs: 2,
                        cpu_seconds: 7200,
                    },
                )]),
            },
        );

        let alice = &table["alice"];
        assert_eq!(alice.name.as_deref(), Some("Alice Smith"));
        assert_eq!(alice.email, None);
        assert_eq!(alice.account_tiers, Some(vec!["priority".to_string()]));
        assert_eq!(alice.usage[&Partition::Gpu].cpu_seconds, 7200);
        assert!(!alice.usage.contains_key(&Partition::Batch));
    }
}
