//! Group membership merging.

use crate::types::ReportTable;
use grpusage_identity::Affiliation;
use std::collections::BTreeMap;

/// Add every group member with their affiliation.
pub fn merge_members(table: &mut ReportTable, members: &BTreeMap<String, Affiliation>) {
    for (username, affiliation) in members {
        table.entry(username.clone()).or_default().affiliation = Some(*affiliation);
    }
}
