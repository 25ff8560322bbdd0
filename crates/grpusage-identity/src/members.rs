//! Group membership resolution.

use crate::directory::IdentityDirectory;
use crate::types::{Affiliation, IdentityError};
use std::collections::BTreeMap;

/// Return every member of `group` with their affiliation.
///
/// Listed members are tagged secondary first; accounts whose primary gid is
/// the group's gid are then tagged primary, replacing any secondary tag.
pub async fn resolve_members<D: IdentityDirectory>(
    directory: &D,
    group: &str,
) -> Result<BTreeMap<String, Affiliation>, IdentityError> {
    let entry = directory
        .group(group)
        .await?
        .ok_or_else(|| IdentityError::GroupNotFound(group.to_string()))?;

    let mut members: BTreeMap<String, Affiliation> = entry
        .members
        .iter()
        .map(|m| (m.clone(), Affiliation::Secondary))
        .collect();

    for user in directory.users().await? {
        if user.gid == entry.gid {
            members.insert(user.name, Affiliation::Primary);
        }
    }

    tracing::info!(
        group,
        gid = entry.gid,
        members = members.len(),
        "resolved group members"
    );

    Ok(members)
}
