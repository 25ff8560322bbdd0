//! Premium account tiers derived from group membership.

use crate::types::IdentityError;
use grpusage_parsers::run_command;
use std::future::Future;
use tokio::process::Command;

/// An account tier and the group names that grant it.
#[derive(Debug, Clone, Copy)]
pub struct AccountTier {
    pub label: &'static str,
    pub aliases: &'static [&'static str],
}

/// Tier catalogue, in report order.
pub const ACCOUNT_TIERS: &[AccountTier] = &[
    AccountTier {
        label: "priority",
        aliases: &[
            "priority",
            "priority1",
            "priority2",
            "priority3",
            "priority4",
            "priority5",
            "priority6",
            "priority7",
            "priority8",
            "priority9",
        ],
    },
    AccountTier {
        label: "priority+",
        aliases: &["priority+", "priority+1"],
    },
    AccountTier {
        label: "pri-gpu",
        aliases: &["pri-gpu", "pri-gpu1"],
    },
    AccountTier {
        label: "pri-gpu+",
        aliases: &["pri-gpu+", "pri-gpu+1"],
    },
    AccountTier {
        label: "gpu-he",
        aliases: &["gpu-he", "gpu-he1"],
    },
];

/// Source of the group names a user belongs to.
pub trait GroupMembershipProvider: Send + Sync {
    fn group_names(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Vec<String>, IdentityError>> + Send;
}

/// Group names from `id -Gn <user>`.
#[derive(Debug, Clone)]
pub struct IdGroupsProvider {
    program: String,
}

impl Default for IdGroupsProvider {
    fn default() -> Self {
        Self {
            program: "id".to_string(),
        }
    }
}

impl IdGroupsProvider {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl GroupMembershipProvider for IdGroupsProvider {
    async fn group_names(&self, username: &str) -> Result<Vec<String>, IdentityError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(["-Gn", username]);

        let stdout = run_command(&mut cmd, "id").await?;
        Ok(stdout.split_whitespace().map(String::from).collect())
    }
}

/// Map a group list onto tier labels.
///
/// Labels follow catalogue order. Every matching alias contributes its
/// label, so membership in two aliases of one tier yields it twice.
pub fn match_account_tiers(groups: &[String]) -> Vec<String> {
    ACCOUNT_TIERS
        .iter()
        .flat_map(|tier| {
            tier.aliases
                .iter()
                .filter(|alias| groups.iter().any(|g| g == *alias))
                .map(|_| tier.label.to_string())
        })
        .collect()
}

/// Resolve the account tiers held by `username`.
pub async fn resolve_account_tiers<P: GroupMembershipProvider>(
    provider: &P,
    username: &str,
) -> Result<Vec<String>, IdentityError> {
    let groups = provider.group_names(username).await?;
    Ok(match_account_tiers(&groups))
}
