//! Report assembly: resolve every member concurrently, then merge.

use crate::error::{ReportError, Severity, Stage, StageWarning};
use crate::merge::{UserResolution, merge_members, merge_resolution, merge_storage, normalize};
use crate::types::{GroupReport, ReportTable};
use camino::Utf8PathBuf;
use grpusage_identity::{
    GroupMembershipProvider, IdentityDirectory, IdentityError, resolve_account_tiers,
    resolve_identity_fields, resolve_members,
};
use grpusage_quota::read_quota_report;
use grpusage_slurm::{AccountingProvider, Partition, UsageWindow, aggregate_usage};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Default number of users resolved at once.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// The data sources a report is built from.
#[derive(Debug, Clone)]
pub struct ReportSources<D, G, A> {
    pub directory: D,
    pub groups: G,
    pub accounting: A,
}

/// What to report on.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub group: String,
    pub quota_path: Utf8PathBuf,
    pub window: UsageWindow,
    /// Upper bound on users resolved concurrently
    pub concurrency: usize,
}

/// Build the usage report for one group.
///
/// Group membership and the quota report are loaded first; any failure there
/// aborts before per-user work starts. The first accounting failure aborts
/// the remaining per-user tasks.
pub async fn build_report<D, G, A>(
    sources: Arc<ReportSources<D, G, A>>,
    request: &ReportRequest,
) -> Result<GroupReport, ReportError>
where
    D: IdentityDirectory + 'static,
    G: GroupMembershipProvider + 'static,
    A: AccountingProvider + 'static,
{
    let members = resolve_members(&sources.directory, &request.group)
        .await
        .map_err(|source| ReportError::Members {
            group: request.group.clone(),
            source,
        })?;

    let quota = read_quota_report(&request.quota_path).map_err(|source| ReportError::Quota {
        group: request.group.clone(),
        source,
    })?;

    let usernames: Vec<String> = members.keys().cloned().collect();
    let resolved = resolve_users(
        sources,
        usernames,
        &request.window,
        request.concurrency,
    )
    .await?;

    let mut table = ReportTable::new();
    let mut warnings = Vec::new();

    merge_members(&mut table, &members);
    for (resolution, warning) in resolved {
        merge_resolution(&mut table, resolution);
        warnings.extend(warning);
    }
    merge_storage(&mut table, &quota);

    Ok(GroupReport {
        group: request.group.clone(),
        window: request.window.clone(),
        total_used_gb: quota.total_used_gb,
        total_avail_gb: quota.total_avail_gb,
        rows: normalize(&table),
        warnings,
    })
}

/// Resolve every user on a bounded pool of tasks.
async fn resolve_users<D, G, A>(
    sources: Arc<ReportSources<D, G, A>>,
    usernames: Vec<String>,
    window: &UsageWindow,
    concurrency: usize,
) -> Result<Vec<(UserResolution, Option<StageWarning>)>, ReportError>
where
    D: IdentityDirectory + 'static,
    G: GroupMembershipProvider + 'static,
    A: AccountingProvider + 'static,
{
    let permits = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut tasks = JoinSet::new();

    for username in usernames {
        let sources = Arc::clone(&sources);
        let permits = Arc::clone(&permits);
        let window = window.clone();

        tasks.spawn(async move {
            let _permit = permits.acquire_owned().await?;
            resolve_user(&*sources, username, &window).await
        });
    }

    let mut resolved = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        resolved.push(joined??);
    }

    Ok(resolved)
}

/// Resolve identity fields, account tiers, and usage for one user.
async fn resolve_user<D, G, A>(
    sources: &ReportSources<D, G, A>,
    username: String,
    window: &UsageWindow,
) -> Result<(UserResolution, Option<StageWarning>), ReportError>
where
    D: IdentityDirectory,
    G: GroupMembershipProvider,
    A: AccountingProvider,
{
    let fields = resolve_identity_fields(&sources.directory, &username).await;

    let (account_tiers, warning) = match resolve_account_tiers(&sources.groups, &username).await {
        Ok(tiers) => (Some(tiers), None),
        Err(e) => (None, tier_failure(Stage::AccountTiers.severity(), &username, e)?),
    };

    let mut usage = BTreeMap::new();
    for partition in Partition::ALL {
        let totals = aggregate_usage(&sources.accounting, &username, partition, window)
            .await
            .map_err(|source| ReportError::Accounting {
                user: username.clone(),
                partition,
                source,
            })?;
        usage.insert(partition, totals);
    }

    Ok((
        UserResolution {
            username,
            fields,
            account_tiers,
            usage,
        },
        warning,
    ))
}

/// Apply `severity` to a failed tier lookup: abort, drop it, or keep a warning.
fn tier_failure(
    severity: Severity,
    username: &str,
    source: IdentityError,
) -> Result<Option<StageWarning>, ReportError> {
    match severity {
        Severity::Fatal => Err(ReportError::AccountTiers {
            user: username.to_string(),
            source,
        }),
        Severity::Defaulted => {
            tracing::debug!(user = %username, error = %source, "account tier lookup failed");
            Ok(None)
        }
        Severity::Warning => {
            tracing::warn!(user = %username, error = %source, "account tier lookup failed");
            Ok(Some(StageWarning {
                stage: Stage::AccountTiers,
                user: username.to_string(),
                message: source.to_string(),
            }))
        }
    }
}
