//! Error classification for report assembly.

use grpusage_identity::IdentityError;
use grpusage_quota::QuotaError;
use grpusage_slurm::{Partition, SacctError};
use std::fmt;
use thiserror::Error;

/// How a failure in a stage affects the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Abort the whole run; no partial report
    Fatal,
    /// Substitute the default value and continue silently
    Defaulted,
    /// Substitute the default value, record a warning, and continue
    Warning,
}

/// Data-gathering stage of a report run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Members,
    Quota,
    Identity,
    AccountTiers,
    Accounting,
}

impl Stage {
    pub fn severity(&self) -> Severity {
        match self {
            Self::Members | Self::Quota | Self::Accounting => Severity::Fatal,
            Self::Identity => Severity::Defaulted,
            Self::AccountTiers => Severity::Warning,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Members => "group membership",
            Self::Quota => "quota report",
            Self::Identity => "identity fields",
            Self::AccountTiers => "account tiers",
            Self::Accounting => "job accounting",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fatal error: the report cannot be produced.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to resolve members of group '{group}'")]
    Members {
        group: String,
        #[source]
        source: IdentityError,
    },
    #[error("Failed to load quota report for group '{group}'")]
    Quota {
        group: String,
        #[source]
        source: QuotaError,
    },
    #[error("Failed to resolve account tiers for user '{user}'")]
    AccountTiers {
        user: String,
        #[source]
        source: IdentityError,
    },
    #[error("Failed to query {partition} usage for user '{user}'")]
    Accounting {
        user: String,
        partition: Partition,
        #[source]
        source: SacctError,
    },
    #[error("Per-user worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
    #[error("Worker pool closed: {0}")]
    PoolClosed(#[from] tokio::sync::AcquireError),
}

impl ReportError {
    /// Stage that produced the error, if it came from a data source.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::Members { .. } => Some(Stage::Members),
            Self::Quota { .. } => Some(Stage::Quota),
            Self::AccountTiers { .. } => Some(Stage::AccountTiers),
            Self::Accounting { .. } => Some(Stage::Accounting),
            Self::Worker(_) | Self::PoolClosed(_) => None,
        }
    }
}

/// A non-fatal problem recorded during the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageWarning {
    pub stage: Stage,
    pub user: String,
    pub message: String,
}

impl fmt::Display for StageWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} for {}: {}", self.stage, self.user, self.message)
    }
}
