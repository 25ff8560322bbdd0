//! Query per-user CPU usage via sacct.

use crate::types::{Partition, PartitionUsage, UsageWindow};
use grpusage_parsers::{parse_cpu_time_raw, run_command};
use std::future::Future;
use thiserror::Error;
use tokio::process::Command;

#[derive(Error, Debug)]
pub enum SacctError {
    #[error("Failed to execute sacct: {0}")]
    ExecutionError(String),
    #[error("Failed to parse sacct output: {0}")]
    ParseError(String),
}

/// Default sacct location on the cluster login nodes.
pub const DEFAULT_SACCT: &str = "/usr/local/bin/sacct";

/// One raw CPU-time value per job allocation, no header.
const SACCT_FORMAT: &str = "--format=CPUTimeRaw";

/// Source of raw accounting output.
pub trait AccountingProvider: Send + Sync {
    /// Return one `CPUTimeRaw` value per job line for the user, partition, and window.
    fn cpu_time_raw(
        &self,
        username: &str,
        partition: Partition,
        window: &UsageWindow,
    ) -> impl Future<Output = Result<String, SacctError>> + Send;
}

/// Accounting provider that runs the sacct binary.
#[derive(Debug, Clone)]
pub struct SacctCommand {
    program: String,
}

impl Default for SacctCommand {
    fn default() -> Self {
        Self::new(DEFAULT_SACCT)
    }
}

impl SacctCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

/// Build sacct arguments: allocations only (`-X`), no header (`-n`).
fn sacct_args(username: &str, partition: Partition, window: &UsageWindow) -> Vec<String> {
    let mut args = vec!["-u".to_string(), username.to_string()];

    if let Some(start) = &window.start {
        args.extend(["-S".to_string(), start.clone()]);
    }
    if let Some(end) = &window.end {
        args.extend(["-E".to_string(), end.clone()]);
    }

    args.extend([
        "-r".to_string(),
        partition.as_str().to_string(),
        "-X".to_string(),
        "-n".to_string(),
        SACCT_FORMAT.to_string(),
    ]);
    args
}

impl AccountingProvider for SacctCommand {
    async fn cpu_time_raw(
        &self,
        username: &str,
        partition: Partition,
        window: &UsageWindow,
    ) -> Result<String, SacctError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(sacct_args(username, partition, window));

        run_command(&mut cmd, "sacct")
            .await
            .map_err(|e| SacctError::ExecutionError(e.to_string()))
    }
}

/// Sum raw sacct output into a job count and total CPU-seconds.
///
/// Blank lines are ignored; any other non-numeric line is an error.
pub fn parse_cpu_times(stdout: &str) -> Result<PartitionUsage, SacctError> {
    let mut usage = PartitionUsage::default();

    for line in stdout.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let seconds = parse_cpu_time_raw(line).map_err(SacctError::ParseError)?;
        usage.jobs += 1;
        usage.cpu_seconds += seconds;
    }

    Ok(usage)
}

/// Aggregate one user's usage on one partition over the window.
pub async fn aggregate_usage<A: AccountingProvider>(
    provider: &A,
    username: &str,
    partition: Partition,
    window: &UsageWindow,
) -> Result<PartitionUsage, SacctError> {
    let stdout = provider.cpu_time_raw(username, partition, window).await?;
    let usage = parse_cpu_times(&stdout)?;

    tracing::debug!(
        user = username,
        partition = %partition,
        jobs = usage.jobs,
        cpu_seconds = usage.cpu_seconds,
        "aggregated usage"
    );

    Ok(usage)
}
