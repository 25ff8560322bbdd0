//! SLURM accounting types.

use std::fmt;

/// Partitions covered by the usage report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Partition {
    Batch,
    Bigmem,
    Gpu,
}

impl Partition {
    /// Every reported partition, in column order.
    pub const ALL: [Partition; 3] = [Partition::Batch, Partition::Bigmem, Partition::Gpu];

    /// Partition name as SLURM knows it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Batch => "batch",
            Self::Bigmem => "bigmem",
            Self::Gpu => "gpu",
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Completed-job usage for one user on one partition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartitionUsage {
    /// Number of jobs
    pub jobs: u64,

    /// Total CPU time (cpu-seconds)
    pub cpu_seconds: u64,
}

/// Inclusive report period, as `YYYY-MM-DD` strings passed to sacct verbatim.
///
/// An unset bound is left to sacct's own default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageWindow {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl UsageWindow {
    pub fn new(start: Option<String>, end: Option<String>) -> Self {
        Self { start, end }
    }
}
