//! SLURM integration for grpusage.
//!
//! Aggregate per-user CPU usage via sacct.

pub mod sacct;
pub mod types;

pub use sacct::{
    AccountingProvider, DEFAULT_SACCT, SacctCommand, SacctError, aggregate_usage, parse_cpu_times,
};
pub use types::{Partition, PartitionUsage, UsageWindow};
