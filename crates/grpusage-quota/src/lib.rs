//! Storage quota reports for grpusage.
//!
//! Parses the per-group quota report files written by the storage system.

pub mod report;
pub mod types;

pub use report::{
    DEFAULT_QUOTA_ROOT, QuotaError, parse_quota_report, quota_report_path, read_quota_report,
};
pub use types::QuotaReport;
