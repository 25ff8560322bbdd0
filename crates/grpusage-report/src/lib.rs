//! Group usage report assembly for grpusage.
//!
//! Joins group membership, identity, account tier, accounting, and quota
//! data into one table keyed by username.

pub mod assemble;
pub mod error;
pub mod merge;
pub mod render;
pub mod types;

pub use assemble::{DEFAULT_CONCURRENCY, ReportRequest, ReportSources, build_report};
pub use error::{ReportError, Severity, Stage, StageWarning};
pub use merge::{
    UserResolution, merge_members, merge_resolution, merge_storage, normalize, normalize_record,
};
pub use render::{render_json, render_table};
pub use types::{GroupReport, MISSING_TEXT, NO_ACCOUNT, ReportRow, ReportTable, UserRecord};
