//! Merge per-source results into the report table.
//!
//! Every merge is an outer join on username: a user missing from one
//! source keeps `None` for its fields instead of being dropped.

mod members;
mod normalize;
mod resolution;
mod storage;

pub use members::merge_members;
pub use normalize::{normalize, normalize_record};
pub use resolution::{UserResolution, merge_resolution};
pub use storage::merge_storage;
