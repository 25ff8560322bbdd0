//! Identity lookups for grpusage.
//!
//! Resolves group membership, display metadata, and account tiers from the
//! system identity directory and the user's group list.

pub mod directory;
pub mod fields;
pub mod members;
pub mod tiers;
pub mod types;

pub use directory::{GetentDirectory, IdentityDirectory, StaticDirectory};
pub use fields::{IdentityFields, resolve_identity_fields};
pub use members::resolve_members;
pub use tiers::{
    ACCOUNT_TIERS, AccountTier, GroupMembershipProvider, IdGroupsProvider, match_account_tiers,
    resolve_account_tiers,
};
pub use types::{Affiliation, IdentityError};
