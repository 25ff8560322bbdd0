//! Identity types.

use camino::Utf8PathBuf;
use grpusage_parsers::CommandError;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("Group '{0}' not found")]
    GroupNotFound(String),
    #[error("Identity lookup failed: {0}")]
    Command(#[from] CommandError),
    #[error("Failed to read {path}: {source}")]
    Io {
        path: Utf8PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse identity record: {0}")]
    Parse(String),
}

/// How a user belongs to the reported group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Affiliation {
    /// The group is the user's primary (login) group
    Primary,
    /// The user is listed as a supplementary member
    Secondary,
}

impl Affiliation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        }
    }
}

impl fmt::Display for Affiliation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
