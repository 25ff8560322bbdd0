//! Identity directory backends.
//!
//! [`GetentDirectory`] asks NSS through `getent`, so LDAP/SSSD accounts are
//! seen the same way `id` sees them. [`StaticDirectory`] holds records in
//! memory, loaded from passwd/group formatted files or built directly.

use crate::tiers::GroupMembershipProvider;
use crate::types::IdentityError;
use camino::Utf8Path;
use grpusage_parsers::{
    GroupEntry, PasswdEntry, parse_group, parse_group_line, parse_passwd, parse_passwd_line,
    run_command,
};
use std::fs;
use std::future::Future;
use tokio::process::Command;

/// `getent` exit status for "key not found in database".
const GETENT_NOT_FOUND: i32 = 2;

/// Read-only access to account and group records.
pub trait IdentityDirectory: Send + Sync {
    /// Look up a group by name. `Ok(None)` if it does not exist.
    fn group(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<GroupEntry>, IdentityError>> + Send;

    /// Enumerate every known account.
    fn users(&self) -> impl Future<Output = Result<Vec<PasswdEntry>, IdentityError>> + Send;

    /// Look up an account by name. `Ok(None)` if it does not exist.
    fn user(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<PasswdEntry>, IdentityError>> + Send;
}

/// Directory backed by `getent group` / `getent passwd`.
#[derive(Debug, Clone)]
pub struct GetentDirectory {
    program: String,
}

impl Default for GetentDirectory {
    fn default() -> Self {
        Self {
            program: "getent".to_string(),
        }
    }
}

impl GetentDirectory {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Run `getent <args>`, mapping the not-found exit status to `None`.
    async fn query(&self, args: &[&str]) -> Result<Option<String>, IdentityError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(args);

        match run_command(&mut cmd, "getent").await {
            Ok(stdout) => Ok(Some(stdout)),
            Err(e) if e.exit_code() == Some(GETENT_NOT_FOUND) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl IdentityDirectory for GetentDirectory {
    async fn group(&self, name: &str) -> Result<Option<GroupEntry>, IdentityError> {
        let Some(stdout) = self.query(&["group", name]).await? else {
            return Ok(None);
        };
        first_record(&stdout)
            .map(|line| parse_group_line(line).map_err(IdentityError::Parse))
            .transpose()
    }

    async fn users(&self) -> Result<Vec<PasswdEntry>, IdentityError> {
        let stdout = self.query(&["passwd"]).await?.unwrap_or_default();
        parse_passwd(&stdout).map_err(IdentityError::Parse)
    }

    async fn user(&self, name: &str) -> Result<Option<PasswdEntry>, IdentityError> {
        let Some(stdout) = self.query(&["passwd", name]).await? else {
            return Ok(None);
        };
        first_record(&stdout)
            .map(|line| parse_passwd_line(line).map_err(IdentityError::Parse))
            .transpose()
    }
}

fn first_record(stdout: &str) -> Option<&str> {
    stdout.lines().map(str::trim_end).find(|l| !l.is_empty())
}

/// In-memory directory.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    users: Vec<PasswdEntry>,
    groups: Vec<GroupEntry>,
}

impl StaticDirectory {
    pub fn new(users: Vec<PasswdEntry>, groups: Vec<GroupEntry>) -> Self {
        Self { users, groups }
    }

    /// Load records from files in passwd(5) and group(5) format.
    pub fn from_files(passwd: &Utf8Path, group: &Utf8Path) -> Result<Self, IdentityError> {
        let users = parse_passwd(&read(passwd)?).map_err(IdentityError::Parse)?;
        let groups = parse_group(&read(group)?).map_err(IdentityError::Parse)?;

        tracing::debug!(
            users = users.len(),
            groups = groups.len(),
            "loaded identity directory from files"
        );

        Ok(Self::new(users, groups))
    }
}

fn read(path: &Utf8Path) -> Result<String, IdentityError> {
    fs::read_to_string(path).map_err(|source| IdentityError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl IdentityDirectory for StaticDirectory {
    async fn group(&self, name: &str) -> Result<Option<GroupEntry>, IdentityError> {
        Ok(self.groups.iter().find(|g| g.name == name).cloned())
    }

    async fn users(&self) -> Result<Vec<PasswdEntry>, IdentityError> {
        Ok(self.users.clone())
    }

    async fn user(&self, name: &str) -> Result<Option<PasswdEntry>, IdentityError> {
        Ok(self.users.iter().find(|u| u.name == name).cloned())
    }
}

/// Group list the way `id -Gn` reports it: primary group first, then every
/// group listing the user, in file order.
impl GroupMembershipProvider for StaticDirectory {
    async fn group_names(&self, username: &str) -> Result<Vec<String>, IdentityError> {
        let primary_gid = self
            .users
            .iter()
            .find(|u| u.name == username)
            .map(|u| u.gid);

        let mut names: Vec<String> = primary_gid
            .and_then(|gid| self.groups.iter().find(|g| g.gid == gid))
            .map(|g| g.name.clone())
            .into_iter()
            .collect();

        for group in &self.groups {
            if group.members.iter().any(|m| m == username) && !names.contains(&group.name) {
                names.push(group.name.clone());
            }
        }

        Ok(names)
    }
}
