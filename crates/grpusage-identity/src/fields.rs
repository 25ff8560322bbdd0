//! Display name and email from the account comment field.

use crate::directory::IdentityDirectory;

/// GECOS position holding the display name.
pub const NAME_FIELD: usize = 0;

/// GECOS position holding the email address.
pub const EMAIL_FIELD: usize = 4;

/// Identity metadata for one user. Each field is resolved independently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityFields {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Resolve a user's display name and email.
///
/// Never fails: unknown users, short comment fields, and lookup errors all
/// leave the affected field as `None`.
pub async fn resolve_identity_fields<D: IdentityDirectory>(
    directory: &D,
    username: &str,
) -> IdentityFields {
    match directory.user(username).await {
        Ok(Some(entry)) => IdentityFields {
            name: entry.gecos_field(NAME_FIELD),
            email: entry.gecos_field(EMAIL_FIELD),
        },
        Ok(None) => {
            tracing::debug!(user = username, "no identity record");
            IdentityFields::default()
        }
        Err(e) => {
            tracing::debug!(user = username, error = %e, "identity lookup failed");
            IdentityFields::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::{GetentDirectory, StaticDirectory};
    use grpusage_parsers::parse_passwd_line;

    fn directory() -> StaticDirectory {
        StaticDirectory::new(
            vec![
                parse_passwd_line(
                    "alice:x:1000:100:Alice Smith,CIT 101,,,alice_smith@example.edu:/home/alice:/bin/bash",
                )
                .unwrap(),
                parse_passwd_line("bob:x:1001:100:Bob Jones:/home/bob:/bin/bash").unwrap(),
            ],
            vec![],
        )
    }

    #[tokio::test]
    async fn test_resolve_full_record() {
        let fields = resolve_identity_fields(&directory(), "alice").await;
        assert_eq!(fields.name.as_deref(), Some("Alice Smith"));
        assert_eq!(fields.email.as_deref(), Some("alice_smith@example.edu"));
    }

    #[tokio::test]
    async fn test_short_comment_field_defaults_email_only() {
        let fields = resolve_identity_fields(&directory(), "bob").await;
        assert_eq!(fields.name.as_deref(), Some("Bob Jones"));
        assert_eq!(fields.email, None);
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let fields = resolve_identity_fields(&directory(), "unknown_user").await;
        assert_eq!(fields, IdentityFields::default());
    }

    #[tokio::test]
    async fn test_lookup_error_is_defaulted() {
        let broken = GetentDirectory::new("nonexistent_getent_12345");
        let fields = resolve_identity_fields(&broken, "alice").await;
        assert_eq!(fields, IdentityFields::default());
    }
}
