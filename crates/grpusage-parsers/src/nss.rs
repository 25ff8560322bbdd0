//! Parsing of passwd(5) and group(5) records.
//!
//! Both `getent` output and the flat files use the same colon-delimited
//! layout, so one parser serves every identity directory backend.

use crate::split_delimited;

/// One account record (`name:passwd:uid:gid:gecos:home:shell`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswdEntry {
    pub name: String,
    pub uid: u32,
    pub gid: u32,
    /// Free-text comment field, conventionally comma separated.
    pub gecos: String,
    pub home: String,
    pub shell: String,
}

impl PasswdEntry {
    /// Field `index` of the comma-separated GECOS field, if present and non-empty.
    pub fn gecos_field(&self, index: usize) -> Option<String> {
        self.gecos
            .split(',')
            .nth(index)
            .and_then(crate::non_empty_string)
    }
}

/// One group record (`name:passwd:gid:member,member`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupEntry {
    pub name: String,
    pub gid: u32,
    /// Explicit (supplementary) members.
    pub members: Vec<String>,
}

/// Parse a single passwd line.
pub fn parse_passwd_line(line: &str) -> Result<PasswdEntry, String> {
    let fields = split_delimited(line, ':', 7)?;

    Ok(PasswdEntry {
        name: fields[0].to_string(),
        uid: parse_id(fields[2], "uid", line)?,
        gid: parse_id(fields[3], "gid", line)?,
        gecos: fields[4].to_string(),
        home: fields[5].to_string(),
        shell: fields[6].to_string(),
    })
}

/// Parse a single group line.
pub fn parse_group_line(line: &str) -> Result<GroupEntry, String> {
    let fields = split_delimited(line, ':', 4)?;

    let members = fields[3]
        .split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(String::from)
        .collect();

    Ok(GroupEntry {
        name: fields[0].to_string(),
        gid: parse_id(fields[2], "gid", line)?,
        members,
    })
}

/// Parse every passwd record in `content`, skipping blank lines and comments.
pub fn parse_passwd(content: &str) -> Result<Vec<PasswdEntry>, String> {
    records(content).map(parse_passwd_line).collect()
}

/// Parse every group record in `content`, skipping blank lines and comments.
pub fn parse_group(content: &str) -> Result<Vec<GroupEntry>, String> {
    records(content).map(parse_group_line).collect()
}

fn records(content: &str) -> impl Iterator<Item = &str> {
    content
        .lines()
        .map(str::trim_end)
        .filter(|l| !l.trim().is_empty() && !l.starts_with('#'))
}

fn parse_id(field: &str, what: &str, line: &str) -> Result<u32, String> {
    field
        .trim()
        .parse()
        .map_err(|_| format!("Invalid {} '{}': {}", what, field, line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_passwd_line() {
        let entry = parse_passwd_line(
            "jdoe:x:1001:500:Jane Doe,Room 1,555-0100,,jane_doe@example.edu:/home/jdoe:/bin/bash",
        )
        .unwrap();
        assert_eq!(entry.name, "jdoe");
        assert_eq!(entry.uid, 1001);
        assert_eq!(entry.gid, 500);
        assert_eq!(entry.gecos_field(0), Some("Jane Doe".to_string()));
        assert_eq!(entry.gecos_field(4), Some("jane_doe@example.edu".to_string()));
        assert_eq!(entry.shell, "/bin/bash");
    }

    #[test]
    fn test_gecos_field_missing_positions() {
        let entry = parse_passwd_line("svc:x:998:998:Service:/var/svc:/sbin/nologin").unwrap();
        assert_eq!(entry.gecos_field(0), Some("Service".to_string()));
        assert_eq!(entry.gecos_field(4), None);

        let empty = parse_passwd_line("nobody:x:65534:65534::/:/sbin/nologin").unwrap();
        assert_eq!(empty.gecos_field(0), None);
    }

    #[test]
    fn test_gecos_field_keeps_literal_placeholders() {
        let entry = parse_passwd_line("odd:x:1002:500:-, ,,,NA:/home/odd:/bin/sh").unwrap();
        assert_eq!(entry.gecos_field(0), Some("-".to_string()));
        assert_eq!(entry.gecos_field(1), None);
        assert_eq!(entry.gecos_field(4), Some("NA".to_string()));
    }

    #[test]
    fn test_parse_passwd_line_rejects_short_and_bad_ids() {
        assert!(parse_passwd_line("jdoe:x:1001").is_err());
        assert!(parse_passwd_line("jdoe:x:abc:500::/home/jdoe:/bin/sh").is_err());
    }

    #[test]
    fn test_parse_group_line() {
        let group = parse_group_line("ccv-lab:*:5000:alice,bob").unwrap();
        assert_eq!(group.name, "ccv-lab");
        assert_eq!(group.gid, 5000);
        assert_eq!(group.members, vec!["alice", "bob"]);

        let empty = parse_group_line("solo:x:5001:").unwrap();
        assert!(empty.members.is_empty());
    }

    #[test]
    fn test_parse_passwd_skips_comments_and_blanks() {
        let content = "# local accounts\nroot:x:0:0:root:/root:/bin/bash\n\nalice:x:1000:1000::/home/alice:/bin/zsh\n";
        let entries = parse_passwd(content).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].name, "alice");
    }
}
