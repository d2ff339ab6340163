//! Read-only user directory consulted by the responder.
//!
//! The responder never owns user data; it is handed something implementing
//! [`UserDirectory`] at construction time. [`StaticDirectory`] is the in-memory
//! implementation, built either from the built-in table or from a JSON seed file so
//! admins can swap the data source without touching call sites.
//!
//! Seed file shape:
//!
//! ```json
//! {
//!   "123": { "name": "Alice", "account_status": "active" },
//!   "456": { "name": "Bob", "account_status": "inactive" }
//! }
//! ```

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use super::errors::DeskError;

/// Account state as stored in the user table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Inactive,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "active",
            AccountStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub name: String,
    pub account_status: AccountStatus,
}

impl UserRecord {
    pub fn new(name: &str, account_status: AccountStatus) -> Self {
        Self {
            name: name.to_string(),
            account_status,
        }
    }
}

/// Lookup seam between the responder and whatever holds user records.
pub trait UserDirectory {
    fn lookup(&self, user_id: &str) -> Option<&UserRecord>;
}

/// In-memory user table keyed by user id. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticDirectory {
    users: HashMap<String, UserRecord>,
}

impl StaticDirectory {
    /// The stock two-user table: `123` is Alice (active), `456` is Bob (inactive).
    pub fn builtin() -> Self {
        Self::from_records([
            ("123", UserRecord::new("Alice", AccountStatus::Active)),
            ("456", UserRecord::new("Bob", AccountStatus::Inactive)),
        ])
    }

    pub fn from_records<I, K>(records: I) -> Self
    where
        I: IntoIterator<Item = (K, UserRecord)>,
        K: Into<String>,
    {
        let users = records
            .into_iter()
            .map(|(id, record)| (id.into(), record))
            .collect();
        Self { users }
    }

    pub fn from_json_str(contents: &str) -> Result<Self, DeskError> {
        let users: HashMap<String, UserRecord> = serde_json::from_str(contents)?;
        Ok(Self { users })
    }

    /// Load a user table from a JSON seed file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, DeskError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| DeskError::Seed {
            path: path.display().to_string(),
            source,
        })?;
        let directory = Self::from_json_str(&contents)?;
        debug!(
            "Loaded {} user record(s) from {}",
            directory.len(),
            path.display()
        );
        Ok(directory)
    }

    /// Serialize the table in seed file format (used by `helpdesk init`).
    pub fn to_json_pretty(&self) -> Result<String, DeskError> {
        Ok(serde_json::to_string_pretty(&self.users)?)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Entries sorted by user id, for stable listings.
    pub fn entries(&self) -> Vec<(&str, &UserRecord)> {
        let mut entries: Vec<_> = self
            .users
            .iter()
            .map(|(id, record)| (id.as_str(), record))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl UserDirectory for StaticDirectory {
    fn lookup(&self, user_id: &str) -> Option<&UserRecord> {
        self.users.get(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_has_alice_and_bob() {
        let dir = StaticDirectory::builtin();
        assert_eq!(dir.len(), 2);
        assert_eq!(
            dir.lookup("123"),
            Some(&UserRecord::new("Alice", AccountStatus::Active))
        );
        assert_eq!(
            dir.lookup("456"),
            Some(&UserRecord::new("Bob", AccountStatus::Inactive))
        );
    }

    #[test]
    fn unknown_and_empty_ids_miss() {
        let dir = StaticDirectory::builtin();
        assert!(dir.lookup("789").is_none());
        assert!(dir.lookup("").is_none());
        // Keys are exact; no trimming.
        assert!(dir.lookup(" 123").is_none());
    }

    #[test]
    fn parses_seed_json() {
        let json = r#"{ "42": { "name": "Carol", "account_status": "inactive" } }"#;
        let dir = StaticDirectory::from_json_str(json).unwrap();
        let carol = dir.lookup("42").unwrap();
        assert_eq!(carol.name, "Carol");
        assert_eq!(carol.account_status, AccountStatus::Inactive);
    }

    #[test]
    fn rejects_unknown_status() {
        let json = r#"{ "42": { "name": "Carol", "account_status": "banned" } }"#;
        let err = StaticDirectory::from_json_str(json).unwrap_err();
        assert!(matches!(err, DeskError::Json(_)));
    }

    #[test]
    fn entries_are_sorted_by_id() {
        let dir = StaticDirectory::builtin();
        let ids: Vec<&str> = dir.entries().into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["123", "456"]);
    }

    #[test]
    fn status_displays_lowercase() {
        assert_eq!(AccountStatus::Active.to_string(), "active");
        assert_eq!(AccountStatus::Inactive.to_string(), "inactive");
    }
}
