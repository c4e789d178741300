//! Account document - the per-user ledger record.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CalendarDate, Timestamp};

/// The per-user ledger document.
///
/// This is the only shared mutable resource in the system. `balance` is
/// never negative after a committed transaction; all mutation goes through
/// the store's transactional primitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountDocument {
    /// Platform username, informational only.
    #[serde(default)]
    pub username: String,

    /// Display first name, informational only.
    #[serde(default)]
    pub first_name: String,

    /// Prepaid credit balance.
    #[serde(default)]
    pub balance: i64,

    /// Calendar date of the last free daily grant, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_free_grant_date: Option<CalendarDate>,

    /// When the account was first created.
    pub joined_at: Timestamp,
}

impl AccountDocument {
    /// A fresh account with zero balance and the given display hints.
    pub fn new(hints: &DisplayHints, joined_at: Timestamp) -> Self {
        Self {
            username: hints.username.clone().unwrap_or_default(),
            first_name: hints.first_name.clone().unwrap_or_default(),
            balance: 0,
            last_free_grant_date: None,
            joined_at,
        }
    }

    /// Which display hints differ from what is stored.
    ///
    /// Empty hints never overwrite stored values; the original bot treats
    /// absence as "no update", not "clear".
    pub fn changed_hints(&self, hints: &DisplayHints) -> AccountPatch {
        let mut patch = AccountPatch::default();
        if let Some(username) = &hints.username {
            if !username.is_empty() && self.username != *username {
                patch.username = Some(username.clone());
            }
        }
        if let Some(first_name) = &hints.first_name {
            if !first_name.is_empty() && self.first_name != *first_name {
                patch.first_name = Some(first_name.clone());
            }
        }
        patch
    }
}

impl Default for AccountDocument {
    fn default() -> Self {
        Self::new(&DisplayHints::default(), Timestamp::now())
    }
}

/// Display fields supplied alongside an inbound interaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayHints {
    pub username: Option<String>,
    pub first_name: Option<String>,
}

impl DisplayHints {
    pub fn new(username: impl Into<String>, first_name: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            first_name: Some(first_name.into()),
        }
    }
}

/// Partial update of an account document's display fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
}

impl AccountPatch {
    /// True when the patch would not change anything.
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.first_name.is_none()
    }

    /// Applies the patch to a document in place.
    pub fn apply(&self, doc: &mut AccountDocument) {
        if let Some(username) = &self.username {
            doc.username = username.clone();
        }
        if let Some(first_name) = &self.first_name {
            doc.first_name = first_name.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_account_starts_at_zero() {
        let doc = AccountDocument::new(&DisplayHints::new("luna", "Luna"), Timestamp::now());
        assert_eq!(doc.balance, 0);
        assert_eq!(doc.username, "luna");
        assert!(doc.last_free_grant_date.is_none());
    }

    #[test]
    fn changed_hints_ignores_matching_values() {
        let doc = AccountDocument::new(&DisplayHints::new("luna", "Luna"), Timestamp::now());
        let patch = doc.changed_hints(&DisplayHints::new("luna", "Luna"));
        assert!(patch.is_empty());
    }

    #[test]
    fn changed_hints_picks_up_renames() {
        let doc = AccountDocument::new(&DisplayHints::new("luna", "Luna"), Timestamp::now());
        let patch = doc.changed_hints(&DisplayHints::new("stella", "Luna"));
        assert_eq!(patch.username.as_deref(), Some("stella"));
        assert!(patch.first_name.is_none());
    }

    #[test]
    fn empty_hints_never_clear_stored_values() {
        let doc = AccountDocument::new(&DisplayHints::new("luna", "Luna"), Timestamp::now());
        let patch = doc.changed_hints(&DisplayHints::new("", ""));
        assert!(patch.is_empty());
    }

    #[test]
    fn patch_applies_only_present_fields() {
        let mut doc = AccountDocument::new(&DisplayHints::new("luna", "Luna"), Timestamp::now());
        let patch = AccountPatch {
            username: Some("stella".to_string()),
            first_name: None,
        };
        patch.apply(&mut doc);
        assert_eq!(doc.username, "stella");
        assert_eq!(doc.first_name, "Luna");
    }
}
