//! Privileged-user allow-list configuration

use serde::Deserialize;

use crate::domain::foundation::UserId;

use super::error::ValidationError;

/// Privileged user allow-list.
///
/// Privileged users skip charges and the daily limit. The list arrives as
/// a comma-separated string because that is the friendliest shape for an
/// environment variable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccessConfig {
    /// Comma-separated platform ids, e.g. `469764985,42`
    #[serde(default)]
    pub admin_ids: String,
}

impl AccessConfig {
    /// Parses the allow-list into user ids.
    pub fn privileged_ids(&self) -> Result<Vec<UserId>, ValidationError> {
        self.admin_ids
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                entry
                    .parse()
                    .map_err(|_| ValidationError::InvalidAdminId(entry.to_string()))
            })
            .collect()
    }

    /// Whether the given user is on the allow-list.
    pub fn is_privileged(&self, id: UserId) -> bool {
        self.privileged_ids()
            .map(|ids| ids.contains(&id))
            .unwrap_or(false)
    }

    /// Validate the allow-list parses cleanly.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.privileged_ids().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_has_no_privileged_users() {
        let config = AccessConfig::default();
        assert!(config.privileged_ids().unwrap().is_empty());
        assert!(!config.is_privileged(UserId::new(1)));
    }

    #[test]
    fn parses_comma_separated_ids() {
        let config = AccessConfig {
            admin_ids: "469764985, 42".to_string(),
        };
        assert!(config.is_privileged(UserId::new(469764985)));
        assert!(config.is_privileged(UserId::new(42)));
        assert!(!config.is_privileged(UserId::new(7)));
    }

    #[test]
    fn tolerates_trailing_commas() {
        let config = AccessConfig {
            admin_ids: "42,".to_string(),
        };
        assert_eq!(config.privileged_ids().unwrap().len(), 1);
    }

    #[test]
    fn rejects_non_numeric_entries() {
        let config = AccessConfig {
            admin_ids: "42,bogus".to_string(),
        };
        assert!(config.validate().is_err());
    }
}
