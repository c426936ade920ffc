//! Site-wide settings stored in the `settings` table.

use std::str::FromStr;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::parent::is_plausible_email;
use crate::error::{DirectoryError, Result};

/// Keys accepted by the settings table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SettingKey {
    SiteName,
    AdminEmail,
    FromEmail,
    DigestHour,
    LastDigestDate,
}

impl SettingKey {
    pub const ALL: [SettingKey; 5] = [
        SettingKey::SiteName,
        SettingKey::AdminEmail,
        SettingKey::FromEmail,
        SettingKey::DigestHour,
        SettingKey::LastDigestDate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::SiteName => "site_name",
            SettingKey::AdminEmail => "admin_email",
            SettingKey::FromEmail => "from_email",
            SettingKey::DigestHour => "digest_hour",
            SettingKey::LastDigestDate => "last_digest_date",
        }
    }

    /// Validates and normalizes a value for this key.
    pub fn normalize(&self, value: &str) -> Result<String> {
        let value = value.trim();
        match self {
            SettingKey::SiteName => {
                if value.is_empty() {
                    return Err(DirectoryError::invalid_input(
                        self.as_str(),
                        "Site name cannot be empty",
                    ));
                }
                Ok(value.to_string())
            }
            SettingKey::AdminEmail | SettingKey::FromEmail => {
                if !is_plausible_email(value) {
                    return Err(DirectoryError::invalid_input(
                        self.as_str(),
                        format!("'{value}' is not a valid email address"),
                    ));
                }
                Ok(value.to_lowercase())
            }
            SettingKey::DigestHour => match value.parse::<u8>() {
                Ok(hour) if hour < 24 => Ok(hour.to_string()),
                _ => Err(DirectoryError::invalid_input(
                    self.as_str(),
                    "Digest hour must be between 0 and 23",
                )),
            },
            SettingKey::LastDigestDate => value
                .parse::<Date>()
                .map(|d| d.to_string())
                .map_err(|e| DirectoryError::invalid_input(self.as_str(), e.to_string())),
        }
    }
}

impl FromStr for SettingKey {
    type Err = DirectoryError;

    fn from_str(s: &str) -> Result<Self> {
        SettingKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| DirectoryError::invalid_input("key", format!("Unknown setting: {s}")))
    }
}

/// Typed view of the settings table with defaults filled in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    pub site_name: String,
    pub admin_email: Option<String>,
    pub from_email: String,
    /// Local hour (0-23) after which the daily digest is due
    pub digest_hour: u8,
    pub last_digest_date: Option<Date>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            site_name: "Camp Directory".to_string(),
            admin_email: None,
            from_email: "noreply@campdirectory.local".to_string(),
            digest_hour: 7,
            last_digest_date: None,
        }
    }
}

impl Settings {
    /// Builds settings from stored key/value pairs. Unknown keys and values
    /// that no longer parse are ignored in favour of defaults.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut settings = Self::default();
        for (key, value) in pairs {
            let Ok(key) = key.parse::<SettingKey>() else {
                continue;
            };
            match key {
                SettingKey::SiteName => settings.site_name = value,
                SettingKey::AdminEmail => settings.admin_email = Some(value),
                SettingKey::FromEmail => settings.from_email = value,
                SettingKey::DigestHour => {
                    if let Ok(hour) = value.parse::<u8>() {
                        settings.digest_hour = hour.min(23);
                    }
                }
                SettingKey::LastDigestDate => settings.last_digest_date = value.parse().ok(),
            }
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_digest_hour() {
        assert_eq!(SettingKey::DigestHour.normalize(" 07 ").unwrap(), "7");
        assert!(SettingKey::DigestHour.normalize("24").is_err());
        assert!(SettingKey::DigestHour.normalize("-1").is_err());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(
            SettingKey::AdminEmail.normalize("Admin@Example.com").unwrap(),
            "admin@example.com"
        );
        assert!(SettingKey::FromEmail.normalize("nobody").is_err());
    }

    #[test]
    fn test_unknown_key() {
        assert!("theme".parse::<SettingKey>().is_err());
        assert_eq!("digest_hour".parse::<SettingKey>().unwrap(), SettingKey::DigestHour);
    }

    #[test]
    fn test_from_pairs_fills_defaults() {
        let settings = Settings::from_pairs(vec![
            ("site_name".to_string(), "Summer Camps".to_string()),
            ("digest_hour".to_string(), "not a number".to_string()),
            ("last_digest_date".to_string(), "2026-06-01".to_string()),
            ("legacy_option".to_string(), "1".to_string()),
        ]);
        assert_eq!(settings.site_name, "Summer Camps");
        assert_eq!(settings.digest_hour, 7);
        assert_eq!(settings.last_digest_date, Some(jiff::civil::date(2026, 6, 1)));
        assert_eq!(settings.admin_email, None);
    }
}
