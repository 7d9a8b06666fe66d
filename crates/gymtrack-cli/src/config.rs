//! CLI configuration
//!
//! Settings come from an optional TOML file. The database path can be
//! overridden by the environment and then by the `--database` flag.

use gymtrack_core::logging_facility::Profile;
use serde::Deserialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// File used when neither the flag, the environment nor the config names one
pub const DEFAULT_DATABASE: &str = "gym_membership.db";

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "gymtrack.toml";

pub const DATABASE_ENV: &str = "GYMTRACK_DATABASE";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GymtrackConfig {
    pub database_path: Option<PathBuf>,
    pub log_profile: Profile,
}

impl GymtrackConfig {
    /// Load settings from `explicit`, or from `gymtrack.toml` if it exists
    ///
    /// A missing default file yields the defaults. A missing explicit file
    /// or malformed TOML is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let text = std::fs::read_to_string(&path)
            .map_err(|e| format!("cannot read config {}: {}", path.display(), e))?;
        Self::from_toml_str(&text)
            .map_err(|e| format!("invalid config {}: {}", path.display(), e).into())
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Pick the database path: flag, then environment, then config, then
    /// the default file name
    pub fn resolve_database(&self, flag: Option<&Path>, env: Option<OsString>) -> PathBuf {
        if let Some(path) = flag {
            return path.to_path_buf();
        }
        if let Some(value) = env.filter(|v| !v.is_empty()) {
            return PathBuf::from(value);
        }
        self.database_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_defaults() {
        let config = GymtrackConfig::from_toml_str("").unwrap();
        assert_eq!(config, GymtrackConfig::default());
        assert_eq!(config.log_profile, Profile::Development);
    }

    #[test]
    fn test_parse_full_file() {
        let config = GymtrackConfig::from_toml_str(
            "database_path = \"/var/lib/gym/gym.db\"\nlog_profile = \"production\"\n",
        )
        .unwrap();
        assert_eq!(config.database_path, Some(PathBuf::from("/var/lib/gym/gym.db")));
        assert_eq!(config.log_profile, Profile::Production);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(GymtrackConfig::from_toml_str("datbase_path = \"x\"").is_err());
    }

    #[test]
    fn test_database_precedence() {
        let config = GymtrackConfig {
            database_path: Some(PathBuf::from("from_config.db")),
            ..Default::default()
        };

        assert_eq!(
            config.resolve_database(Some(Path::new("flag.db")), Some("env.db".into())),
            PathBuf::from("flag.db")
        );
        assert_eq!(
            config.resolve_database(None, Some("env.db".into())),
            PathBuf::from("env.db")
        );
        assert_eq!(
            config.resolve_database(None, Some(OsString::new())),
            PathBuf::from("from_config.db")
        );
        assert_eq!(
            GymtrackConfig::default().resolve_database(None, None),
            PathBuf::from(DEFAULT_DATABASE)
        );
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(GymtrackConfig::load(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gymtrack.toml");
        std::fs::write(&path, "log_profile = \"production\"\n").unwrap();

        let config = GymtrackConfig::load(Some(&path)).unwrap();
        assert_eq!(config.log_profile, Profile::Production);
        assert_eq!(config.database_path, None);
    }
}
