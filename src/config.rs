//! Runtime configuration. Everything has a sensible default; environment
//! variables override individual settings so a classroom machine can point
//! the roster at a shared folder without a config file.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;

use crate::cost::DEFAULT_TAX_RATE;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".class-roster";
/// Fixed name of the persisted roster.
pub const ROSTER_FILE_NAME: &str = "class_list";
/// Fixed name of the last-user log.
pub const USER_LOG_FILE_NAME: &str = "last_user";

const ENV_DATA_DIR: &str = "CLASS_ROSTER_DIR";
const ENV_LAYOUT: &str = "CLASS_ROSTER_LAYOUT";
const ENV_TAX_RATE: &str = "CLASS_ROSTER_TAX_RATE";
const ENV_USER_LOG: &str = "CLASS_ROSTER_USER_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Which menu and file format the session speaks. The two always travel
/// together: only the full menu collects class metadata, and only the full
/// format has room to store it.
pub enum Layout {
    /// Six options, bare record block on disk.
    Classic,
    /// Seven options, count header and metadata trailer on disk.
    #[default]
    Full,
}

impl Layout {
    pub fn has_metadata(self) -> bool {
        matches!(self, Layout::Full)
    }

    fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(Layout::Classic),
            "full" => Ok(Layout::Full),
            other => Err(anyhow!("unknown layout {other:?}, expected classic or full")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory holding the roster file and the last-user log.
    pub data_dir: PathBuf,
    pub layout: Layout,
    /// Tax applied by the cost calculator, in percent.
    pub tax_rate: f64,
    /// Whether the session asks for a user code before the menu.
    pub user_log: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            layout: Layout::default(),
            tax_rate: DEFAULT_TAX_RATE,
            user_log: true,
        }
    }
}

impl Config {
    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Split out from
    /// `from_env` so tests do not have to mutate the real environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|dir| !dir.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup(ENV_LAYOUT) {
            config.layout =
                Layout::parse(&raw).with_context(|| format!("invalid {ENV_LAYOUT}"))?;
        }
        if let Some(raw) = lookup(ENV_TAX_RATE) {
            let rate = raw
                .trim()
                .parse::<f64>()
                .with_context(|| format!("invalid {ENV_TAX_RATE}: {raw:?}"))?;
            if !rate.is_finite() || rate < 0.0 {
                return Err(anyhow!("{ENV_TAX_RATE} must be a non-negative number"));
            }
            config.tax_rate = rate;
        }
        if let Some(raw) = lookup(ENV_USER_LOG) {
            config.user_log = match raw.trim().to_ascii_lowercase().as_str() {
                "on" | "1" | "true" => true,
                "off" | "0" | "false" => false,
                other => return Err(anyhow!("invalid {ENV_USER_LOG}: {other:?}")),
            };
        }

        Ok(config)
    }

    pub fn roster_path(&self) -> PathBuf {
        self.data_dir.join(ROSTER_FILE_NAME)
    }

    pub fn user_log_path(&self) -> PathBuf {
        self.data_dir.join(USER_LOG_FILE_NAME)
    }
}

/// `~/.class-roster`, or the working directory when no home can be found.
fn default_data_dir() -> PathBuf {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(DATA_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_without_overrides() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config.layout, Layout::Full);
        assert_eq!(config.tax_rate, DEFAULT_TAX_RATE);
        assert!(config.user_log);
        assert!(config.roster_path().ends_with(ROSTER_FILE_NAME));
    }

    #[test]
    fn overrides_are_applied() {
        let config = Config::from_lookup(lookup_from(&[
            (ENV_DATA_DIR, "/tmp/roster"),
            (ENV_LAYOUT, "Classic"),
            (ENV_TAX_RATE, "8.25"),
            (ENV_USER_LOG, "off"),
        ]))
        .unwrap();
        assert_eq!(config.roster_path(), PathBuf::from("/tmp/roster/class_list"));
        assert_eq!(config.user_log_path(), PathBuf::from("/tmp/roster/last_user"));
        assert_eq!(config.layout, Layout::Classic);
        assert_eq!(config.tax_rate, 8.25);
        assert!(!config.user_log);
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(Config::from_lookup(lookup_from(&[(ENV_LAYOUT, "compact")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[(ENV_TAX_RATE, "-1")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[(ENV_TAX_RATE, "lots")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[(ENV_USER_LOG, "maybe")])).is_err());
    }
}
