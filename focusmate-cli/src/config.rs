use anyhow::{anyhow, Context, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use focusmate_store::Backend;

use crate::state::{config_path, default_data_dir};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub store: StoreSection,
    pub timer: TimerSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSection {
    pub backend: Backend,

    /// Override for the data directory; None means ~/.focusmate/data.
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerSection {
    /// Minutes used when neither --minutes nor --preset is given.
    pub default_minutes: i32,

    /// IANA zone used to bucket sessions into days (streaks, "today").
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreSection {
                backend: Backend::Json,
                data_dir: None,
            },
            timer: TimerSection {
                default_minutes: 25,
                timezone: default_timezone(),
            },
        }
    }
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).context("parse config.toml")
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn data_dir(cfg: &Config) -> Result<PathBuf> {
    match &cfg.store.data_dir {
        Some(dir) => Ok(dir.clone()),
        None => default_data_dir(),
    }
}

/// Parse the configured zone; an empty string falls back to UTC.
pub fn resolve_tz(cfg: &Config) -> Result<Tz> {
    let name = cfg.timer.timezone.trim();
    let name = if name.is_empty() { "UTC" } else { name };
    name.parse()
        .map_err(|_| anyhow!("invalid timezone in config: {name}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let cfg = Config::default();
        let s = toml::to_string_pretty(&cfg).unwrap();
        let back: Config = toml::from_str(&s).unwrap();
        assert_eq!(back.store.backend, Backend::Json);
        assert_eq!(back.timer.default_minutes, 25);
        assert_eq!(back.timer.timezone, "UTC");
    }

    #[test]
    fn test_missing_timezone_field_defaults() {
        let s = "[store]\nbackend = \"memory\"\n\n[timer]\ndefault_minutes = 50\n";
        let cfg: Config = toml::from_str(s).unwrap();
        assert_eq!(cfg.store.backend, Backend::Memory);
        assert_eq!(cfg.timer.timezone, "UTC");
        assert!(resolve_tz(&cfg).is_ok());
    }

    #[test]
    fn test_resolve_tz_rejects_unknown_zone() {
        let mut cfg = Config::default();
        cfg.timer.timezone = "Mars/Olympus_Mons".to_string();
        assert!(resolve_tz(&cfg).is_err());

        cfg.timer.timezone = "America/Chicago".to_string();
        assert_eq!(resolve_tz(&cfg).unwrap(), chrono_tz::America::Chicago);
    }
}
