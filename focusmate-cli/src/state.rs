use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

pub fn focusmate_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".focusmate"))
}

pub fn ensure_focusmate_home() -> Result<PathBuf> {
    let dir = focusmate_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_focusmate_home()?.join("config.toml"))
}

pub fn default_data_dir() -> Result<PathBuf> {
    Ok(ensure_focusmate_home()?.join("data"))
}
