use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

use crate::list::DEFAULT_PAGE_SIZE;

pub const CONFIG_CANDIDATES: [&str; 2] = ["./config/config.json", "/config/config.json"];
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SESSION_FILE: &str = ".dispute-desk/session.json";

/// One configuration layer. Flags, environment and the config file all
/// produce one of these; the first layer that sets a value wins.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConfigLayer {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub page_size: Option<usize>,
    #[serde(default)]
    pub session_file: Option<PathBuf>,
}

impl ConfigLayer {
    /// Reads the `DISPUTE_DESK_*` variables through `lookup`
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let timeout_secs = var("DISPUTE_DESK_TIMEOUT_SECS")
            .map(|v| v.trim().parse::<u64>())
            .transpose()
            .context("invalid DISPUTE_DESK_TIMEOUT_SECS")?;
        let page_size = var("DISPUTE_DESK_PAGE_SIZE")
            .map(|v| v.trim().parse::<usize>())
            .transpose()
            .context("invalid DISPUTE_DESK_PAGE_SIZE")?;

        Ok(Self {
            base_url: var("DISPUTE_DESK_BASE_URL"),
            token: var("DISPUTE_DESK_TOKEN"),
            timeout_secs,
            page_size,
            session_file: var("DISPUTE_DESK_SESSION_FILE").map(PathBuf::from),
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// First readable candidate, or an empty layer when none exists
    pub fn from_file(candidates: &[&str]) -> Result<Self> {
        let Some((path, contents)) = candidates
            .iter()
            .find_map(|p| fs::read_to_string(p).ok().map(|s| (*p, s)))
        else {
            return Ok(Self::default());
        };

        serde_json::from_str(&contents).with_context(|| format!("parse failed for {path}"))
    }

    /// Flags, then environment, then the first config file found
    pub fn resolve(flags: Self) -> Result<Self> {
        let env = Self::from_env()?;
        let file = Self::from_file(&CONFIG_CANDIDATES)?;
        Ok(Self::merge([flags, env, file]))
    }

    /// Earlier layers take precedence
    pub fn merge(layers: impl IntoIterator<Item = Self>) -> Self {
        layers.into_iter().fold(Self::default(), Self::or)
    }

    pub fn session_path(&self) -> PathBuf {
        self.session_file
            .clone()
            .unwrap_or_else(|| Path::new(DEFAULT_SESSION_FILE).to_path_buf())
    }

    fn or(self, other: Self) -> Self {
        Self {
            base_url: self.base_url.or(other.base_url),
            token: self.token.or(other.token),
            timeout_secs: self.timeout_secs.or(other.timeout_secs),
            page_size: self.page_size.or(other.page_size),
            session_file: self.session_file.or(other.session_file),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout: Duration,
    pub page_size: usize,
}

impl ConsoleConfig {
    pub fn from_layers(layers: impl IntoIterator<Item = ConfigLayer>) -> Result<Self> {
        Self::from_layer(ConfigLayer::merge(layers))
    }

    pub fn from_layer(merged: ConfigLayer) -> Result<Self> {
        let base_url = merged
            .base_url
            .map(|u| u.trim().to_owned())
            .filter(|u| !u.is_empty())
            .ok_or_else(|| {
                anyhow!("no backend URL configured (--base-url, DISPUTE_DESK_BASE_URL or config.json)")
            })?;

        let page_size = merged.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size == 0 {
            return Err(anyhow!("page size must be at least 1"));
        }

        Ok(Self {
            base_url,
            token: merged.token,
            timeout: Duration::from_secs(merged.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
            page_size,
        })
    }
}
