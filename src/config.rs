//! Server and suite settings. CLI flags override what these load.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;

use crate::site::Site;
use crate::{Error, Result};

pub const BASE_URL_VAR: &str = "POKEMON_INDEX_BASE_URL";
pub const SETTLE_MS_VAR: &str = "POKEMON_INDEX_SETTLE_MS";
pub const POLL_MS_VAR: &str = "POKEMON_INDEX_POLL_MS";

const DEFAULT_ADDR: ([u8; 4], u16) = ([127, 0, 0, 1], 8080);
const DEFAULT_SETTLE_MS: u64 = 2_000;
const DEFAULT_POLL_MS: u64 = 25;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServeConfig {
    pub addr: SocketAddr,
    /// Serve from this directory instead of the embedded assets.
    pub site_root: Option<PathBuf>,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(DEFAULT_ADDR),
            site_root: None,
        }
    }
}

impl ServeConfig {
    pub fn site(&self) -> Site {
        match &self.site_root {
            Some(root) => Site::from_dir(root.clone()),
            None => Site::embedded(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuiteConfig {
    /// Site under test. `None` means the caller starts one.
    pub base_url: Option<String>,
    /// Upper bound for following navigations a page left pending. A page
    /// with nothing pending settles immediately.
    pub settle_timeout: Duration,
    /// Pause between navigation hops while settling.
    pub poll_interval: Duration,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            settle_timeout: Duration::from_millis(DEFAULT_SETTLE_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_MS),
        }
    }
}

impl SuiteConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`SuiteConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(base_url) = lookup(BASE_URL_VAR).filter(|value| !value.trim().is_empty()) {
            url::Url::parse(base_url.trim())
                .map_err(|err| Error::Config(format!("{BASE_URL_VAR}={base_url}: {err}")))?;
            config.base_url = Some(base_url.trim().to_string());
        }
        if let Some(value) = lookup(SETTLE_MS_VAR) {
            config.settle_timeout = parse_millis(SETTLE_MS_VAR, &value)?;
        }
        if let Some(value) = lookup(POLL_MS_VAR) {
            let poll = parse_millis(POLL_MS_VAR, &value)?;
            if poll.is_zero() {
                return Err(Error::Config(format!("{POLL_MS_VAR} must be positive")));
            }
            config.poll_interval = poll;
        }
        Ok(config)
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}

fn parse_millis(name: &str, value: &str) -> Result<Duration> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|err| Error::Config(format!("{name}={value}: {err}")))
}
