//! Configuration for the interceptor service.
//!
//! Defaults can be overridden via environment variables (and those in
//! turn by command-line flags in `main`):
//!
//! - `OUTFIT_HOST_ADDR`         (default: "127.0.0.1:9092")
//! - `OUTFIT_CYCLE_INTERVAL_MS` (default: "5000")
//! - `OUTFIT_SEEN_CAPACITY`     (default: "400")
//! - `OUTFIT_HEADERS`           (optional path to a TOML header map)

use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use outfit_core::{Session, CYCLE_INTERVAL, MAX_USERS};
use outfit_protocol::HeaderMap;

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address of the extension host to connect to.
    pub host_addr: String,

    /// Delay between two outfit-cycle steps.
    pub cycle_interval: Duration,

    /// Bound of the seen-user cache.
    pub seen_capacity: usize,

    /// Packet header ids for the connected client release.
    pub headers: HeaderMap,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host_addr: "127.0.0.1:9092".to_string(),
            cycle_interval: CYCLE_INTERVAL,
            seen_capacity: MAX_USERS,
            headers: HeaderMap::default(),
        }
    }
}

impl Config {
    /// Construct a `Config` from environment variables, falling back
    /// to the defaults.
    pub fn from_env() -> Result<Self> {
        let defaults = Config::default();

        let host_addr = env::var("OUTFIT_HOST_ADDR").unwrap_or(defaults.host_addr);
        let interval_ms = read_env_or_default(
            "OUTFIT_CYCLE_INTERVAL_MS",
            defaults.cycle_interval.as_millis() as u64,
        )?;
        let seen_capacity = read_env_or_default("OUTFIT_SEEN_CAPACITY", defaults.seen_capacity)?;

        let headers = match env::var("OUTFIT_HEADERS") {
            Ok(path) => load_headers(&path)?,
            Err(_) => defaults.headers,
        };

        Ok(Config {
            host_addr,
            cycle_interval: Duration::from_millis(interval_ms),
            seen_capacity,
            headers,
        })
    }

    /// Fresh session honouring this configuration.
    pub fn new_session(&self) -> Session {
        Session::with_settings(self.seen_capacity, self.cycle_interval)
    }
}

/// Read a header map from a TOML file. Missing keys keep their defaults.
pub fn load_headers(path: impl AsRef<Path>) -> Result<HeaderMap> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading header map {}", path.display()))?;
    parse_headers(&text).with_context(|| format!("parsing header map {}", path.display()))
}

/// Parse a TOML header map.
pub fn parse_headers(text: &str) -> Result<HeaderMap> {
    Ok(toml::from_str(text)?)
}

fn read_env_or_default<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(val) => val
            .parse::<T>()
            .with_context(|| format!("invalid value for {}: {:?}", key, val)),
        Err(_) => Ok(default),
    }
}
