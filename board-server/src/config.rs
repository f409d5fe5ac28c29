//! Server configuration.
//!
//! Every setting has a default and can be overridden by an environment
//! variable:
//!
//! | Variable                | Default          |
//! |-------------------------|------------------|
//! | `BOARD_ADDR`            | `127.0.0.1:3000` |
//! | `BOARD_DATA_DIR`        | `data`           |
//! | `BOARD_REFRESH_SECS`    | `30`             |
//! | `BOARD_LOOKBACK_HOURS`  | `1`              |
//! | `BOARD_LOOKAHEAD_HOURS` | `3`              |
//! | `BOARD_MAX_TRAINS`      | `10`             |

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::board::BoardWindow;

const DEFAULT_ADDR: ([u8; 4], u16) = ([127, 0, 0, 1], 3000);

const DEFAULT_DATA_DIR: &str = "data";

/// The provider's feed updates about twice a minute.
const DEFAULT_REFRESH_SECS: u64 = 30;

/// Error returned when an environment variable holds a bad value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {name}={value:?}: {reason}")]
pub struct ConfigError {
    name: &'static str,
    value: String,
    reason: String,
}

/// Configuration for the board server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on.
    pub addr: SocketAddr,

    /// Directory holding `stations.json` and `trains.json`.
    pub data_dir: PathBuf,

    /// How often to reload the feed.
    pub refresh_interval: Duration,

    /// Which trains each board shows.
    pub window: BoardWindow,
}

impl ServerConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name
    /// to its value if set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let addr = parse_var(&lookup, "BOARD_ADDR")?.unwrap_or(defaults.addr);
        let data_dir = lookup("BOARD_DATA_DIR")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let refresh_secs: u64 = parse_var(&lookup, "BOARD_REFRESH_SECS")?
            .unwrap_or(defaults.refresh_interval.as_secs());
        if refresh_secs == 0 {
            return Err(invalid("BOARD_REFRESH_SECS", "0", "must be at least 1"));
        }

        let lookback_hours =
            parse_hours(&lookup, "BOARD_LOOKBACK_HOURS")?.unwrap_or(defaults.window.lookback_hours);
        let lookahead_hours = parse_hours(&lookup, "BOARD_LOOKAHEAD_HOURS")?
            .unwrap_or(defaults.window.lookahead_hours);
        let max_trains =
            parse_var(&lookup, "BOARD_MAX_TRAINS")?.unwrap_or(defaults.window.max_trains);

        Ok(Self {
            addr,
            data_dir,
            refresh_interval: Duration::from_secs(refresh_secs),
            window: BoardWindow::new(lookback_hours, lookahead_hours, max_trains),
        })
    }

    /// Set the listen address.
    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    /// Set the data directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Set the board window.
    pub fn with_window(mut self, window: BoardWindow) -> Self {
        self.window = window;
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(DEFAULT_ADDR),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_SECS),
            window: BoardWindow::default(),
        }
    }
}

fn invalid(name: &'static str, value: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError {
        name,
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Parse a variable if it is set.
fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(name)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|e: T::Err| invalid(name, &value, e.to_string()))
        })
        .transpose()
}

/// Parse an hour count: finite and not negative.
fn parse_hours(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<f64>, ConfigError> {
    match parse_var::<f64>(lookup, name)? {
        Some(h) if !h.is_finite() || h < 0.0 => Err(invalid(
            name,
            &h.to_string(),
            "must be a non-negative number of hours",
        )),
        other => Ok(other),
    }
}
