//! Configuration types for the observer.
//!
//! All configuration is loaded from environment variables. The observer
//! needs to know where the snapshot lives, how often to poll it, and where
//! to host the dashboard. Values are fixed for the lifetime of the process.

use std::time::Duration;

use crate::error::ConfigError;

/// Default snapshot location.
pub const DEFAULT_SNAPSHOT_URL: &str = "http://127.0.0.1:8000/state.json";

/// Default poll interval in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Default dashboard bind host.
pub const DEFAULT_DASHBOARD_HOST: &str = "127.0.0.1";

/// Default dashboard port.
pub const DEFAULT_DASHBOARD_PORT: u16 = 8090;

/// Complete observer configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObserverConfig {
    /// Where to read the snapshot: an `http(s)://` URL, a `file://` URL,
    /// or a filesystem path.
    pub snapshot_url: String,
    /// Time between the starts of two synchronization cycles.
    pub poll_interval: Duration,
    /// When true, a cycle is skipped while the previous one is still in
    /// flight. When false, cycles may overlap.
    pub skip_in_flight: bool,
    /// Dashboard server settings.
    pub dashboard: DashboardConfig,
}

/// Bind address of the dashboard server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Host address to bind to.
    pub host: String,
    /// TCP port to listen on.
    pub port: u16,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            host: String::from(DEFAULT_DASHBOARD_HOST),
            port: DEFAULT_DASHBOARD_PORT,
        }
    }
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            snapshot_url: String::from(DEFAULT_SNAPSHOT_URL),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            skip_in_flight: false,
            dashboard: DashboardConfig::default(),
        }
    }
}

impl ObserverConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional variables:
    /// - `SNAPSHOT_URL` -- snapshot location (default `http://127.0.0.1:8000/state.json`)
    /// - `POLL_INTERVAL_MS` -- poll interval in milliseconds, non-zero (default 1000)
    /// - `SKIP_IN_FLIGHT` -- skip a cycle while the previous one runs (default `false`)
    /// - `DASHBOARD_HOST` -- dashboard bind host (default `127.0.0.1`)
    /// - `DASHBOARD_PORT` -- dashboard port (default 8090)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// [`from_env`](Self::from_env) passes the process environment; tests
    /// pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let snapshot_url = lookup("SNAPSHOT_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SNAPSHOT_URL.to_owned());

        let poll_interval_ms: u64 = parse_or(&lookup, "POLL_INTERVAL_MS", DEFAULT_POLL_INTERVAL_MS)?;
        if poll_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                name: "POLL_INTERVAL_MS",
                message: String::from("must be greater than zero"),
            });
        }

        let skip_in_flight: bool = parse_or(&lookup, "SKIP_IN_FLIGHT", false)?;

        let host = lookup("DASHBOARD_HOST").unwrap_or_else(|| DEFAULT_DASHBOARD_HOST.to_owned());
        let port: u16 = parse_or(&lookup, "DASHBOARD_PORT", DEFAULT_DASHBOARD_PORT)?;

        Ok(Self {
            snapshot_url,
            poll_interval: Duration::from_millis(poll_interval_ms),
            skip_in_flight,
            dashboard: DashboardConfig { host, port },
        })
    }
}

/// Parse an optional variable, falling back to `default` when unset.
fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e| ConfigError::Invalid {
            name,
            message: format!("{raw:?}: {e}"),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: BTreeMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ObserverConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ObserverConfig::default());
        assert_eq!(config.poll_interval, Duration::from_millis(1000));
        assert!(!config.skip_in_flight);
    }

    #[test]
    fn reads_every_variable() {
        let config = ObserverConfig::from_lookup(lookup(&[
            ("SNAPSHOT_URL", "http://sim.local/state.json"),
            ("POLL_INTERVAL_MS", "250"),
            ("SKIP_IN_FLIGHT", "true"),
            ("DASHBOARD_HOST", "0.0.0.0"),
            ("DASHBOARD_PORT", "9000"),
        ]))
        .unwrap();
        assert_eq!(config.snapshot_url, "http://sim.local/state.json");
        assert_eq!(config.poll_interval, Duration::from_millis(250));
        assert!(config.skip_in_flight);
        assert_eq!(config.dashboard.host, "0.0.0.0");
        assert_eq!(config.dashboard.port, 9000);
    }

    #[test]
    fn zero_interval_is_rejected() {
        let err = ObserverConfig::from_lookup(lookup(&[("POLL_INTERVAL_MS", "0")])).unwrap_err();
        assert!(err.to_string().contains("POLL_INTERVAL_MS"));
    }

    #[test]
    fn unparsable_values_are_rejected() {
        assert!(ObserverConfig::from_lookup(lookup(&[("POLL_INTERVAL_MS", "soon")])).is_err());
        assert!(ObserverConfig::from_lookup(lookup(&[("SKIP_IN_FLIGHT", "maybe")])).is_err());
        assert!(ObserverConfig::from_lookup(lookup(&[("DASHBOARD_PORT", "70000")])).is_err());
    }

    #[test]
    fn blank_snapshot_url_falls_back() {
        let config = ObserverConfig::from_lookup(lookup(&[("SNAPSHOT_URL", "  ")])).unwrap();
        assert_eq!(config.snapshot_url, DEFAULT_SNAPSHOT_URL);
    }
}
