//! Server configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::availability::{AvailabilityConfig, UnresolvedBookingPolicy};

/// Listen address when `SEAT_SERVER_ADDR` is unset.
pub const DEFAULT_ADDR: ([u8; 4], u16) = ([127, 0, 0, 1], 3000);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on.
    pub addr: SocketAddr,

    /// JSON seed file to load. Takes precedence over the demo seed.
    pub data_path: Option<PathBuf>,

    /// Load the built-in demo network when no seed file is given.
    pub demo_seed: bool,

    pub availability: AvailabilityConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(DEFAULT_ADDR),
            data_path: None,
            demo_seed: true,
            availability: AvailabilityConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Reads configuration from the process environment.
    ///
    /// - `SEAT_SERVER_ADDR`: listen address, e.g. `0.0.0.0:8080`
    /// - `SEAT_SERVER_DATA`: path to a JSON seed file
    /// - `SEAT_SERVER_DEMO`: `0`/`false` starts with an empty network
    /// - `SEAT_SERVER_UNRESOLVED_BOOKINGS`: `ignore` (default) or `block`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup("SEAT_SERVER_ADDR") {
            config.addr = value.parse().map_err(|_| ConfigError::Invalid {
                var: "SEAT_SERVER_ADDR",
                value,
            })?;
        }

        config.data_path = lookup("SEAT_SERVER_DATA")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        if let Some(value) = lookup("SEAT_SERVER_DEMO") {
            config.demo_seed = match value.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "SEAT_SERVER_DEMO",
                        value,
                    });
                }
            };
        }

        if let Some(value) = lookup("SEAT_SERVER_UNRESOLVED_BOOKINGS") {
            let policy = match value.to_ascii_lowercase().as_str() {
                "ignore" => UnresolvedBookingPolicy::Ignore,
                "block" => UnresolvedBookingPolicy::Block,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "SEAT_SERVER_UNRESOLVED_BOOKINGS",
                        value,
                    });
                }
            };
            config.availability = AvailabilityConfig::new(policy);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.addr, SocketAddr::from(DEFAULT_ADDR));
        assert_eq!(config.data_path, None);
        assert!(config.demo_seed);
        assert_eq!(
            config.availability.unresolved_bookings,
            UnresolvedBookingPolicy::Ignore
        );
    }

    #[test]
    fn reads_every_variable() {
        let config = config_from(&[
            ("SEAT_SERVER_ADDR", "0.0.0.0:8080"),
            ("SEAT_SERVER_DATA", "/srv/seed.json"),
            ("SEAT_SERVER_DEMO", "false"),
            ("SEAT_SERVER_UNRESOLVED_BOOKINGS", "Block"),
        ])
        .unwrap();

        assert_eq!(config.addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.data_path, Some(PathBuf::from("/srv/seed.json")));
        assert!(!config.demo_seed);
        assert_eq!(
            config.availability.unresolved_bookings,
            UnresolvedBookingPolicy::Block
        );
    }

    #[test]
    fn empty_data_path_is_ignored() {
        let config = config_from(&[("SEAT_SERVER_DATA", "")]).unwrap();
        assert_eq!(config.data_path, None);
    }

    #[test]
    fn bad_values_are_reported() {
        assert_eq!(
            config_from(&[("SEAT_SERVER_ADDR", "localhost")]).unwrap_err(),
            ConfigError::Invalid {
                var: "SEAT_SERVER_ADDR",
                value: "localhost".into()
            }
        );
        assert!(config_from(&[("SEAT_SERVER_DEMO", "maybe")]).is_err());
        assert!(config_from(&[("SEAT_SERVER_UNRESOLVED_BOOKINGS", "drop")]).is_err());
    }
}
