//! Server settings loaded via OrthoConfig, and the runtime configuration
//! derived from them.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::BookingRules;
use crate::domain::rules::{DEFAULT_CANCEL_CUTOFF_MINUTES, DEFAULT_MAX_HOURS_PER_DAY};

const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;

/// Settings read from CLI flags, `STUDY_ROOMS_*` environment variables and
/// configuration files, in that order of precedence.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STUDY_ROOMS")]
pub struct ServerSettings {
    /// Directory holding `rooms.json`, `bookings.json`, `errors.ndjson` and
    /// the outbox.
    pub data_dir: Option<PathBuf>,
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u16>,
    /// Maximum booked hours per user per calendar day.
    pub max_hours_per_day: Option<u32>,
    /// Minimum lead time before start for a cancellation.
    pub cancel_cutoff_minutes: Option<u32>,
}

impl ServerSettings {
    /// Return the data directory, falling back to `./data`.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    }

    /// Return the bind host, falling back to loopback.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Return the bind port, falling back to 8000.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Business rule parameters.
    pub fn rules(&self) -> BookingRules {
        BookingRules {
            max_hours_per_day: self.max_hours_per_day.unwrap_or(DEFAULT_MAX_HOURS_PER_DAY),
            cancel_cutoff_minutes: self
                .cancel_cutoff_minutes
                .unwrap_or(DEFAULT_CANCEL_CUTOFF_MINUTES),
        }
    }
}

/// Runtime configuration for creating the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) data_dir: PathBuf,
    pub(crate) bind_addr: (String, u16),
    pub(crate) rules: BookingRules,
}

impl ServerConfig {
    /// Construct a server configuration from explicit values.
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>, bind_addr: (String, u16), rules: BookingRules) -> Self {
        Self {
            data_dir: data_dir.into(),
            bind_addr,
            rules,
        }
    }

    /// Return the address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> (&str, u16) {
        (self.bind_addr.0.as_str(), self.bind_addr.1)
    }

    /// Return the data directory.
    #[must_use]
    pub fn data_dir(&self) -> &std::path::Path {
        &self.data_dir
    }
}

impl From<&ServerSettings> for ServerConfig {
    fn from(settings: &ServerSettings) -> Self {
        Self::new(
            settings.data_dir(),
            (settings.host().to_owned(), settings.port()),
            settings.rules(),
        )
    }
}
