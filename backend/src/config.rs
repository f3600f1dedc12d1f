//! Application configuration.
//!
//! Settings are read from an `agenda.toml` file (every section optional) and can
//! be overridden with environment variables:
//!
//! - `HOST`, `PORT`: server bind address
//! - `REPOSITORY_TYPE`: `local` | `file`
//! - `AGENDA_PATH`: agenda JSON file or directory for the file repository
//! - `LIVE_POLICY`: `up_to_current_slot` | `date_rollover`
//! - `STRICT_TIMES`: `true` to reject malformed event times
//! - `TIMEZONE`: IANA zone of the agenda's wall-clock, e.g. `Europe/Madrid`
//! - `UTC_OFFSET_MINUTES`: fixed wall-clock offset, for zones without daylight saving
//!
//! Invalid values are rejected while loading rather than when first used.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::db::factory::RepositoryType;
use crate::db::repositories::DEFAULT_MAX_AGENDAS;
use crate::db::repository::RepositoryError;
use crate::services::clock::{ClockZone, SystemClock};
use crate::services::live::{LiveAnnotator, LivePolicy};

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub repository: RepositorySettings,
    #[serde(default)]
    pub annotator: AnnotatorSettings,
    #[serde(default)]
    pub server: ServerSettings,
}

/// Repository type settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type", default = "default_repo_type")]
    pub repo_type: String,
    /// Agenda file or directory for the file repository.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Stored agendas kept before the oldest are evicted.
    #[serde(default = "default_max_agendas")]
    pub max_agendas: usize,
}

impl Default for RepositorySettings {
    fn default() -> Self {
        Self {
            repo_type: default_repo_type(),
            path: None,
            max_agendas: default_max_agendas(),
        }
    }
}

impl RepositorySettings {
    pub fn repository_type(&self) -> Result<RepositoryType, String> {
        RepositoryType::from_str(&self.repo_type)
    }
}

/// Live annotation settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnnotatorSettings {
    #[serde(default)]
    pub policy: LivePolicy,
    #[serde(default)]
    pub strict_times: bool,
    /// IANA zone of the agenda's wall-clock.
    #[serde(default)]
    pub timezone: Option<String>,
    /// Fixed minutes east of UTC. Mutually exclusive with `timezone`; host
    /// local time when neither is set.
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,
}

impl AnnotatorSettings {
    pub fn annotator(&self) -> LiveAnnotator {
        LiveAnnotator::new(self.policy).with_strict_times(self.strict_times)
    }

    pub fn clock_zone(&self) -> Result<ClockZone, RepositoryError> {
        match (&self.timezone, self.utc_offset_minutes) {
            (Some(_), Some(_)) => Err(RepositoryError::configuration(
                "Set either timezone or utc_offset_minutes, not both",
            )),
            (Some(name), None) => ClockZone::named(name).map_err(RepositoryError::configuration),
            (None, Some(minutes)) => {
                ClockZone::fixed_minutes(minutes).map_err(RepositoryError::configuration)
            }
            (None, None) => Ok(ClockZone::Local),
        }
    }

    pub fn clock(&self) -> Result<SystemClock, RepositoryError> {
        Ok(SystemClock::in_zone(self.clock_zone()?))
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_repo_type() -> String {
    "local".to_string()
}

fn default_max_agendas() -> usize {
    DEFAULT_MAX_AGENDAS
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RepositoryError::configuration(format!("Failed to read config file: {}", e))
        })?;

        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, RepositoryError> {
        let config: Self = toml::from_str(content).map_err(|e| {
            RepositoryError::configuration(format!("Failed to parse config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check settings that serde cannot, such as the clock zone.
    pub fn validate(&self) -> Result<(), RepositoryError> {
        self.repository
            .repository_type()
            .map_err(RepositoryError::configuration)?;
        if self.repository.max_agendas == 0 {
            return Err(RepositoryError::configuration("max_agendas must be at least 1"));
        }
        self.annotator.clock_zone()?;
        Ok(())
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `agenda.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    ///
    /// Returns `None` when no file exists in any of them.
    pub fn from_default_location() -> Result<Option<Self>, RepositoryError> {
        let search_paths = [
            PathBuf::from("agenda.toml"),
            PathBuf::from("backend/agenda.toml"),
            PathBuf::from("../agenda.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path).map(Some);
            }
        }

        Ok(None)
    }

    /// Default-location file if present, defaults otherwise, then environment overrides.
    pub fn load() -> Result<Self, RepositoryError> {
        Self::from_default_location()?
            .unwrap_or_default()
            .with_env_overrides()
    }

    /// Apply environment variable overrides on top of file settings.
    pub fn with_env_overrides(mut self) -> Result<Self, RepositoryError> {
        if let Ok(host) = env::var("HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("PORT") {
            self.server.port = port.parse().map_err(|_| {
                RepositoryError::configuration(format!("PORT must be a valid port number, got '{}'", port))
            })?;
        }
        if let Ok(repo_type) = env::var("REPOSITORY_TYPE") {
            self.repository.repo_type = repo_type;
        }
        if let Ok(path) = env::var("AGENDA_PATH") {
            self.repository.path = Some(PathBuf::from(path));
            if env::var("REPOSITORY_TYPE").is_err() {
                self.repository.repo_type = "file".to_string();
            }
        }
        if let Ok(policy) = env::var("LIVE_POLICY") {
            self.annotator.policy = policy.parse().map_err(RepositoryError::configuration)?;
        }
        if let Ok(strict) = env::var("STRICT_TIMES") {
            self.annotator.strict_times = strict.parse().map_err(|_| {
                RepositoryError::configuration(format!("STRICT_TIMES must be true or false, got '{}'", strict))
            })?;
        }
        let timezone = env::var("TIMEZONE").ok();
        if let Some(name) = &timezone {
            self.annotator.timezone = Some(name.clone());
            self.annotator.utc_offset_minutes = None;
        }
        if let Ok(offset) = env::var("UTC_OFFSET_MINUTES") {
            let minutes = offset.parse().map_err(|_| {
                RepositoryError::configuration(format!(
                    "UTC_OFFSET_MINUTES must be an integer, got '{}'",
                    offset
                ))
            })?;
            self.annotator.utc_offset_minutes = Some(minutes);
            if timezone.is_none() {
                self.annotator.timezone = None;
            }
        }
        self.validate()?;
        Ok(self)
    }

    /// Socket address string for the server.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
