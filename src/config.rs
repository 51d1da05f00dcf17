//! Tool settings with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/bambusy/bambusy.toml`
//! 3. Environment variables: `BAMBUSY_*` prefix
//! 4. Command line flags (applied by the CLI layer)
//!
//! These are settings of the tool itself. The printer inventory lives in its
//! own JSON file, see [`crate::application::services::InventoryService`].

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::application::{ApplicationError, ApplicationResult, ConfigResultExt};
use crate::domain::seconds;
use crate::infrastructure::mqtt::SessionConfig;

/// Unified configuration for bambusy.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Printers config file (default: printers.json)
    pub printers_file: PathBuf,
    /// Seconds between HOME and CALIBRATION
    pub calibration_delay: f64,
    /// Seconds to settle after the MQTT session is up
    pub connect_wait: f64,
    /// Seconds to wait after the last command before disconnecting
    pub post_wait: f64,
    /// Seconds allowed for connecting, flushing and disconnecting
    pub connect_timeout: f64,
    /// MQTT keep-alive interval in seconds
    pub keep_alive: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            printers_file: PathBuf::from("printers.json"),
            calibration_delay: 3.0,
            connect_wait: 2.0,
            post_wait: 1.0,
            connect_timeout: 10.0,
            keep_alive: 30.0,
        }
    }
}

/// Raw settings for intermediate parsing (fields are Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct RawSettings {
    pub printers_file: Option<PathBuf>,
    pub calibration_delay: Option<f64>,
    pub connect_wait: Option<f64>,
    pub post_wait: Option<f64>,
    pub connect_timeout: Option<f64>,
    pub keep_alive: Option<f64>,
}

/// Get the XDG config directory for bambusy.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "bambusy").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("bambusy.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> ApplicationResult<RawSettings> {
    let content = std::fs::read_to_string(path).config_context("read", path)?;
    toml::from_str(&content).config_context("parse", path)
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::config(e.to_string())
}

/// One `BAMBUSY_<KEY>` value, `None` when the variable is not set.
fn env_value<T: DeserializeOwned>(config: &Config, key: &str) -> ApplicationResult<Option<T>> {
    match config.get::<T>(key) {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(ApplicationError::config(format!(
            "BAMBUSY_{}: {}",
            key.to_uppercase(),
            e
        ))),
    }
}

impl Settings {
    /// Load settings with layered precedence from the default locations.
    pub fn load() -> ApplicationResult<Self> {
        Self::load_from(global_config_path().as_deref())
    }

    /// Load settings using `global_path` as the global config file.
    ///
    /// A missing file is not an error; a malformed one is.
    pub fn load_from(global_path: Option<&Path>) -> ApplicationResult<Self> {
        let mut current = Self::default();

        if let Some(path) = global_path {
            if path.exists() {
                let raw = load_raw_settings(path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();
        current.validate()?;

        Ok(current)
    }

    /// Overlay wins where it specifies a value.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            printers_file: overlay
                .printers_file
                .clone()
                .unwrap_or_else(|| self.printers_file.clone()),
            calibration_delay: overlay.calibration_delay.unwrap_or(self.calibration_delay),
            connect_wait: overlay.connect_wait.unwrap_or(self.connect_wait),
            post_wait: overlay.post_wait.unwrap_or(self.post_wait),
            connect_timeout: overlay.connect_timeout.unwrap_or(self.connect_timeout),
            keep_alive: overlay.keep_alive.unwrap_or(self.keep_alive),
        }
    }

    /// Apply BAMBUSY_* environment variables as explicit overrides.
    ///
    /// Unset variables are skipped; values that do not parse are config errors.
    fn apply_env_overrides(mut settings: Self) -> ApplicationResult<Self> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("BAMBUSY").try_parsing(true))
            .build()
            .map_err(config_err)?;

        if let Some(val) = env_value::<String>(&config, "printers_file")? {
            settings.printers_file = PathBuf::from(val);
        }
        if let Some(val) = env_value(&config, "calibration_delay")? {
            settings.calibration_delay = val;
        }
        if let Some(val) = env_value(&config, "connect_wait")? {
            settings.connect_wait = val;
        }
        if let Some(val) = env_value(&config, "post_wait")? {
            settings.post_wait = val;
        }
        if let Some(val) = env_value(&config, "connect_timeout")? {
            settings.connect_timeout = val;
        }
        if let Some(val) = env_value(&config, "keep_alive")? {
            settings.keep_alive = val;
        }

        Ok(settings)
    }

    /// Expand `~` and `$VAR` in the printers file path.
    fn expand_paths(&mut self) {
        let raw = self.printers_file.to_string_lossy().into_owned();
        if let Ok(expanded) = shellexpand::full(&raw) {
            self.printers_file = PathBuf::from(expanded.into_owned());
        }
    }

    /// Every duration must be a finite, non-negative number of seconds.
    pub fn validate(&self) -> ApplicationResult<()> {
        let durations = [
            ("calibration_delay", self.calibration_delay),
            ("connect_wait", self.connect_wait),
            ("post_wait", self.post_wait),
            ("connect_timeout", self.connect_timeout),
            ("keep_alive", self.keep_alive),
        ];
        for (key, value) in durations {
            seconds(value).map_err(|e| ApplicationError::config(format!("{}: {}", key, e)))?;
        }
        Ok(())
    }

    /// Session timing for the MQTT transport.
    pub fn session_config(&self) -> ApplicationResult<SessionConfig> {
        Ok(SessionConfig {
            timeout: seconds(self.connect_timeout)?,
            connect_wait: seconds(self.connect_wait)?,
            post_wait: seconds(self.post_wait)?,
            keep_alive: seconds(self.keep_alive)?,
        })
    }
}
