//! Printer inventory service
//!
//! Loads the printers JSON file into a [`Fleet`].

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult, ConfigResultExt};
use crate::domain::{Fleet, PrinterProfile, DEFAULT_MQTT_PORT};
use crate::infrastructure::traits::FileSystem;

/// On-disk layout: `{"printers": [...]}`.
#[derive(Debug, Deserialize)]
struct RawInventory {
    printers: Vec<RawPrinter>,
}

#[derive(Debug, Deserialize)]
struct RawPrinter {
    id: u32,
    name: Option<String>,
    host: String,
    serial: String,
    access_code: String,
    port: Option<u16>,
}

impl From<RawPrinter> for PrinterProfile {
    fn from(raw: RawPrinter) -> Self {
        Self {
            id: raw.id,
            name: raw.name.unwrap_or_else(|| PrinterProfile::default_name(raw.id)),
            host: raw.host,
            serial: raw.serial,
            access_code: raw.access_code,
            port: raw.port.unwrap_or(DEFAULT_MQTT_PORT),
        }
    }
}

/// Service for loading configured printers.
pub struct InventoryService {
    fs: Arc<dyn FileSystem>,
}

impl InventoryService {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Load the fleet from a printers config file.
    pub fn load(&self, path: &Path) -> ApplicationResult<Fleet> {
        debug!("load: path={}", path.display());
        if !self.fs.exists(path) {
            return Err(ApplicationError::config(format!(
                "config file not found: {}",
                path.display()
            )));
        }

        let content = self.fs.read_to_string(path).config_context("read", path)?;
        let fleet = Self::parse(&content).map_err(|e| match e {
            ApplicationError::Config { message } => {
                ApplicationError::config(format!("parse {}: {}", path.display(), message))
            }
            other => other,
        })?;

        debug!("load: {} printer(s)", fleet.len());
        Ok(fleet)
    }

    /// Parse config file contents.
    pub fn parse(content: &str) -> ApplicationResult<Fleet> {
        let raw: RawInventory =
            serde_json::from_str(content).map_err(|e| ApplicationError::config(e.to_string()))?;
        let printers = raw.printers.into_iter().map(PrinterProfile::from).collect();
        Ok(Fleet::new(printers)?)
    }
}
