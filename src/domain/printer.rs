//! Printer profiles and the fleet they form

use std::collections::HashMap;
use std::fmt;

use crate::domain::{DomainError, DomainResult};

/// MQTT-over-TLS port printers listen on in LAN mode.
pub const DEFAULT_MQTT_PORT: u16 = 8883;

/// Connection and identity data for one configured printer.
#[derive(Clone, PartialEq, Eq)]
pub struct PrinterProfile {
    /// Unique id used on the command line
    pub id: u32,
    /// Display name
    pub name: String,
    /// Hostname or IP address on the LAN
    pub host: String,
    /// Device serial, used in MQTT topics
    pub serial: String,
    /// LAN access code (secret)
    pub access_code: String,
    /// MQTT port
    pub port: u16,
}

impl PrinterProfile {
    /// Topic commands are published to.
    pub fn request_topic(&self) -> String {
        format!("device/{}/request", self.serial)
    }

    /// Name used when the config omits one.
    pub fn default_name(id: u32) -> String {
        format!("printer-{}", id)
    }
}

// access_code never shows up in logs
impl fmt::Debug for PrinterProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrinterProfile")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("host", &self.host)
            .field("serial", &self.serial)
            .field("access_code", &"***")
            .field("port", &self.port)
            .finish()
    }
}

impl fmt::Display for PrinterProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.id, self.name)
    }
}

/// All configured printers, in config file order.
///
/// Ids are unique; this is enforced by [`Fleet::new`].
#[derive(Debug, Clone, Default)]
pub struct Fleet {
    printers: Vec<PrinterProfile>,
    index: HashMap<u32, usize>,
}

impl Fleet {
    /// Build a fleet, rejecting duplicate ids.
    pub fn new(printers: Vec<PrinterProfile>) -> DomainResult<Self> {
        let mut index = HashMap::with_capacity(printers.len());
        for (pos, printer) in printers.iter().enumerate() {
            if index.insert(printer.id, pos).is_some() {
                return Err(DomainError::DuplicatePrinterId(printer.id));
            }
        }
        Ok(Self { printers, index })
    }

    pub fn get(&self, id: u32) -> Option<&PrinterProfile> {
        self.index.get(&id).map(|&pos| &self.printers[pos])
    }

    pub fn contains(&self, id: u32) -> bool {
        self.index.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PrinterProfile> {
        self.printers.iter()
    }

    pub fn len(&self) -> usize {
        self.printers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.printers.is_empty()
    }
}
