//! Domain layer: printer profiles, selection rules and command payloads
//!
//! This layer is independent of external concerns (no I/O, no CLI, no network).

pub mod command;
pub mod error;
pub mod printer;
pub mod selection;

pub use command::{seconds, Action, CalibrationFlags, CalibrationMask, Command, CommandPlan};
pub use error::{DomainError, DomainResult};
pub use printer::{Fleet, PrinterProfile, DEFAULT_MQTT_PORT};
pub use selection::{Selection, Selector};
