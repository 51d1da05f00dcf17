//! bambusy: send HOME and CALIBRATION commands to a fleet of Bambu Lab printers over LAN.
//!
//! Layers, innermost first:
//! - [`domain`]: printer profiles, selection and command payloads (no I/O)
//! - [`application`]: inventory loading and dispatch over I/O traits
//! - [`infrastructure`]: filesystem, MQTT transport and service wiring
//! - [`cli`]: argument parsing, command execution and terminal output

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
