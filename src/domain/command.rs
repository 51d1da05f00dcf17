//! Printer commands, calibration masks and the per-printer command plan

use std::fmt;
use std::time::Duration;

use serde_json::json;

use crate::domain::{DomainError, DomainResult};

/// Bitmask selecting calibration routines, as understood by the printer firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalibrationMask(u8);

impl CalibrationMask {
    pub const BED_LEVELING: CalibrationMask = CalibrationMask(1 << 1);
    pub const VIBRATION: CalibrationMask = CalibrationMask(1 << 2);
    pub const MOTOR_NOISE: CalibrationMask = CalibrationMask(1 << 3);
    pub const ALL: CalibrationMask = CalibrationMask(
        Self::BED_LEVELING.0 | Self::VIBRATION.0 | Self::MOTOR_NOISE.0,
    );

    pub fn bits(self) -> u8 {
        self.0
    }
}

impl std::ops::BitOr for CalibrationMask {
    type Output = CalibrationMask;

    fn bitor(self, rhs: Self) -> Self::Output {
        CalibrationMask(self.0 | rhs.0)
    }
}

impl fmt::Display for CalibrationMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Calibration routines requested on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CalibrationFlags {
    pub bed_leveling: bool,
    pub vibration: bool,
    pub motor_noise: bool,
}

impl CalibrationFlags {
    /// Combined mask. No flags at all means every routine (legacy `-c a`).
    pub fn mask(&self) -> CalibrationMask {
        let selected = [
            (self.bed_leveling, CalibrationMask::BED_LEVELING),
            (self.vibration, CalibrationMask::VIBRATION),
            (self.motor_noise, CalibrationMask::MOTOR_NOISE),
        ]
        .into_iter()
        .filter(|(set, _)| *set)
        .map(|(_, mask)| mask)
        .reduce(|acc, mask| acc | mask);

        selected.unwrap_or(CalibrationMask::ALL)
    }
}

/// A single payload sent to a printer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Home,
    Calibrate(CalibrationMask),
}

impl Command {
    /// JSON payload as published on the request topic.
    pub fn payload(&self) -> serde_json::Value {
        match self {
            Command::Home => json!({
                "print": {
                    "command": "home",
                    "sequence_id": "1"
                }
            }),
            Command::Calibrate(mask) => json!({
                "print": {
                    "command": "calibration",
                    "sequence_id": "2",
                    "option": mask.bits()
                }
            }),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Home => write!(f, "HOME"),
            Command::Calibrate(mask) => write!(f, "CALIBRATION option={}", mask),
        }
    }
}

/// Top-level action requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Home,
    Calibrate {
        flags: CalibrationFlags,
        /// Send HOME only and skip the calibration payload
        home_only: bool,
    },
}

/// Commands sent to every selected printer, with the wait between consecutive ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPlan {
    pub commands: Vec<Command>,
    pub delay: Duration,
}

impl CommandPlan {
    /// Build the plan for an action.
    ///
    /// `calibrate` always homes first; the calibration mask follows
    /// [`CalibrationFlags::mask`].
    pub fn build(action: &Action, delay_secs: f64) -> DomainResult<Self> {
        let delay = seconds(delay_secs)?;
        let commands = match action {
            Action::Home => vec![Command::Home],
            Action::Calibrate {
                home_only: true, ..
            } => vec![Command::Home],
            Action::Calibrate { flags, .. } => {
                vec![Command::Home, Command::Calibrate(flags.mask())]
            }
        };
        Ok(Self { commands, delay })
    }
}

/// Convert a user-supplied number of seconds into a `Duration`.
///
/// Negative, NaN and infinite values are rejected.
pub fn seconds(secs: f64) -> DomainResult<Duration> {
    Duration::try_from_secs_f64(secs).map_err(|_| DomainError::InvalidDelay(secs))
}
