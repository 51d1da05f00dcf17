//! Canonical form of what the user asked for.
//!
//! Subcommands and the legacy short flags both resolve to an [`Invocation`],
//! so dispatch logic exists once.

use clap_complete::Shell;

use crate::cli::args::{Cli, Commands, LegacyArgs, LegacyCode};
use crate::cli::{CliError, CliResult};
use crate::domain::{Action, CalibrationFlags};

/// Selector token for every printer in the legacy interface.
const LEGACY_ALL: &str = "a";

#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    List,
    Completion(Shell),
    Dispatch {
        /// Selector expression: `all` or comma-separated ids
        selector: String,
        action: Action,
        /// Seconds between commands, when given on the command line
        delay: Option<f64>,
    },
}

impl Invocation {
    pub fn from_cli(cli: &Cli) -> CliResult<Self> {
        match (&cli.command, cli.legacy.is_present()) {
            (Some(_), true) => Err(CliError::Usage(
                "legacy flags (-u/-c/-b/-v) cannot be combined with a subcommand".into(),
            )),
            (Some(command), false) => Ok(Self::from_command(command)),
            (None, true) => Self::from_legacy(&cli.legacy),
            (None, false) => Err(CliError::Usage(
                "no command given, see `bambusy --help`".into(),
            )),
        }
    }

    fn from_command(command: &Commands) -> Self {
        match command {
            Commands::List => Invocation::List,
            Commands::Completion { shell } => Invocation::Completion(*shell),
            Commands::Home { printers } => Invocation::Dispatch {
                selector: printers.clone(),
                action: Action::Home,
                delay: None,
            },
            Commands::Calibrate {
                printers,
                bed_leveling,
                vibration,
                motor_noise,
                home_only,
                calibration_delay,
            } => Invocation::Dispatch {
                selector: printers.clone(),
                action: Action::Calibrate {
                    flags: CalibrationFlags {
                        bed_leveling: *bed_leveling,
                        vibration: *vibration,
                        motor_noise: *motor_noise,
                    },
                    home_only: *home_only,
                },
                delay: *calibration_delay,
            },
        }
    }

    /// `-c a` runs every calibration; `-c h` homes, and calibrates only what -b / -v ask for.
    fn from_legacy(legacy: &LegacyArgs) -> CliResult<Self> {
        let (printers, code) = match (&legacy.legacy_printers, legacy.legacy_code) {
            (Some(printers), Some(code)) => (printers, code),
            _ => {
                return Err(CliError::Usage(
                    "legacy mode needs both -u and -c".into(),
                ))
            }
        };

        let selector = if printers.trim().eq_ignore_ascii_case(LEGACY_ALL) {
            "all".to_string()
        } else {
            printers.clone()
        };

        let action = match code {
            LegacyCode::All => Action::Calibrate {
                flags: CalibrationFlags::default(),
                home_only: false,
            },
            LegacyCode::Home if legacy.legacy_bed || legacy.legacy_vibration => {
                Action::Calibrate {
                    flags: CalibrationFlags {
                        bed_leveling: legacy.legacy_bed,
                        vibration: legacy.legacy_vibration,
                        motor_noise: false,
                    },
                    home_only: false,
                }
            }
            LegacyCode::Home => Action::Home,
        };

        Ok(Invocation::Dispatch {
            selector,
            action,
            delay: None,
        })
    }
}
