//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum, ValueHint};

/// Control many Bambu Lab printers over LAN: home and calibrate one, several or all
#[derive(Parser, Debug)]
#[command(name = "bambusy")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Printers config file (default: printers.json)
    #[arg(long, global = true, env = "BAMBUSY_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Print what would be sent, but do not connect or send
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Seconds to wait after the MQTT session starts (default: 2.0)
    #[arg(long, global = true, value_name = "SECONDS")]
    pub connect_wait: Option<f64>,

    /// Seconds to wait after sending commands (default: 1.0)
    #[arg(long, global = true, value_name = "SECONDS")]
    pub post_wait: Option<f64>,

    #[command(flatten)]
    pub legacy: LegacyArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List printers from config
    List,

    /// Send HOME command
    Home {
        /// Printer ids, e.g. 1,2,3 or `all`
        #[arg(long, value_name = "IDS|all")]
        printers: String,
    },

    /// Send HOME followed by a CALIBRATION command
    Calibrate {
        /// Printer ids, e.g. 1,2,3 or `all`
        #[arg(long, value_name = "IDS|all")]
        printers: String,
        /// Enable bed leveling
        #[arg(long)]
        bed_leveling: bool,
        /// Enable vibration compensation
        #[arg(long)]
        vibration: bool,
        /// Enable motor noise cancellation
        #[arg(long)]
        motor_noise: bool,
        /// Only send HOME, skip the calibration command
        #[arg(long, conflicts_with_all = ["bed_leveling", "vibration", "motor_noise"])]
        home_only: bool,
        /// Seconds between HOME and CALIBRATION (default: 3.0)
        #[arg(long, value_name = "SECONDS")]
        calibration_delay: Option<f64>,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Short flags of the legacy single-letter interface.
///
/// Not combinable with subcommands.
#[derive(Args, Debug, Default)]
pub struct LegacyArgs {
    /// Legacy: printers to target, `a` for all or ids like 1,2,3
    #[arg(short = 'u', value_name = "a|IDS", requires = "legacy_code")]
    pub legacy_printers: Option<String>,

    /// Legacy: `a` home + all calibrations, `h` home (combine with -b / -v)
    #[arg(short = 'c', value_enum, value_name = "a|h", requires = "legacy_printers")]
    pub legacy_code: Option<LegacyCode>,

    /// Legacy: with `-c h`, add bed leveling
    #[arg(short = 'b', requires = "legacy_code")]
    pub legacy_bed: bool,

    /// Legacy: with `-c h`, add vibration compensation
    #[arg(short = 'v', requires = "legacy_code")]
    pub legacy_vibration: bool,
}

impl LegacyArgs {
    pub fn is_present(&self) -> bool {
        self.legacy_printers.is_some()
            || self.legacy_code.is_some()
            || self.legacy_bed
            || self.legacy_vibration
    }
}

/// Legacy `-c` codes.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyCode {
    /// Home, then run every calibration
    #[value(name = "a")]
    All,
    /// Home (calibrate too when -b / -v are given)
    #[value(name = "h")]
    Home,
}
