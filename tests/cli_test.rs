//! Tests for the command line surface: modern and legacy forms, exit codes

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use rstest::rstest;
use tempfile::TempDir;

use bambusy::application::ApplicationError;
use bambusy::application::services::InventoryService;
use bambusy::cli::commands::{execute_command, list_lines};
use bambusy::cli::{Cli, CliError, Invocation};
use bambusy::domain::{Action, CalibrationFlags, DomainError};
use bambusy::exitcode;
use bambusy::infrastructure::traits::RealFileSystem;

fn parse(args: &[&str]) -> Cli {
    let mut argv = vec!["bambusy"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).expect("valid arguments")
}

fn invocation(args: &[&str]) -> Invocation {
    Invocation::from_cli(&parse(args)).expect("valid invocation")
}

fn calibrate(bed_leveling: bool, vibration: bool, motor_noise: bool) -> Action {
    Action::Calibrate {
        flags: CalibrationFlags {
            bed_leveling,
            vibration,
            motor_noise,
        },
        home_only: false,
    }
}

fn dispatch(selector: &str, action: Action) -> Invocation {
    Invocation::Dispatch {
        selector: selector.to_string(),
        action,
        delay: None,
    }
}

#[test]
fn given_calibrate_subcommand_when_resolving_then_flags_are_carried() {
    let got = invocation(&[
        "calibrate",
        "--printers",
        "1,2,3",
        "--bed-leveling",
        "--vibration",
        "--calibration-delay",
        "1.5",
    ]);

    assert_eq!(
        got,
        Invocation::Dispatch {
            selector: "1,2,3".into(),
            action: calibrate(true, true, false),
            delay: Some(1.5),
        }
    );
}

#[test]
fn given_home_subcommand_with_globals_after_it_when_parsing_then_accepted() {
    let cli = parse(&["home", "--printers", "all", "--dry-run", "--config", "f.json"]);

    assert!(cli.dry_run);
    assert_eq!(cli.config, Some(PathBuf::from("f.json")));
    assert_eq!(
        Invocation::from_cli(&cli).unwrap(),
        dispatch("all", Action::Home)
    );
}

#[rstest]
#[case(&["-u", "a", "-c", "a"], dispatch("all", calibrate(false, false, false)))]
#[case(&["-u", "a", "-c", "a", "-b"], dispatch("all", calibrate(false, false, false)))]
#[case(&["-u", "1,2", "-c", "h"], dispatch("1,2", Action::Home))]
#[case(&["-u", "3", "-c", "h", "-b"], dispatch("3", calibrate(true, false, false)))]
#[case(&["-u", "3", "-c", "h", "-v"], dispatch("3", calibrate(false, true, false)))]
#[case(&["-u", "3", "-c", "h", "-b", "-v"], dispatch("3", calibrate(true, true, false)))]
fn given_legacy_flags_when_resolving_then_maps_onto_same_actions(
    #[case] args: &[&str],
    #[case] expected: Invocation,
) {
    assert_eq!(invocation(args), expected);
}

#[test]
fn given_legacy_all_calibration_then_same_plan_as_bare_calibrate() {
    let legacy = invocation(&["-u", "a", "-c", "a"]);
    let modern = invocation(&["calibrate", "--printers", "all"]);

    assert_eq!(legacy, modern);
}

#[rstest]
#[case(&["-u", "1"])]
#[case(&["-c", "a"])]
#[case(&["-b"])]
#[case(&["-u", "1", "-c", "x"])]
#[case(&["calibrate", "--printers", "1", "--home-only", "--vibration"])]
#[case(&["home"])]
fn given_invalid_combination_when_parsing_then_clap_rejects(#[case] args: &[&str]) {
    let mut argv = vec!["bambusy"];
    argv.extend_from_slice(args);

    assert!(Cli::try_parse_from(argv).is_err());
}

#[test]
fn given_legacy_flags_with_subcommand_when_resolving_then_usage_error() {
    let err = Invocation::from_cli(&parse(&["-u", "a", "-c", "a", "list"])).unwrap_err();

    assert!(matches!(err, CliError::Usage(_)));
    assert_eq!(err.exit_code(), exitcode::USAGE);
}

#[test]
fn given_nothing_when_resolving_then_usage_error() {
    let err = Invocation::from_cli(&parse(&[])).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::USAGE);
}

#[rstest]
#[case(CliError::from(DomainError::UnknownPrinters(vec![9])), exitcode::DATAERR)]
#[case(CliError::from(DomainError::EmptySelection), exitcode::DATAERR)]
#[case(CliError::from(DomainError::DuplicatePrinterId(1)), exitcode::CONFIG)]
#[case(CliError::from(DomainError::InvalidDelay(-1.0)), exitcode::USAGE)]
#[case(CliError::from(ApplicationError::config("bad")), exitcode::CONFIG)]
#[case(CliError::PartialFailure { failed: 1, total: 3 }, exitcode::UNAVAILABLE)]
#[case(CliError::NoPrinters(PathBuf::from("p.json")), exitcode::NOINPUT)]
fn given_error_then_exit_code_follows_sysexits(#[case] err: CliError, #[case] code: i32) {
    assert_eq!(err.exit_code(), code);
}

// ============================================================
// execute_command end to end (dry-run and list only, no network)
// ============================================================

fn write_fleet(dir: &TempDir) -> String {
    let path = dir.path().join("printers.json");
    std::fs::write(
        &path,
        r#"{"printers": [
            {"id": 1, "name": "left", "host": "10.0.0.1", "serial": "S1", "access_code": "a"},
            {"id": 2, "name": "right", "host": "10.0.0.2", "serial": "S2", "access_code": "b"}
        ]}"#,
    )
    .unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn given_dry_run_when_executing_calibrate_then_succeeds_without_network() {
    let dir = TempDir::new().unwrap();
    let config = write_fleet(&dir);

    let cli = parse(&[
        "--config",
        &config,
        "--dry-run",
        "calibrate",
        "--printers",
        "2,1",
        "--motor-noise",
    ]);

    assert!(execute_command(&cli).is_ok());
}

#[test]
fn given_unknown_printer_when_executing_then_selection_exit_code() {
    let dir = TempDir::new().unwrap();
    let config = write_fleet(&dir);

    let cli = parse(&["--config", &config, "--dry-run", "home", "--printers", "1,99"]);
    let err = execute_command(&cli).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::DATAERR);
}

#[test]
fn given_missing_config_when_executing_then_config_exit_code() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.json");

    let cli = parse(&["--config", &missing.to_string_lossy(), "list"]);
    let err = execute_command(&cli).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::CONFIG);
}

#[test]
fn given_config_when_listing_then_succeeds() {
    let dir = TempDir::new().unwrap();
    let config = write_fleet(&dir);

    let cli = parse(&["--config", &config, "list"]);

    assert!(execute_command(&cli).is_ok());
}

#[test]
fn given_fleet_when_listing_then_one_line_per_printer_in_file_order() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let config = write_fleet(&dir);
    let fleet = InventoryService::new(Arc::new(RealFileSystem))
        .load(Path::new(&config))
        .unwrap();

    // Act
    let lines = list_lines(&fleet);

    // Assert
    assert_eq!(
        lines,
        vec![
            "1: left (10.0.0.1:8883, serial: S1)".to_string(),
            "2: right (10.0.0.2:8883, serial: S2)".to_string(),
        ]
    );
}

#[test]
fn given_negative_connect_wait_flag_when_executing_then_usage_exit_code() {
    let dir = TempDir::new().unwrap();
    let config = write_fleet(&dir);

    let cli = parse(&["--config", &config, "--connect-wait=-1", "list"]);
    let err = execute_command(&cli).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::USAGE);
}

#[test]
fn given_empty_config_when_listing_then_no_input_exit_code() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("printers.json");
    std::fs::write(&path, r#"{"printers": []}"#).unwrap();

    let cli = parse(&["--config", &path.to_string_lossy(), "list"]);
    let err = execute_command(&cli).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::NOINPUT);
}

#[test]
fn given_negative_delay_when_executing_then_usage_exit_code() {
    let dir = TempDir::new().unwrap();
    let config = write_fleet(&dir);

    let cli = parse(&[
        "--config",
        &config,
        "--dry-run",
        "calibrate",
        "--printers",
        "1",
        "--calibration-delay=-2",
    ]);
    let err = execute_command(&cli).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::USAGE);
}
