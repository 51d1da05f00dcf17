use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, info, instrument};

use crate::application::services::{DispatchEvent, DispatchMode, OutcomeStatus, RunReport};
use crate::cli::args::Cli;
use crate::cli::output;
use crate::cli::{CliError, CliResult, Invocation};
use crate::config::Settings;
use crate::domain::{seconds, Action, CommandPlan, Fleet, Selector};
use crate::infrastructure::di::ServiceContainer;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let invocation = Invocation::from_cli(cli)?;
    debug!("invocation: {:?}", invocation);

    if let Invocation::Completion(shell) = invocation {
        print_completions(shell);
        return Ok(());
    }

    let settings = load_settings(cli)?;
    let container = ServiceContainer::new(settings)?;

    match invocation {
        Invocation::List => _list(&container),
        Invocation::Dispatch {
            selector,
            action,
            delay,
        } => {
            let mode = if cli.dry_run {
                DispatchMode::DryRun
            } else {
                DispatchMode::Live
            };
            _dispatch(&container, &selector, &action, delay, mode)
        }
        Invocation::Completion(_) => Ok(()),
    }
}

fn print_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

/// Settings from file and environment, with command line flags on top.
///
/// A bad value in a flag is a usage error; file and environment values
/// were already checked as config by `Settings::load`.
fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load()?;
    if let Some(path) = &cli.config {
        settings.printers_file = path.clone();
    }
    if let Some(secs) = cli.connect_wait {
        seconds(secs)?;
        settings.connect_wait = secs;
    }
    if let Some(secs) = cli.post_wait {
        seconds(secs)?;
        settings.post_wait = secs;
    }
    Ok(settings)
}

/// One line per printer, in config file order.
pub fn list_lines(fleet: &Fleet) -> Vec<String> {
    fleet
        .iter()
        .map(|p| {
            format!(
                "{}: {} ({}:{}, serial: {})",
                p.id, p.name, p.host, p.port, p.serial
            )
        })
        .collect()
}

#[instrument(skip(container))]
fn _list(container: &ServiceContainer) -> CliResult<()> {
    let path = &container.settings.printers_file;
    let fleet = container.inventory().load(path)?;

    if fleet.is_empty() {
        output::warning("No printers in config.");
        return Err(CliError::NoPrinters(path.clone()));
    }

    output::header("Configured printers:");
    for line in list_lines(&fleet) {
        output::detail(&line);
    }
    Ok(())
}

#[instrument(skip(container))]
fn _dispatch(
    container: &ServiceContainer,
    selector: &str,
    action: &Action,
    delay: Option<f64>,
    mode: DispatchMode,
) -> CliResult<()> {
    let fleet = container
        .inventory()
        .load(&container.settings.printers_file)?;
    let selection = Selector::parse(selector)?.resolve(&fleet)?;
    let plan = CommandPlan::build(
        action,
        delay.unwrap_or(container.settings.calibration_delay),
    )?;
    info!("targets: {:?}", selection.ids());

    let report = container
        .dispatcher()
        .run(&selection, &plan, mode, |event| render_event(&event));

    print_summary(&report, mode);
    if report.is_success() {
        Ok(())
    } else {
        Err(CliError::PartialFailure {
            failed: report.failed_count(),
            total: report.outcomes.len(),
        })
    }
}

fn render_event(event: &DispatchEvent<'_>) {
    match event {
        DispatchEvent::PrinterStarted { printer } => output::header(printer),
        DispatchEvent::Planned {
            command,
            topic,
            payload,
            ..
        } => {
            output::detail(&format!("{} -> {}", command, topic));
            output::info(payload);
        }
        DispatchEvent::Waiting { delay, .. } => {
            output::detail(&format!("wait {}s", delay.as_secs_f64()))
        }
        DispatchEvent::Published { command, .. } => output::success_detail(command),
        DispatchEvent::PrinterFinished { printer, status } => match status {
            OutcomeStatus::Sent => output::success(&format!("{} OK", printer)),
            OutcomeStatus::DryRun => {}
            OutcomeStatus::Failed(e) => output::failure(&format!("{} FAILED: {}", printer, e)),
        },
    }
}

fn print_summary(report: &RunReport, mode: DispatchMode) {
    let total = report.outcomes.len();
    match mode {
        DispatchMode::DryRun => output::info(&format!("dry run: {} printer(s), nothing sent", total)),
        DispatchMode::Live => {
            let failed = report.failed_count();
            output::info(&format!("{} sent, {} failed", total - failed, failed));
            for outcome in report.failures() {
                if let OutcomeStatus::Failed(e) = &outcome.status {
                    output::detail(&format!("[{}] {}: {}", outcome.id, outcome.name, e));
                }
            }
        }
    }
}
