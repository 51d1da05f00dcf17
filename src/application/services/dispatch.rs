//! Dispatch service
//!
//! Sends a command plan to each selected printer, strictly one printer at a time.
//! A transport failure is recorded against its printer and the run moves on.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::domain::{Command, CommandPlan, PrinterProfile, Selection};
use crate::infrastructure::traits::{Session, Transport};
use crate::infrastructure::TransportError;

/// Whether payloads are transmitted or only rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    Live,
    DryRun,
}

/// Progress notifications emitted while a run is in flight.
#[derive(Debug)]
pub enum DispatchEvent<'a> {
    /// Work on a printer begins
    PrinterStarted { printer: &'a PrinterProfile },
    /// Dry-run: payload that would be published
    Planned {
        printer: &'a PrinterProfile,
        command: Command,
        topic: String,
        payload: String,
    },
    /// Waiting between two consecutive commands
    Waiting {
        printer: &'a PrinterProfile,
        delay: Duration,
    },
    /// Payload published
    Published {
        printer: &'a PrinterProfile,
        command: Command,
    },
    /// Work on a printer is done
    PrinterFinished {
        printer: &'a PrinterProfile,
        status: &'a OutcomeStatus,
    },
}

/// Result for one printer.
#[derive(Debug)]
pub enum OutcomeStatus {
    Sent,
    DryRun,
    Failed(TransportError),
}

impl OutcomeStatus {
    pub fn is_failure(&self) -> bool {
        matches!(self, OutcomeStatus::Failed(_))
    }
}

#[derive(Debug)]
pub struct PrinterOutcome {
    pub id: u32,
    pub name: String,
    pub status: OutcomeStatus,
}

/// Per-printer outcomes of one invocation, in dispatch order.
#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<PrinterOutcome>,
}

impl RunReport {
    pub fn failures(&self) -> impl Iterator<Item = &PrinterOutcome> {
        self.outcomes.iter().filter(|o| o.status.is_failure())
    }

    pub fn failed_count(&self) -> usize {
        self.failures().count()
    }

    pub fn is_success(&self) -> bool {
        self.failed_count() == 0
    }
}

/// Service for sending command plans to printers.
pub struct DispatchService {
    transport: Arc<dyn Transport>,
}

impl DispatchService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Run the plan against every printer in the selection, in order.
    ///
    /// Dry-run never touches the transport.
    pub fn run<F>(
        &self,
        selection: &Selection<'_>,
        plan: &CommandPlan,
        mode: DispatchMode,
        mut on_event: F,
    ) -> RunReport
    where
        F: FnMut(DispatchEvent<'_>),
    {
        info!(
            "dispatch: {} printer(s), {} command(s), mode={:?}",
            selection.len(),
            plan.commands.len(),
            mode
        );
        let mut outcomes = Vec::with_capacity(selection.len());

        for &printer in selection.printers() {
            on_event(DispatchEvent::PrinterStarted { printer });

            let status = match mode {
                DispatchMode::DryRun => {
                    Self::render(printer, plan, &mut on_event);
                    OutcomeStatus::DryRun
                }
                DispatchMode::Live => match self.send(printer, plan, &mut on_event) {
                    Ok(()) => OutcomeStatus::Sent,
                    Err(e) => {
                        warn!("printer {} failed: {}", printer.id, e);
                        OutcomeStatus::Failed(e)
                    }
                },
            };

            on_event(DispatchEvent::PrinterFinished {
                printer,
                status: &status,
            });
            outcomes.push(PrinterOutcome {
                id: printer.id,
                name: printer.name.clone(),
                status,
            });
        }

        RunReport { outcomes }
    }

    fn render<F>(printer: &PrinterProfile, plan: &CommandPlan, on_event: &mut F)
    where
        F: FnMut(DispatchEvent<'_>),
    {
        let topic = printer.request_topic();
        for (i, command) in plan.commands.iter().enumerate() {
            if i > 0 {
                on_event(DispatchEvent::Waiting {
                    printer,
                    delay: plan.delay,
                });
            }
            on_event(DispatchEvent::Planned {
                printer,
                command: *command,
                topic: topic.clone(),
                payload: command.payload().to_string(),
            });
        }
    }

    fn send<F>(
        &self,
        printer: &PrinterProfile,
        plan: &CommandPlan,
        on_event: &mut F,
    ) -> Result<(), TransportError>
    where
        F: FnMut(DispatchEvent<'_>),
    {
        let mut session = self.transport.open(printer)?;
        debug!("session open: printer={} host={}", printer.id, printer.host);

        match Self::publish_all(session.as_mut(), printer, plan, on_event) {
            Ok(()) => session.close(),
            Err(e) => {
                if let Err(close_err) = session.close() {
                    debug!("close after failure: printer={} {}", printer.id, close_err);
                }
                Err(e)
            }
        }
    }

    fn publish_all<F>(
        session: &mut dyn Session,
        printer: &PrinterProfile,
        plan: &CommandPlan,
        on_event: &mut F,
    ) -> Result<(), TransportError>
    where
        F: FnMut(DispatchEvent<'_>),
    {
        let topic = printer.request_topic();
        for (i, command) in plan.commands.iter().enumerate() {
            if i > 0 {
                on_event(DispatchEvent::Waiting {
                    printer,
                    delay: plan.delay,
                });
                session.pause(plan.delay)?;
            }
            session.publish(&topic, &command.payload().to_string())?;
            on_event(DispatchEvent::Published {
                printer,
                command: *command,
            });
        }
        Ok(())
    }
}
