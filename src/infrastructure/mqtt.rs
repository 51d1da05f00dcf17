//! MQTT transport for printers in LAN mode.
//!
//! Uses the synchronous rumqttc client: every session is driven on the
//! calling thread, one printer at a time.

use std::sync::Arc;
use std::time::{Duration, Instant};

use rumqttc::{
    Client, Connection, Event, MqttOptions, Outgoing, Packet, QoS, RecvTimeoutError,
    TlsConfiguration, Transport as MqttTransportKind,
};
use rustls::ClientConfig;
use tracing::{debug, trace};
use uuid::Uuid;

use crate::domain::PrinterProfile;
use crate::infrastructure::tls::printer_client_config;
use crate::infrastructure::traits::{Session, Transport};
use crate::infrastructure::{TransportError, TransportResult};

/// MQTT username printers accept in LAN mode.
pub const PRINTER_USERNAME: &str = "bblp";

/// Keep-alive floor; rumqttc panics on sub-second intervals.
const MIN_KEEP_ALIVE: Duration = Duration::from_secs(5);

const REQUEST_CHANNEL_CAPACITY: usize = 10;

/// Timing of a printer session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Upper bound for connecting, flushing a publish and disconnecting
    pub timeout: Duration,
    /// Settle time after the broker acknowledged the connection
    pub connect_wait: Duration,
    /// Settle time after the last publish, before disconnecting
    pub post_wait: Duration,
    /// MQTT keep-alive interval
    pub keep_alive: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            connect_wait: Duration::from_secs(2),
            post_wait: Duration::from_secs(1),
            keep_alive: Duration::from_secs(30),
        }
    }
}

/// Real transport: MQTT over TLS straight to the printer.
pub struct MqttTransport {
    config: SessionConfig,
    tls: Arc<ClientConfig>,
}

impl MqttTransport {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            tls: printer_client_config(),
        }
    }

    fn options(&self, printer: &PrinterProfile) -> MqttOptions {
        let client_id = format!("bambusy_{}", Uuid::new_v4());
        let mut options = MqttOptions::new(client_id, &printer.host, printer.port);
        options.set_credentials(PRINTER_USERNAME, &printer.access_code);
        options.set_keep_alive(self.config.keep_alive.max(MIN_KEEP_ALIVE));
        options.set_clean_session(true);
        options.set_transport(MqttTransportKind::tls_with_config(
            TlsConfiguration::Rustls(Arc::clone(&self.tls)),
        ));
        options
    }
}

impl Transport for MqttTransport {
    fn open(&self, printer: &PrinterProfile) -> TransportResult<Box<dyn Session>> {
        debug!(
            "connecting: printer={} {}:{}",
            printer.id, printer.host, printer.port
        );
        let (client, connection) = Client::new(self.options(printer), REQUEST_CHANNEL_CAPACITY);
        let mut session = MqttSession {
            client,
            connection,
            host: printer.host.clone(),
            port: printer.port,
            config: self.config,
            closed: false,
        };

        session.wait_for_connack()?;
        session.pause(self.config.connect_wait)?;
        Ok(Box::new(session))
    }
}

/// Session with one printer.
struct MqttSession {
    client: Client,
    connection: Connection,
    host: String,
    port: u16,
    config: SessionConfig,
    closed: bool,
}

impl MqttSession {
    fn connect_error(&self, message: impl Into<String>) -> TransportError {
        TransportError::Connect {
            host: self.host.clone(),
            port: self.port,
            message: message.into(),
        }
    }

    /// Next event from the event loop, `None` when `wait` elapsed first.
    fn next_event(&mut self, wait: Duration) -> TransportResult<Option<Event>> {
        match self.connection.recv_timeout(wait) {
            Ok(Ok(event)) => {
                trace!(?event, "mqtt event");
                Ok(Some(event))
            }
            Ok(Err(e)) => Err(self.connect_error(e.to_string())),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(self.connect_error("event loop stopped")),
        }
    }

    /// Drive the event loop until `done` matches an event or the session timeout expires.
    fn drive_until<F>(&mut self, what: &str, mut done: F) -> TransportResult<()>
    where
        F: FnMut(&Event) -> bool,
    {
        let deadline = Instant::now() + self.config.timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            match self.next_event(remaining)? {
                Some(event) if done(&event) => return Ok(()),
                Some(_) => continue,
                None => break,
            }
        }
        Err(TransportError::Timeout(format!(
            "{} on {}:{} after {:?}",
            what, self.host, self.port, self.config.timeout
        )))
    }

    fn wait_for_connack(&mut self) -> TransportResult<()> {
        self.drive_until("waiting for connection ack", |event| {
            matches!(event, Event::Incoming(Packet::ConnAck(_)))
        })
    }
}

impl Session for MqttSession {
    fn publish(&mut self, topic: &str, payload: &str) -> TransportResult<()> {
        debug!("publish: topic={} payload={}", topic, payload);
        self.client
            .publish(topic, QoS::AtMostOnce, false, payload.as_bytes().to_vec())
            .map_err(|e| TransportError::Publish {
                topic: topic.to_string(),
                message: e.to_string(),
            })?;

        self.drive_until("flushing publish", |event| {
            matches!(event, Event::Outgoing(Outgoing::Publish(_)))
        })
        .map_err(|e| TransportError::Publish {
            topic: topic.to_string(),
            message: e.to_string(),
        })
    }

    fn pause(&mut self, duration: Duration) -> TransportResult<()> {
        let deadline = Instant::now() + duration;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Ok(());
            }
            if self.next_event(remaining)?.is_none() {
                return Ok(());
            }
        }
    }

    fn close(&mut self) -> TransportResult<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        if let Err(e) = self.pause(self.config.post_wait) {
            debug!("connection lost before disconnect: {}", e);
            return Ok(());
        }

        self.client
            .disconnect()
            .map_err(|e| TransportError::Disconnect(e.to_string()))?;

        match self.drive_until("disconnecting", |event| {
            matches!(event, Event::Outgoing(Outgoing::Disconnect))
        }) {
            Ok(()) => Ok(()),
            Err(TransportError::Timeout(message)) => Err(TransportError::Disconnect(message)),
            // broker closing the socket after DISCONNECT is the normal end
            Err(e) => {
                debug!("connection closed while disconnecting: {}", e);
                Ok(())
            }
        }
    }
}
