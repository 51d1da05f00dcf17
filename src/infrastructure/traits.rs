//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing services
//! to be tested with fake implementations.

use std::io;
use std::path::Path;
use std::time::Duration;

use crate::domain::PrinterProfile;
use crate::infrastructure::TransportResult;

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Opens command sessions to printers.
pub trait Transport: Send + Sync {
    /// Establish an authenticated session with the printer.
    fn open(&self, printer: &PrinterProfile) -> TransportResult<Box<dyn Session>>;
}

/// An open session with one printer.
pub trait Session {
    /// Publish one payload to a topic.
    fn publish(&mut self, topic: &str, payload: &str) -> TransportResult<()>;

    /// Wait between two commands, keeping the session alive.
    fn pause(&mut self, duration: Duration) -> TransportResult<()> {
        std::thread::sleep(duration);
        Ok(())
    }

    /// Flush outstanding work and disconnect.
    fn close(&mut self) -> TransportResult<()>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
