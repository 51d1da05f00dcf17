//! Infrastructure layer: I/O implementations, printer transport and DI container
//!
//! This layer implements I/O boundary traits and wires up services.

pub mod di;
pub mod error;
pub mod mqtt;
pub mod tls;
pub mod traits;

pub use error::{TransportError, TransportResult};
