//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{DispatchService, InventoryService};
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::infrastructure::mqtt::MqttTransport;
use crate::infrastructure::traits::{FileSystem, RealFileSystem, Transport};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Printer transport abstraction
    pub transport: Arc<dyn Transport>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> ApplicationResult<Self> {
        let transport = MqttTransport::new(settings.session_config()?);
        Ok(Self::with_deps(
            settings,
            Arc::new(RealFileSystem),
            Arc::new(transport),
        ))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let settings = Arc::new(settings);

        Self {
            settings,
            fs,
            transport,
        }
    }

    pub fn inventory(&self) -> InventoryService {
        InventoryService::new(Arc::clone(&self.fs))
    }

    pub fn dispatcher(&self) -> DispatchService {
        DispatchService::new(Arc::clone(&self.transport))
    }
}
