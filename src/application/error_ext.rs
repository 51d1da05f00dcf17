//! Error conversion helpers for config file handling
//!
//! Provides an extension trait for attaching path context to read/parse failures.

use std::fmt::Display;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for turning I/O and parse failures into config errors.
pub trait ConfigResultExt<T> {
    /// Add action and path context, classifying the failure as a config error.
    ///
    /// # Example
    /// ```ignore
    /// fs.read_to_string(&path)
    ///     .config_context("read", &path)?;
    /// ```
    fn config_context(self, action: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T, E: Display> ConfigResultExt<T> for Result<T, E> {
    fn config_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::Config {
            message: format!("{} {}: {}", action, path.display(), e),
        })
    }
}
