//! Application services

pub mod dispatch;
pub mod inventory;

pub use dispatch::{
    DispatchEvent, DispatchMode, DispatchService, OutcomeStatus, PrinterOutcome, RunReport,
};
pub use inventory::InventoryService;
