//! Services Layer
//!
//! Business logic for each back-office component, free of HTTP concerns.
//! Every function takes the acting principal explicitly; `commands` routes a
//! typed command to the right one.

pub mod commands;
pub mod fines_service;
pub mod identity_service;
pub mod inventory_service;
pub mod registrar_service;
pub mod report_service;

// Re-export for convenience
pub use commands::{Command, Outcome, execute};
