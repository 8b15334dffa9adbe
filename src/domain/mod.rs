//! Domain layer - Pure business abstractions
//!
//! No HTTP types here. Only trait definitions, the session principal, the
//! authorization gate and domain error types.

pub mod answer;
pub mod authorization;
pub mod errors;
pub mod principal;
pub mod repositories;

pub use answer::YesNo;
pub use authorization::Capability;
pub use errors::DomainError;
pub use principal::{Principal, Role, StaffRole};
pub use repositories::*;
