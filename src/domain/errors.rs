//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.
//! Every service classifies its failures into one of these before returning;
//! the HTTP layer only maps them to status codes.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Malformed or missing input; always user-correctable
    Validation(String),
    /// No principal was supplied with the request
    Unauthenticated,
    /// Role or ownership check failed
    Forbidden(String),
    /// Login claimed a role above the stored one
    InsufficientPrivilege(String),
    /// Referenced entity is absent
    NotFound(String),
    /// Current state prevents the requested mutation
    Conflict(String),
    /// Storage call failed or a transaction was rolled back
    Persistence(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        DomainError::Forbidden(msg.into())
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::Validation(msg) => write!(f, "Validation error: {}", msg),
            DomainError::Unauthenticated => write!(f, "Authentication required"),
            DomainError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            DomainError::InsufficientPrivilege(msg) => write!(f, "Insufficient privilege: {}", msg),
            DomainError::NotFound(msg) => write!(f, "Not found: {}", msg),
            DomainError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            DomainError::Persistence(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

// Conversion from SeaORM errors (used in infrastructure layer)
impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Persistence(e.to_string())
    }
}
