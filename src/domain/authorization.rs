//! Authorization gate
//!
//! Capabilities are derived from the principal's role only. Every mutating or
//! sensitive-read operation checks its capability here before touching storage.

use super::{DomainError, Principal, Role};

/// What an operation requires of the acting principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Any logged-in principal
    Authenticated,
    /// Manager or staff
    Privileged,
    /// Manager only
    ManageStaff,
}

/// True iff the role is manager or staff.
pub fn is_privileged(principal: &Principal) -> bool {
    matches!(principal.role, Role::Manager | Role::Staff)
}

/// True iff the role is exactly manager.
pub fn can_manage_staff(principal: &Principal) -> bool {
    principal.role == Role::Manager
}

/// Fails closed when no principal accompanies the request.
pub fn authenticated(principal: Option<&Principal>) -> Result<&Principal, DomainError> {
    principal.ok_or(DomainError::Unauthenticated)
}

/// Check a capability, rejecting with `Forbidden` on failure.
pub fn require(principal: &Principal, capability: Capability) -> Result<(), DomainError> {
    let allowed = match capability {
        Capability::Authenticated => true,
        Capability::Privileged => is_privileged(principal),
        Capability::ManageStaff => can_manage_staff(principal),
    };

    if allowed {
        Ok(())
    } else {
        tracing::warn!(
            "Denied {:?} to user {} ({})",
            capability,
            principal.user_id,
            principal.role
        );
        Err(DomainError::forbidden(match capability {
            Capability::ManageStaff => "Only managers can perform this action.",
            _ => "Only staff and managers can perform this action.",
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StaffRole;

    #[test]
    fn capability_matrix() {
        let manager = Principal::staff(1, "Ada", StaffRole::Manager, 1);
        let staff = Principal::staff(2, "Bob", StaffRole::Staff, 2);
        let member = Principal::member(3, "Cy", 7);

        assert!(is_privileged(&manager) && can_manage_staff(&manager));
        assert!(is_privileged(&staff) && !can_manage_staff(&staff));
        assert!(!is_privileged(&member) && !can_manage_staff(&member));

        assert!(require(&staff, Capability::Privileged).is_ok());
        assert!(matches!(
            require(&staff, Capability::ManageStaff),
            Err(DomainError::Forbidden(_))
        ));
        assert!(require(&member, Capability::Authenticated).is_ok());
        assert!(matches!(
            require(&member, Capability::Privileged),
            Err(DomainError::Forbidden(_))
        ));
    }

    #[test]
    fn missing_principal_fails_closed() {
        assert_eq!(authenticated(None), Err(DomainError::Unauthenticated));
    }
}
