//! Identity Service - resolves a claimed (user id, name, role) triple
//!
//! There is no secret credential: a login is an exact match on user id and
//! name plus a self-declared role checked against the stored record.

use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter, QuerySelect,
    RelationTrait,
};
use serde::Deserialize;

use crate::domain::{DomainError, Principal, Role, StaffRole};
use crate::models::{member, staff, user};

/// Raw login form as received at the boundary.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub user_id: i32,
    pub name: String,
    pub role: String,
}

/// Validate the login form, then resolve it against the stored records.
pub async fn login(db: &DatabaseConnection, request: LoginRequest) -> Result<Principal, DomainError> {
    let name = request.name.trim();
    let role = request.role.parse::<Role>();

    let role = match role {
        Ok(role) if request.user_id > 0 && !name.is_empty() => role,
        _ => {
            return Err(DomainError::validation(
                "Please provide a valid user ID, name, and role.",
            ));
        }
    };

    resolve(db, request.user_id, name, role).await
}

/// Look up the principal for an already validated triple.
pub async fn resolve(
    db: &DatabaseConnection,
    user_id: i32,
    name: &str,
    claimed: Role,
) -> Result<Principal, DomainError> {
    let principal = match claimed {
        Role::Member => resolve_member(db, user_id, name).await?,
        Role::Manager | Role::Staff => resolve_staff(db, user_id, name, claimed).await?,
    };

    tracing::info!(
        "User {} signed in as {} (claimed {})",
        principal.user_id,
        principal.role,
        claimed
    );

    Ok(principal)
}

async fn resolve_member(
    db: &DatabaseConnection,
    user_id: i32,
    name: &str,
) -> Result<Principal, DomainError> {
    let found = member::Entity::find()
        .join(JoinType::InnerJoin, member::Relation::User.def())
        .filter(user::Column::Id.eq(user_id))
        .filter(user::Column::Name.eq(name))
        .one(db)
        .await?;

    match found {
        Some(member) => Ok(Principal::member(user_id, name, member.id)),
        None => {
            tracing::warn!("Member login failed for user {}", user_id);
            Err(DomainError::NotFound(
                "Member not found. Please verify your details.".to_string(),
            ))
        }
    }
}

async fn resolve_staff(
    db: &DatabaseConnection,
    user_id: i32,
    name: &str,
    claimed: Role,
) -> Result<Principal, DomainError> {
    let found = staff::Entity::find()
        .join(JoinType::InnerJoin, staff::Relation::User.def())
        .filter(user::Column::Id.eq(user_id))
        .filter(user::Column::Name.eq(name))
        .one(db)
        .await?;

    let Some(staff) = found else {
        tracing::warn!("Staff login failed for user {}", user_id);
        return Err(DomainError::NotFound(
            "Staff record not found. Please verify your details.".to_string(),
        ));
    };

    let stored = StaffRole::from_stored(&staff.role);

    // A manager may sign in under either staff role and keeps manager rights.
    if claimed == Role::Manager && stored != StaffRole::Manager {
        tracing::warn!("User {} claimed manager without the stored role", user_id);
        return Err(DomainError::InsufficientPrivilege(
            "You do not have manager privileges.".to_string(),
        ));
    }

    Ok(Principal::staff(user_id, name, stored, staff.id))
}
