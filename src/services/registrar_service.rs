//! Registrar Service - linked user+member / user+staff creation
//!
//! Both registrations insert the user row, capture its id and insert the
//! extension row inside one transaction. Any failure rolls both back.

use chrono::{Local, NaiveDate};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DatabaseTransaction, DbErr, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};

use crate::domain::authorization::{self, Capability};
use crate::domain::{DomainError, Principal};
use crate::models::{member, staff, user};
use crate::utils::form::blank_as_none;

#[derive(Debug, Clone, Deserialize)]
pub struct NewMember {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    /// YYYY-MM-DD, today when absent
    #[serde(default, deserialize_with = "blank_as_none")]
    pub join_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewStaff {
    pub name: String,
    pub email: String,
    /// Free text; the UI offers "Manager" and "Staff"
    pub role: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub hire_date: Option<String>,
}

/// Ids generated by a successful registration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registration {
    pub user_id: i32,
    pub record_id: i32,
    pub message: String,
}

/// Parse an optional YYYY-MM-DD date, defaulting to today.
fn date_or_today(raw: Option<&str>, field: &str) -> Result<String, DomainError> {
    let date = match raw {
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
            DomainError::validation(format!("{} must be a date in YYYY-MM-DD format.", field))
        })?,
        None => Local::now().date_naive(),
    };
    Ok(date.format("%Y-%m-%d").to_string())
}

fn all_filled(fields: &[&str]) -> bool {
    fields.iter().all(|f| !f.trim().is_empty())
}

pub async fn add_member(
    db: &DatabaseConnection,
    principal: &Principal,
    input: NewMember,
) -> Result<Registration, DomainError> {
    authorization::require(principal, Capability::Privileged)?;

    if !all_filled(&[&input.name, &input.email, &input.phone, &input.address]) {
        return Err(DomainError::validation("Please fill in all member fields."));
    }
    let join_date = date_or_today(input.join_date.as_deref(), "Join date")?;
    let name = input.name.trim().to_string();

    let txn = db.begin().await?;
    let result = insert_member(&txn, &input, join_date).await;
    let (user_id, member_id) = finish(txn, result, "Failed to add member").await?;

    tracing::info!(
        "Member {} (user {}) registered by user {}",
        member_id,
        user_id,
        principal.user_id
    );

    Ok(Registration {
        user_id,
        record_id: member_id,
        message: format!("Member '{}' added successfully (User ID: {}).", name, user_id),
    })
}

/// Manager only.
pub async fn add_staff(
    db: &DatabaseConnection,
    principal: &Principal,
    input: NewStaff,
) -> Result<Registration, DomainError> {
    authorization::require(principal, Capability::ManageStaff)?;

    if !all_filled(&[&input.name, &input.email, &input.role]) {
        return Err(DomainError::validation("Please fill in all staff fields."));
    }
    let hire_date = date_or_today(input.hire_date.as_deref(), "Hire date")?;
    let name = input.name.trim().to_string();
    let role = input.role.trim().to_string();

    let txn = db.begin().await?;
    let result = insert_staff(&txn, &input, hire_date).await;
    let (user_id, staff_id) = finish(txn, result, "Failed to add staff").await?;

    tracing::info!(
        "Staff {} (user {}) registered as {} by user {}",
        staff_id,
        user_id,
        role,
        principal.user_id
    );

    Ok(Registration {
        user_id,
        record_id: staff_id,
        message: format!(
            "Staff '{}' added successfully as {} (User ID: {}).",
            name, role, user_id
        ),
    })
}

/// Commit on success; on failure roll back and surface the cause as `Persistence`.
async fn finish(
    txn: DatabaseTransaction,
    result: Result<(i32, i32), DbErr>,
    context: &str,
) -> Result<(i32, i32), DomainError> {
    match result {
        Ok(ids) => {
            txn.commit().await.map_err(|e| {
                tracing::error!("{}: commit failed: {}", context, e);
                DomainError::Persistence(format!("{}: {}", context, e))
            })?;
            Ok(ids)
        }
        Err(e) => {
            if let Err(rollback_err) = txn.rollback().await {
                tracing::error!("{}: rollback failed: {}", context, rollback_err);
            }
            tracing::error!("{}: {}", context, e);
            Err(DomainError::Persistence(format!("{}: {}", context, e)))
        }
    }
}

async fn insert_user(txn: &DatabaseTransaction, name: &str, email: &str) -> Result<i32, DbErr> {
    let user = user::ActiveModel {
        name: Set(name.trim().to_string()),
        email: Set(email.trim().to_string()),
        ..Default::default()
    }
    .insert(txn)
    .await?;

    Ok(user.id)
}

async fn insert_member(
    txn: &DatabaseTransaction,
    input: &NewMember,
    join_date: String,
) -> Result<(i32, i32), DbErr> {
    let user_id = insert_user(txn, &input.name, &input.email).await?;

    let member = member::ActiveModel {
        user_id: Set(user_id),
        phone: Set(input.phone.trim().to_string()),
        address: Set(input.address.trim().to_string()),
        join_date: Set(join_date),
        ..Default::default()
    }
    .insert(txn)
    .await?;

    Ok((user_id, member.id))
}

async fn insert_staff(
    txn: &DatabaseTransaction,
    input: &NewStaff,
    hire_date: String,
) -> Result<(i32, i32), DbErr> {
    let user_id = insert_user(txn, &input.name, &input.email).await?;

    let staff = staff::ActiveModel {
        user_id: Set(user_id),
        role: Set(input.role.trim().to_string()),
        hire_date: Set(hire_date),
        ..Default::default()
    }
    .insert(txn)
    .await?;

    Ok((user_id, staff.id))
}
