//! Fines Service - read-only fine and borrowing lookups

use chrono::{Local, NaiveDate};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType,
    PaginatorTrait, QueryFilter, QuerySelect, RelationTrait, Statement,
};
use serde::{Deserialize, Serialize};

use crate::domain::authorization::{self, Capability};
use crate::domain::{DomainError, Principal, YesNo};
use crate::models::{borrowing, fine};
use crate::utils::form::blank_as_none;

/// Inclusive borrow-date window, YYYY-MM-DD on both ends.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FinePeriod {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, FromQueryResult)]
struct FinePeriodRecord {
    fine_id: i32,
    member_name: String,
    book_title: String,
    amount: f64,
    paid: String,
    borrow_date: String,
    due_date: String,
    return_date: Option<String>,
}

/// A fine with member and book details and how late the return was.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinePeriodRow {
    pub fine_id: i32,
    pub member_name: String,
    pub book_title: String,
    pub amount: f64,
    pub paid: String,
    pub borrow_date: String,
    pub due_date: String,
    pub return_date: Option<String>,
    /// Days between due date and return (or today when still out);
    /// negative when returned early
    pub days_late: Option<i64>,
}

const FINES_IN_PERIOD_SQL: &str = r#"
    SELECT
        f.id AS fine_id,
        u.name AS member_name,
        b.title AS book_title,
        f.amount,
        f.paid,
        br.borrow_date,
        br.due_date,
        br.return_date
    FROM fines f
    JOIN borrowings br ON f.borrow_id = br.id
    JOIN members m ON br.member_id = m.id
    JOIN users u ON m.user_id = u.id
    JOIN books b ON br.book_id = b.id
    WHERE date(br.borrow_date) BETWEEN ? AND ?
    ORDER BY br.borrow_date, f.id
"#;

/// YYYY-MM-DD, optionally followed by a ' ' or 'T' time part.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let date = match raw.split_at_checked(10) {
        Some((date, rest)) if rest.is_empty() || rest.starts_with([' ', 'T']) => date,
        Some(_) => return None,
        None => raw,
    };
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// Whole days from `due` to `returned` (or `today` when not yet returned).
pub fn days_late(due: &str, returned: Option<&str>, today: NaiveDate) -> Option<i64> {
    let due = parse_date(due)?;
    let end = match returned {
        Some(r) => parse_date(r)?,
        None => today,
    };
    Some((end - due).num_days())
}

/// A non-privileged principal may only ask about their own membership.
pub async fn member_has_unpaid_fines(
    db: &DatabaseConnection,
    principal: &Principal,
    member_id: i32,
) -> Result<YesNo, DomainError> {
    if member_id <= 0 {
        return Err(DomainError::validation("Provide a valid member ID."));
    }

    if !authorization::is_privileged(principal) && principal.member_id != Some(member_id) {
        tracing::warn!(
            "User {} asked for fines of member {}",
            principal.user_id,
            member_id
        );
        return Err(DomainError::forbidden(
            "You can only check fines for your own membership.",
        ));
    }

    let unpaid = fine::Entity::find()
        .join(JoinType::InnerJoin, fine::Relation::Borrowing.def())
        .filter(borrowing::Column::MemberId.eq(member_id))
        .filter(fine::Column::Paid.eq(fine::UNPAID))
        .filter(fine::Column::Amount.gt(0.0))
        .count(db)
        .await?;

    Ok(YesNo::from(unpaid > 0))
}

/// Fines whose borrowing started inside the window, oldest borrow first.
pub async fn fines_in_period(
    db: &DatabaseConnection,
    principal: &Principal,
    period: FinePeriod,
) -> Result<Vec<FinePeriodRow>, DomainError> {
    authorization::require(principal, Capability::Privileged)?;

    let (Some(start), Some(end)) = (period.start_date, period.end_date) else {
        return Err(DomainError::validation(
            "Please provide both start and end dates.",
        ));
    };

    let (Some(start), Some(end)) = (parse_date(&start), parse_date(&end)) else {
        return Err(DomainError::validation(
            "Dates must be in YYYY-MM-DD format.",
        ));
    };

    if start > end {
        return Err(DomainError::validation(
            "Start date must not be after end date.",
        ));
    }

    let stmt = Statement::from_sql_and_values(
        db.get_database_backend(),
        FINES_IN_PERIOD_SQL,
        [
            start.format("%Y-%m-%d").to_string().into(),
            end.format("%Y-%m-%d").to_string().into(),
        ],
    );

    let records = FinePeriodRecord::find_by_statement(stmt).all(db).await?;
    let today = Local::now().date_naive();

    Ok(records
        .into_iter()
        .map(|r| FinePeriodRow {
            days_late: days_late(&r.due_date, r.return_date.as_deref(), today),
            fine_id: r.fine_id,
            member_name: r.member_name,
            book_title: r.book_title,
            amount: r.amount,
            paid: r.paid,
            borrow_date: r.borrow_date,
            due_date: r.due_date,
            return_date: r.return_date,
        })
        .collect())
}
