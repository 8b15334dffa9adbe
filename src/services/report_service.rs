//! Report Service - summary statistics computed on demand
//!
//! Nothing here is cached or maintained incrementally; every call runs its
//! aggregate query against the current tables. Top-N lists break ties by
//! ascending id.

use sea_orm::{ConnectionTrait, DatabaseConnection, FromQueryResult, Statement, Value};
use serde::Serialize;

use crate::domain::authorization::{self, Capability};
use crate::domain::{DomainError, Principal};

/// Length of the popular books / top authors / active members lists
pub const TOP_N: i64 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, FromQueryResult)]
pub struct FineListing {
    pub fine_id: i32,
    pub member_id: i32,
    pub member_name: String,
    pub book_title: String,
    pub amount: f64,
    pub paid: String,
    pub borrow_date: String,
    pub due_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromQueryResult)]
pub struct MemberBorrows {
    pub member_id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub join_date: String,
    pub total_borrows: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromQueryResult)]
pub struct MonthlySummary {
    /// YYYY-MM
    pub month: String,
    pub total_borrows: i64,
    pub returned_books: i64,
    pub overdue_books: i64,
    pub total_fines_amount: f64,
    pub unpaid_fines: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromQueryResult)]
pub struct PopularBook {
    pub book_id: i32,
    pub title: String,
    pub author_name: String,
    pub times_borrowed: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromQueryResult)]
pub struct TopAuthor {
    pub author_id: i32,
    pub author_name: String,
    pub total_borrows: i64,
    pub total_books: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromQueryResult)]
pub struct ActiveMember {
    pub member_id: i32,
    pub name: String,
    pub email: String,
    pub total_borrows: i64,
    pub first_borrow: Option<String>,
    pub last_borrow: Option<String>,
    pub overdue_count: i64,
}

const ALL_FINES_SQL: &str = r#"
    SELECT
        f.id AS fine_id,
        m.id AS member_id,
        u.name AS member_name,
        b.title AS book_title,
        f.amount,
        f.paid,
        br.borrow_date,
        br.due_date
    FROM fines f
    JOIN borrowings br ON f.borrow_id = br.id
    JOIN members m ON br.member_id = m.id
    JOIN users u ON m.user_id = u.id
    JOIN books b ON br.book_id = b.id
    ORDER BY CASE WHEN f.paid = 'No' THEN 0 ELSE 1 END, f.amount DESC, f.id
"#;

const MEMBERS_WITH_BORROWS_SQL: &str = r#"
    SELECT
        m.id AS member_id,
        u.name,
        u.email,
        m.phone,
        m.address,
        m.join_date,
        (SELECT COUNT(*) FROM borrowings WHERE member_id = m.id) AS total_borrows
    FROM members m
    JOIN users u ON m.user_id = u.id
    ORDER BY m.join_date DESC, m.id DESC
"#;

const MONTHLY_SUMMARY_SQL: &str = r#"
    SELECT
        strftime('%Y-%m', br.borrow_date) AS month,
        COUNT(DISTINCT br.id) AS total_borrows,
        COUNT(DISTINCT CASE WHEN br.status = 'Returned' THEN br.id END) AS returned_books,
        COUNT(DISTINCT CASE WHEN br.status = 'Overdue' THEN br.id END) AS overdue_books,
        CAST(COALESCE(SUM(f.amount), 0) AS REAL) AS total_fines_amount,
        CAST(COALESCE(SUM(CASE WHEN f.paid = 'No' THEN f.amount ELSE 0 END), 0) AS REAL) AS unpaid_fines
    FROM borrowings br
    LEFT JOIN fines f ON br.id = f.borrow_id
    GROUP BY strftime('%Y-%m', br.borrow_date)
    ORDER BY month DESC
"#;

const POPULAR_BOOKS_SQL: &str = r#"
    SELECT
        b.id AS book_id,
        b.title,
        a.name AS author_name,
        COUNT(br.id) AS times_borrowed
    FROM books b
    JOIN authors a ON b.author_id = a.id
    LEFT JOIN borrowings br ON b.id = br.book_id
    GROUP BY b.id, b.title, a.name
    ORDER BY times_borrowed DESC, b.id
    LIMIT ?
"#;

const TOP_AUTHORS_SQL: &str = r#"
    SELECT
        a.id AS author_id,
        a.name AS author_name,
        COUNT(br.id) AS total_borrows,
        COUNT(DISTINCT b.id) AS total_books
    FROM authors a
    JOIN books b ON a.id = b.author_id
    LEFT JOIN borrowings br ON b.id = br.book_id
    GROUP BY a.id, a.name
    ORDER BY total_borrows DESC, a.id
    LIMIT ?
"#;

const ACTIVE_MEMBERS_SQL: &str = r#"
    SELECT
        m.id AS member_id,
        u.name,
        u.email,
        COUNT(br.id) AS total_borrows,
        MIN(br.borrow_date) AS first_borrow,
        MAX(br.borrow_date) AS last_borrow,
        (
            SELECT COUNT(*) FROM borrowings b2
            WHERE b2.member_id = m.id AND b2.status = 'Overdue'
        ) AS overdue_count
    FROM members m
    JOIN users u ON m.user_id = u.id
    LEFT JOIN borrowings br ON m.id = br.member_id
    GROUP BY m.id, u.name, u.email
    ORDER BY total_borrows DESC, m.id
    LIMIT ?
"#;

async fn fetch<T: FromQueryResult>(
    db: &DatabaseConnection,
    sql: &str,
    values: Vec<Value>,
) -> Result<Vec<T>, DomainError> {
    let stmt = Statement::from_sql_and_values(db.get_database_backend(), sql, values);
    let rows = T::find_by_statement(stmt).all(db).await?;
    Ok(rows)
}

/// Unpaid first, then largest amount.
pub async fn all_fines(
    db: &DatabaseConnection,
    principal: &Principal,
) -> Result<Vec<FineListing>, DomainError> {
    authorization::require(principal, Capability::Privileged)?;
    fetch(db, ALL_FINES_SQL, vec![]).await
}

/// Newest members first.
pub async fn members_with_borrows(
    db: &DatabaseConnection,
    principal: &Principal,
) -> Result<Vec<MemberBorrows>, DomainError> {
    authorization::require(principal, Capability::Privileged)?;
    fetch(db, MEMBERS_WITH_BORROWS_SQL, vec![]).await
}

/// One row per calendar month of borrow date, newest month first.
pub async fn borrowing_summary(
    db: &DatabaseConnection,
    principal: &Principal,
) -> Result<Vec<MonthlySummary>, DomainError> {
    authorization::require(principal, Capability::Privileged)?;
    fetch(db, MONTHLY_SUMMARY_SQL, vec![]).await
}

/// Open to every signed-in principal.
pub async fn popular_books(db: &DatabaseConnection) -> Result<Vec<PopularBook>, DomainError> {
    fetch(db, POPULAR_BOOKS_SQL, vec![TOP_N.into()]).await
}

pub async fn top_authors(
    db: &DatabaseConnection,
    principal: &Principal,
) -> Result<Vec<TopAuthor>, DomainError> {
    authorization::require(principal, Capability::Privileged)?;
    fetch(db, TOP_AUTHORS_SQL, vec![TOP_N.into()]).await
}

pub async fn active_members(
    db: &DatabaseConnection,
    principal: &Principal,
) -> Result<Vec<ActiveMember>, DomainError> {
    authorization::require(principal, Capability::Privileged)?;
    fetch(db, ACTIVE_MEMBERS_SQL, vec![TOP_N.into()]).await
}
