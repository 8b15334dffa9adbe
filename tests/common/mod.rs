#![allow(dead_code)]

use library_backoffice::db;
use library_backoffice::domain::{Principal, StaffRole};
use library_backoffice::models::{author, book, borrowing, category, fine, member, publisher, staff, user};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

// Helper to create a test database
pub async fn setup_test_db() -> DatabaseConnection {
    db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB")
}

/// Catalogue lookups shared by every book: (author, category, publisher)
pub async fn create_catalogue(db: &DatabaseConnection, author_name: &str) -> (i32, i32, i32) {
    let author = author::ActiveModel {
        name: Set(author_name.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to create author");

    let category = category::ActiveModel {
        name: Set("Fiction".to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to create category");

    let publisher = publisher::ActiveModel {
        name: Set("Penguin".to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to create publisher");

    (author.id, category.id, publisher.id)
}

pub async fn create_author(db: &DatabaseConnection, name: &str) -> i32 {
    author::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to create author")
    .id
}

pub async fn create_book(
    db: &DatabaseConnection,
    title: &str,
    (author_id, category_id, publisher_id): (i32, i32, i32),
    copies_total: i32,
    copies_available: i32,
) -> i32 {
    book::ActiveModel {
        title: Set(title.to_string()),
        author_id: Set(author_id),
        category_id: Set(category_id),
        publisher_id: Set(publisher_id),
        isbn: Set(format!("978-{}", title.len())),
        publish_year: Set(1990),
        copies_total: Set(copies_total),
        copies_available: Set(copies_available),
        shelf_location: Set("A1".to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to create book")
    .id
}

async fn create_user(db: &DatabaseConnection, name: &str) -> i32 {
    user::ActiveModel {
        name: Set(name.to_string()),
        email: Set(format!("{}@mail.test", name.to_lowercase().replace(' ', "."))),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to create user")
    .id
}

/// Returns (user id, member id). `member_id` forces the member row id.
pub async fn create_member(
    db: &DatabaseConnection,
    name: &str,
    join_date: &str,
    member_id: Option<i32>,
) -> (i32, i32) {
    let user_id = create_user(db, name).await;

    let mut row = member::ActiveModel {
        user_id: Set(user_id),
        phone: Set("555-0100".to_string()),
        address: Set("1 Main Street".to_string()),
        join_date: Set(join_date.to_string()),
        ..Default::default()
    };
    if let Some(id) = member_id {
        row.id = Set(id);
    }

    let member = row.insert(db).await.expect("Failed to create member");
    (user_id, member.id)
}

/// Returns (user id, staff id).
pub async fn create_staff(db: &DatabaseConnection, name: &str, role: &str) -> (i32, i32) {
    let user_id = create_user(db, name).await;

    let staff = staff::ActiveModel {
        user_id: Set(user_id),
        role: Set(role.to_string()),
        hire_date: Set("2020-01-01".to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to create staff");

    (user_id, staff.id)
}

pub async fn create_borrowing(
    db: &DatabaseConnection,
    book_id: i32,
    member_id: i32,
    borrow_date: &str,
    due_date: &str,
    return_date: Option<&str>,
    status: &str,
) -> i32 {
    borrowing::ActiveModel {
        book_id: Set(book_id),
        member_id: Set(member_id),
        borrow_date: Set(borrow_date.to_string()),
        due_date: Set(due_date.to_string()),
        return_date: Set(return_date.map(str::to_string)),
        status: Set(status.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to create borrowing")
    .id
}

pub async fn create_fine(db: &DatabaseConnection, borrow_id: i32, amount: f64, paid: &str) -> i32 {
    fine::ActiveModel {
        borrow_id: Set(borrow_id),
        amount: Set(amount),
        paid: Set(paid.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to create fine")
    .id
}

pub fn manager() -> Principal {
    Principal::staff(1, "Margaret Hale", StaffRole::Manager, 1)
}

pub fn clerk() -> Principal {
    Principal::staff(2, "Tom Bishop", StaffRole::Staff, 2)
}

pub fn member_principal(user_id: i32, member_id: i32) -> Principal {
    Principal::member(user_id, "Reader", member_id)
}
