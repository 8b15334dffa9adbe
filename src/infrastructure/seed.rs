use sea_orm::*;

use crate::models::{author, book, borrowing, category, fine, member, publisher, staff, user};

/// Populate an empty database with a small demo library.
///
/// Does nothing if any user already exists.
pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    if user::Entity::find().count(db).await? > 0 {
        tracing::info!("Database already has users, skipping demo data");
        return Ok(());
    }

    let txn = db.begin().await?;

    // 1. Staff (user ids 1 and 2)
    for (name, email, role, hired) in [
        ("Margaret Hale", "margaret@library.test", "Manager", "2019-03-01"),
        ("Tom Bishop", "tom@library.test", "Staff", "2021-09-15"),
    ] {
        let u = user::ActiveModel {
            name: Set(name.to_owned()),
            email: Set(email.to_owned()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        staff::ActiveModel {
            user_id: Set(u.id),
            role: Set(role.to_owned()),
            hire_date: Set(hired.to_owned()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    // 2. Members
    let mut member_ids = Vec::new();
    for (name, email, phone, address, joined) in [
        ("Alice Moreau", "alice@mail.test", "555-0101", "12 Elm Street", "2023-01-10"),
        ("Bilal Khan", "bilal@mail.test", "555-0102", "4 Harbour Road", "2023-06-22"),
        ("Chen Wei", "chen@mail.test", "555-0103", "88 Hill Lane", "2024-02-03"),
    ] {
        let u = user::ActiveModel {
            name: Set(name.to_owned()),
            email: Set(email.to_owned()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let m = member::ActiveModel {
            user_id: Set(u.id),
            phone: Set(phone.to_owned()),
            address: Set(address.to_owned()),
            join_date: Set(joined.to_owned()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        member_ids.push(m.id);
    }

    // 3. Catalogue lookups
    let mut author_ids = Vec::new();
    for name in ["Ursula K. Le Guin", "Isaac Asimov", "Frank Herbert"] {
        let a = author::ActiveModel {
            name: Set(name.to_owned()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        author_ids.push(a.id);
    }

    let fiction = category::ActiveModel {
        name: Set("Science Fiction".to_owned()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let publisher = publisher::ActiveModel {
        name: Set("Ace Books".to_owned()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    // 4. Books
    let mut book_ids = Vec::new();
    for (title, author_idx, isbn, year, total, available, shelf) in [
        ("A Wizard of Earthsea", 0, "9780547773742", 1968, 3, 2, "SF-01"),
        ("Foundation", 1, "9780553293357", 1951, 4, 4, "SF-02"),
        ("Dune", 2, "9780441013593", 1965, 5, 4, "SF-03"),
    ] {
        let b = book::ActiveModel {
            title: Set(title.to_owned()),
            author_id: Set(author_ids[author_idx]),
            category_id: Set(fiction.id),
            publisher_id: Set(publisher.id),
            isbn: Set(isbn.to_owned()),
            publish_year: Set(year),
            copies_total: Set(total),
            copies_available: Set(available),
            shelf_location: Set(shelf.to_owned()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        book_ids.push(b.id);
    }

    // 5. Borrowings and fines
    for (book_idx, member_idx, borrowed, due, returned, status, fine_amount, paid) in [
        (0, 0, "2024-01-05", "2024-01-19", None, "Overdue", Some(12.5), "No"),
        (2, 1, "2024-01-20", "2024-02-03", Some("2024-02-10"), "Returned", Some(3.5), "Yes"),
        (2, 2, "2024-02-14", "2024-02-28", None, "Borrowed", None, "No"),
        (1, 0, "2024-02-20", "2024-03-05", Some("2024-03-01"), "Returned", None, "No"),
    ] {
        let br = borrowing::ActiveModel {
            book_id: Set(book_ids[book_idx]),
            member_id: Set(member_ids[member_idx]),
            borrow_date: Set(borrowed.to_owned()),
            due_date: Set(due.to_owned()),
            return_date: Set(returned.map(str::to_owned)),
            status: Set(status.to_owned()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        if let Some(amount) = fine_amount {
            fine::ActiveModel {
                borrow_id: Set(br.id),
                amount: Set(amount),
                paid: Set(paid.to_owned()),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }
    }

    txn.commit().await?;
    Ok(())
}
