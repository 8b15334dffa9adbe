mod common;

use common::*;
use library_backoffice::domain::{DomainError, YesNo};
use library_backoffice::models::fine;
use library_backoffice::services::fines_service::{self, FinePeriod};
use sea_orm::{ActiveModelTrait, EntityTrait, IntoActiveModel, Set};

fn period(start: &str, end: &str) -> FinePeriod {
    FinePeriod {
        start_date: Some(start.to_string()),
        end_date: Some(end.to_string()),
    }
}

#[tokio::test]
async fn test_unpaid_fine_flag_follows_payment() {
    let db = setup_test_db().await;
    let lookups = create_catalogue(&db, "Ursula K. Le Guin").await;
    let book_id = create_book(&db, "The Dispossessed", lookups, 2, 2).await;
    let (user_id, member_id) = create_member(&db, "Alice", "2023-05-01", Some(7)).await;
    assert_eq!(member_id, 7);

    let borrow_id = create_borrowing(
        &db,
        book_id,
        7,
        "2024-01-05",
        "2024-01-19",
        Some("2024-01-30"),
        "Returned",
    )
    .await;
    let fine_id = create_fine(&db, borrow_id, 12.50, "No").await;

    // Own membership
    let answer = fines_service::member_has_unpaid_fines(&db, &member_principal(user_id, 7), 7)
        .await
        .unwrap();
    assert_eq!(answer, YesNo::Yes);

    // Staff may ask about anyone
    let answer = fines_service::member_has_unpaid_fines(&db, &clerk(), 7)
        .await
        .unwrap();
    assert_eq!(answer, YesNo::Yes);

    // Pay it
    let mut paid = fine::Entity::find_by_id(fine_id)
        .one(&db)
        .await
        .unwrap()
        .unwrap()
        .into_active_model();
    paid.paid = Set(fine::PAID.to_string());
    paid.update(&db).await.unwrap();

    let answer = fines_service::member_has_unpaid_fines(&db, &clerk(), 7)
        .await
        .unwrap();
    assert_eq!(answer, YesNo::No);
}

#[tokio::test]
async fn test_zero_amount_fine_is_not_owed() {
    let db = setup_test_db().await;
    let lookups = create_catalogue(&db, "Ursula K. Le Guin").await;
    let book_id = create_book(&db, "The Dispossessed", lookups, 2, 2).await;
    let (_, member_id) = create_member(&db, "Alice", "2023-05-01", None).await;
    let borrow_id =
        create_borrowing(&db, book_id, member_id, "2024-01-05", "2024-01-19", None, "Overdue").await;
    create_fine(&db, borrow_id, 0.0, "No").await;

    let answer = fines_service::member_has_unpaid_fines(&db, &manager(), member_id)
        .await
        .unwrap();
    assert_eq!(answer, YesNo::No);
}

#[tokio::test]
async fn test_member_cannot_check_other_members() {
    let db = setup_test_db().await;

    let result = fines_service::member_has_unpaid_fines(&db, &member_principal(10, 8), 7).await;
    match result {
        Err(DomainError::Forbidden(msg)) => {
            assert_eq!(msg, "You can only check fines for your own membership.")
        }
        other => panic!("expected forbidden, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fines_in_period_filters_and_orders() {
    let db = setup_test_db().await;
    let lookups = create_catalogue(&db, "Ursula K. Le Guin").await;
    let earthsea = create_book(&db, "A Wizard of Earthsea", lookups, 3, 3).await;
    let lathe = create_book(&db, "The Lathe of Heaven", lookups, 3, 3).await;
    let (_, alice) = create_member(&db, "Alice", "2023-05-01", None).await;
    let (_, bilal) = create_member(&db, "Bilal", "2023-06-01", None).await;

    let february = create_borrowing(
        &db,
        lathe,
        bilal,
        "2024-02-10",
        "2024-02-24",
        Some("2024-02-27"),
        "Returned",
    )
    .await;
    let january = create_borrowing(
        &db,
        earthsea,
        alice,
        "2024-01-05",
        "2024-01-19",
        Some("2024-01-29"),
        "Returned",
    )
    .await;
    let april =
        create_borrowing(&db, earthsea, bilal, "2024-04-02", "2024-04-16", None, "Overdue").await;

    create_fine(&db, february, 1.5, "Yes").await;
    create_fine(&db, january, 5.0, "No").await;
    create_fine(&db, april, 8.0, "No").await;

    let rows = fines_service::fines_in_period(&db, &clerk(), period("2024-01-01", "2024-02-29"))
        .await
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].member_name, "Alice");
    assert_eq!(rows[0].book_title, "A Wizard of Earthsea");
    assert_eq!(rows[0].days_late, Some(10));
    assert_eq!(rows[1].member_name, "Bilal");
    assert_eq!(rows[1].paid, "Yes");
    assert_eq!(rows[1].days_late, Some(3));

    // Both ends inclusive
    let rows = fines_service::fines_in_period(&db, &manager(), period("2024-04-02", "2024-04-02"))
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].return_date, None);
}

#[tokio::test]
async fn test_fines_in_period_rejects_bad_input() {
    let db = setup_test_db().await;

    let missing = FinePeriod {
        start_date: Some("2024-01-01".to_string()),
        end_date: None,
    };
    assert!(matches!(
        fines_service::fines_in_period(&db, &manager(), missing).await,
        Err(DomainError::Validation(_))
    ));

    assert!(matches!(
        fines_service::fines_in_period(&db, &manager(), period("01/01/2024", "2024-02-01")).await,
        Err(DomainError::Validation(_))
    ));

    assert!(matches!(
        fines_service::fines_in_period(&db, &manager(), period("2024-01-01garbage", "2024-02-01"))
            .await,
        Err(DomainError::Validation(_))
    ));

    assert!(matches!(
        fines_service::fines_in_period(&db, &manager(), period("2024-03-01", "2024-02-01")).await,
        Err(DomainError::Validation(_))
    ));

    assert!(matches!(
        fines_service::fines_in_period(&db, &member_principal(3, 3), period("2024-01-01", "2024-02-01"))
            .await,
        Err(DomainError::Forbidden(_))
    ));
}
