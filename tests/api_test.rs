mod common;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use common::*;
use library_backoffice::auth::create_jwt;
use library_backoffice::config::Config;
use library_backoffice::domain::Principal;
use library_backoffice::infrastructure::AppState;
use library_backoffice::server;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use tower::util::ServiceExt; // for `oneshot`

fn app(db: &DatabaseConnection) -> Router {
    server::build_router(AppState::new(db.clone(), Config::default()))
}

fn bearer(principal: &Principal) -> String {
    let token = create_jwt(principal, 1).expect("Failed to create JWT");
    format!("Bearer {}", token)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}

#[tokio::test]
async fn test_health_is_public() {
    let db = setup_test_db().await;

    let response = app(&db)
        .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn test_requests_without_session_are_rejected() {
    let db = setup_test_db().await;

    let response = app(&db)
        .oneshot(Request::builder().uri("/api/books").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app(&db)
        .oneshot(
            Request::builder()
                .uri("/api/auth/me")
                .header(header::AUTHORIZATION, "Bearer not-a-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_then_me() {
    let db = setup_test_db().await;
    let (user_id, member_id) = create_member(&db, "Alice Moreau", "2023-01-10", None).await;

    let response = app(&db)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "user_id": user_id, "name": "Alice Moreau", "role": "Member" })
                        .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let token = body["token"].as_str().expect("No token").to_string();
    assert_eq!(body["principal"]["member_id"], member_id);

    let response = app(&db)
        .oneshot(
            Request::builder()
                .uri("/api/auth/me")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["role"], "member");
}

#[tokio::test]
async fn test_failed_login_maps_to_status() {
    let db = setup_test_db().await;
    let (clerk_id, _) = create_staff(&db, "Tom Bishop", "Staff").await;

    for (payload, expected) in [
        (json!({ "user_id": clerk_id, "name": "Tom Bishop", "role": "manager" }), StatusCode::FORBIDDEN),
        (json!({ "user_id": clerk_id, "name": "Tom", "role": "staff" }), StatusCode::NOT_FOUND),
        (json!({ "user_id": clerk_id, "name": "Tom Bishop", "role": "owner" }), StatusCode::BAD_REQUEST),
    ] {
        let response = app(&db)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/auth/login")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), expected);
        assert!(body_json(response).await["error"].is_string());
    }
}

#[tokio::test]
async fn test_member_cannot_add_book() {
    let db = setup_test_db().await;
    let lookups = create_catalogue(&db, "Frank Herbert").await;
    let (user_id, member_id) = create_member(&db, "Alice", "2023-01-10", None).await;

    let response = app(&db)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/books")
                .header(header::AUTHORIZATION, bearer(&member_principal(user_id, member_id)))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({
                        "title": "Dune",
                        "author_id": lookups.0,
                        "category_id": lookups.1,
                        "publisher_id": lookups.2,
                        "isbn": "9780441013593",
                        "publish_year": 1965,
                        "copies_total": 2,
                        "copies_available": 2,
                        "shelf_location": "SF-03"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_book_routes_for_staff() {
    let db = setup_test_db().await;
    let lookups = create_catalogue(&db, "Frank Herbert").await;
    let book_id = create_book(&db, "Dune", lookups, 2, 1).await;
    let auth = bearer(&clerk());

    let response = app(&db)
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/books/{}", book_id))
                .header(header::AUTHORIZATION, auth.clone())
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({ "title": "", "copies_available": "" }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app(&db)
        .oneshot(
            Request::builder()
                .uri(format!("/api/books/{}/available", book_id))
                .header(header::AUTHORIZATION, auth.clone())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "kind": "answer", "data": "Yes" }));

    let response = app(&db)
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/books/{}", book_id))
                .header(header::AUTHORIZATION, auth)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_actions_endpoint_dispatches_commands() {
    let db = setup_test_db().await;
    let lookups = create_catalogue(&db, "Frank Herbert").await;
    let book_id = create_book(&db, "Dune", lookups, 2, 1).await;
    let (_, member_id) = create_member(&db, "Alice", "2023-01-10", None).await;
    create_borrowing(&db, book_id, member_id, "2024-03-01", "2024-03-15", None, "Borrowed").await;

    let post = |payload: Value| {
        Request::builder()
            .method("POST")
            .uri("/api/actions")
            .header(header::AUTHORIZATION, bearer(&manager()))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap()
    };

    let response = app(&db)
        .oneshot(post(json!({ "action": "check_book_borrowed", "book_id": book_id })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "kind": "answer", "data": "Yes" }));

    let response = app(&db)
        .oneshot(post(json!({ "action": "delete_book", "book_id": book_id })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app(&db)
        .oneshot(post(json!({
            "action": "add_staff",
            "name": "Bob Clerk",
            "email": "bob@library.test",
            "role": "Staff"
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["kind"], "registered");
    assert!(
        body["data"]["message"]
            .as_str()
            .unwrap()
            .starts_with("Staff 'Bob Clerk' added successfully as Staff")
    );
}
