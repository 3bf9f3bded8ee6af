//! Integration tests for the user listing.

mod common;

use admin_gateway::models::CustomClaims;
use axum::http::StatusCode;
use common::{account, admin_token, error_kind, user_token, TestApp};

#[tokio::test]
async fn list_requires_authentication() {
    let app = TestApp::spawn().await;

    let (status, body) = app.get("/admin/users", None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_kind(&body), "unauthenticated");
    assert_eq!(app.directory.calls(), 0);
}

#[tokio::test]
async fn list_rejects_non_admin_without_querying_directory() {
    let app = TestApp::with_accounts(vec![account("u1", Some("a@x.com"))]).await;
    let token = user_token("caller-uid", "someone@x.com");

    let (status, body) = app.get("/admin/users", Some(&token)).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_kind(&body), "permission-denied");
    assert_eq!(app.directory.calls(), 0);
}

#[tokio::test]
async fn list_projects_accounts_in_directory_order() {
    let mut alice = account("u1", Some("alice@x.com"));
    alice.display_name = Some("Alice".to_string());
    alice.custom_claims = Some(CustomClaims::admin());
    alice.photo_url = Some("https://example.com/alice.png".to_string());

    // No display name - the email local-part fills in.
    let bob = account("u2", Some("bob@x.com"));

    let carol = account("u3", Some("carol@x.com"));

    let app = TestApp::with_accounts(vec![alice, bob, carol]).await;
    let token = admin_token("caller-uid", "admin@x.com");

    let (status, body) = app.get("/admin/users", Some(&token)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], serde_json::json!(true));

    let users = body["users"].as_array().unwrap();
    assert_eq!(users.len(), 3);

    assert_eq!(users[0]["uid"], "u1");
    assert_eq!(users[0]["displayName"], "Alice");
    assert_eq!(users[0]["isAdmin"], true);
    assert_eq!(users[0]["photoURL"], "https://example.com/alice.png");

    assert_eq!(users[1]["uid"], "u2");
    assert_eq!(users[1]["displayName"], "bob");
    assert_eq!(users[1]["isAdmin"], false);

    assert_eq!(users[2]["uid"], "u3");
    assert_eq!(users[2]["displayName"], "carol");
}

#[tokio::test]
async fn list_labels_accounts_without_email_as_no_name() {
    let app = TestApp::with_accounts(vec![account("u1", None)]).await;
    let token = admin_token("caller-uid", "admin@x.com");

    let (status, body) = app.get("/admin/users", Some(&token)).await;

    assert_eq!(status, StatusCode::OK);
    let users = body["users"].as_array().unwrap();
    assert_eq!(users[0]["displayName"], "No Name");
    assert_eq!(users[0]["email"], serde_json::Value::Null);
}

#[tokio::test]
async fn list_serves_at_most_one_page() {
    let accounts: Vec<_> = (0..120)
        .map(|i| account(&format!("u{}", i), Some(&format!("user{}@x.com", i))))
        .collect();

    let app = TestApp::with_accounts(accounts).await;
    let token = admin_token("caller-uid", "admin@x.com");

    let (status, body) = app.get("/admin/users", Some(&token)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["users"].as_array().unwrap().len(), 100);
}

#[tokio::test]
async fn list_surfaces_directory_outage_as_internal() {
    let app = TestApp::spawn().await;
    app.directory.set_failing(true);
    let token = admin_token("caller-uid", "admin@x.com");

    let (status, body) = app.get("/admin/users", Some(&token)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_kind(&body), "internal");
}
