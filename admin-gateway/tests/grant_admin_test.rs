//! Integration tests for the grant operation.

mod common;

use axum::http::StatusCode;
use common::{account, admin_token, error_kind, user_token, TestApp};
use serde_json::json;

#[tokio::test]
async fn grant_requires_authentication() {
    let app = TestApp::spawn().await;

    let (status, body) = app
        .post("/admin/grant", None, Some(json!({"email": "new@x.com"})))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_kind(&body), "unauthenticated");
    assert_eq!(app.directory.calls(), 0);
}

#[tokio::test]
async fn grant_rejects_non_admin_caller() {
    let app = TestApp::with_accounts(vec![account("target-uid", Some("new@x.com"))]).await;
    let token = user_token("caller-uid", "someone@x.com");

    let (status, body) = app
        .post(
            "/admin/grant",
            Some(&token),
            Some(json!({"email": "new@x.com"})),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_kind(&body), "permission-denied");
    assert_eq!(app.directory.calls(), 0);
}

#[tokio::test]
async fn grant_promotes_target_for_claim_admin() {
    let app = TestApp::with_accounts(vec![account("target-uid", Some("new@x.com"))]).await;
    let token = admin_token("caller-uid", "someone@x.com");

    let (status, body) = app
        .post(
            "/admin/grant",
            Some(&token),
            Some(json!({"email": "new@x.com"})),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("new@x.com is now an admin!"));
    assert!(app.directory.account("target-uid").unwrap().is_admin());
}

#[tokio::test]
async fn grant_accepts_allow_listed_caller_without_claim() {
    let app = TestApp::with_accounts(vec![account("target-uid", Some("new@x.com"))]).await;
    // The caller holds no admin claim; the allow list alone authorizes them.
    let token = user_token("caller-uid", common::ALLOW_LISTED_EMAIL);

    let (status, body) = app
        .post(
            "/admin/grant",
            Some(&token),
            Some(json!({"email": "new@x.com"})),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
}

#[tokio::test]
async fn grant_rejects_empty_email_before_directory() {
    let app = TestApp::spawn().await;
    let token = admin_token("caller-uid", "admin@x.com");

    let (status, body) = app
        .post("/admin/grant", Some(&token), Some(json!({"email": ""})))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_kind(&body), "invalid-argument");
    assert_eq!(app.directory.calls(), 0);
}

#[tokio::test]
async fn grant_rejects_missing_email_field() {
    let app = TestApp::spawn().await;
    let token = admin_token("caller-uid", "admin@x.com");

    let (status, body) = app
        .post("/admin/grant", Some(&token), Some(json!({})))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_kind(&body), "invalid-argument");
    assert_eq!(app.directory.calls(), 0);
}

#[tokio::test]
async fn grant_surfaces_unknown_target_as_internal() {
    let app = TestApp::spawn().await;
    let token = admin_token("caller-uid", "admin@x.com");

    let (status, body) = app
        .post(
            "/admin/grant",
            Some(&token),
            Some(json!({"email": "missing@x.com"})),
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_kind(&body), "internal");
    // The directory's message reaches the caller unmodified.
    assert_eq!(
        body["message"],
        json!("There is no account record corresponding to the provided identifier.")
    );
}

#[tokio::test]
async fn grant_preserves_unrelated_claims() {
    let mut target = account("target-uid", Some("new@x.com"));
    let mut claims = admin_gateway::models::CustomClaims::default();
    claims.extra.insert("beta_tester".to_string(), true);
    target.custom_claims = Some(claims);

    let app = TestApp::with_accounts(vec![target]).await;
    let token = admin_token("caller-uid", "admin@x.com");

    let (status, _) = app
        .post(
            "/admin/grant",
            Some(&token),
            Some(json!({"email": "new@x.com"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let stored = app
        .directory
        .account("target-uid")
        .unwrap()
        .custom_claims
        .unwrap();
    assert!(stored.admin);
    assert_eq!(stored.extra.get("beta_tester"), Some(&true));
}

#[tokio::test]
async fn grant_twice_is_idempotent() {
    let app = TestApp::with_accounts(vec![account("target-uid", Some("new@x.com"))]).await;
    let token = admin_token("caller-uid", "admin@x.com");

    for _ in 0..2 {
        let (status, body) = app
            .post(
                "/admin/grant",
                Some(&token),
                Some(json!({"email": "new@x.com"})),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], json!("new@x.com is now an admin!"));
    }

    assert!(app.directory.account("target-uid").unwrap().is_admin());
}

#[tokio::test]
async fn grant_surfaces_directory_outage_as_internal() {
    let app = TestApp::with_accounts(vec![account("target-uid", Some("new@x.com"))]).await;
    app.directory.set_failing(true);
    let token = admin_token("caller-uid", "admin@x.com");

    let (status, body) = app
        .post(
            "/admin/grant",
            Some(&token),
            Some(json!({"email": "new@x.com"})),
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_kind(&body), "internal");
    assert_eq!(
        body["message"],
        json!("Directory request failed: directory offline (simulated)")
    );
}
