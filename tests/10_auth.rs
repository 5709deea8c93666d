mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{send, signup, test_app};

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let app = test_app();
    let res = send(&app, Method::GET, "/health", None, None).await?;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn signup_success() -> Result<()> {
    let app = test_app();
    let res = signup(&app, "alice", "wonderland").await?;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["username"], "alice");
    assert_eq!(res.body["message"], "User created successfully");
    assert!(res.body.get("password_hash").is_none());
    Ok(())
}

#[tokio::test]
async fn signup_duplicate_username() -> Result<()> {
    let app = test_app();
    signup(&app, "bob", "builder").await?;

    let same_password = signup(&app, "bob", "builder").await?;
    assert_eq!(same_password.status, StatusCode::BAD_REQUEST);
    assert_eq!(same_password.body["detail"], "Username already exists");

    let other_password = signup(&app, "bob", "different").await?;
    assert_eq!(other_password.status, StatusCode::BAD_REQUEST);
    assert_eq!(other_password.body["detail"], "Username already exists");
    Ok(())
}

#[tokio::test]
async fn signup_validation() -> Result<()> {
    let app = test_app();

    let empty = signup(&app, "", "pw").await?;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
    assert_eq!(empty.body["detail"], "Username and password required");

    let missing = send(
        &app,
        Method::POST,
        "/auth/signup",
        None,
        Some(json!({ "username": "carol" })),
    )
    .await?;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing.body["code"], "VALIDATION_ERROR");
    Ok(())
}

#[tokio::test]
async fn me_with_valid_credentials() -> Result<()> {
    let app = test_app();
    signup(&app, "john", "doe123").await?;

    let res = send(&app, Method::GET, "/auth/me", Some(("john", "doe123")), None).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!({ "username": "john" }));
    Ok(())
}

#[tokio::test]
async fn bad_credentials_are_indistinguishable() -> Result<()> {
    let app = test_app();
    signup(&app, "john", "doe123").await?;

    let wrong_password = send(&app, Method::GET, "/auth/me", Some(("john", "nope")), None).await?;
    let unknown_user = send(&app, Method::GET, "/auth/me", Some(("jane", "doe123")), None).await?;

    for res in [&wrong_password, &unknown_user] {
        assert_eq!(res.status, StatusCode::UNAUTHORIZED);
        assert_eq!(res.www_authenticate.as_deref(), Some("Basic"));
    }
    assert_eq!(wrong_password.body, unknown_user.body);
    Ok(())
}

#[tokio::test]
async fn missing_credentials_get_a_challenge() -> Result<()> {
    let app = test_app();
    let res = send(&app, Method::GET, "/auth/me", None, None).await?;

    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.www_authenticate.as_deref(), Some("Basic"));
    Ok(())
}

#[tokio::test]
async fn change_password_success() -> Result<()> {
    let app = test_app();
    signup(&app, "changepass", "old123").await?;

    let res = send(
        &app,
        Method::PUT,
        "/auth/change-password",
        Some(("changepass", "old123")),
        Some(json!({ "old_password": "old123", "new_password": "new123" })),
    )
    .await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["message"], "Password updated successfully");

    let with_new = send(&app, Method::GET, "/auth/me", Some(("changepass", "new123")), None).await?;
    assert_eq!(with_new.status, StatusCode::OK);

    let with_old = send(&app, Method::GET, "/auth/me", Some(("changepass", "old123")), None).await?;
    assert_eq!(with_old.status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn change_password_wrong_old_password() -> Result<()> {
    let app = test_app();
    signup(&app, "wrongpass", "abcd").await?;

    let res = send(
        &app,
        Method::PUT,
        "/auth/change-password",
        Some(("wrongpass", "abcd")),
        Some(json!({ "old_password": "wrong", "new_password": "xyz" })),
    )
    .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["detail"], "Old password is incorrect");

    let still_old = send(&app, Method::GET, "/auth/me", Some(("wrongpass", "abcd")), None).await?;
    assert_eq!(still_old.status, StatusCode::OK);
    Ok(())
}
