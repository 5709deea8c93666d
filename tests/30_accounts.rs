mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{send, signup, test_app};

#[tokio::test]
async fn cannot_delete_someone_elses_account() -> Result<()> {
    let app = test_app();
    signup(&app, "alice", "pw1").await?;
    signup(&app, "bob", "pw2").await?;

    let res = send(
        &app,
        Method::DELETE,
        "/auth/deleteuser/bob",
        Some(("alice", "pw1")),
        None,
    )
    .await?;
    assert_eq!(res.status, StatusCode::FORBIDDEN);

    let bob = send(&app, Method::GET, "/auth/me", Some(("bob", "pw2")), None).await?;
    assert_eq!(bob.status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn deleting_own_account_removes_user_and_items() -> Result<()> {
    let app = test_app();
    signup(&app, "alice", "pw1").await?;
    let alice = Some(("alice", "pw1"));

    send(
        &app,
        Method::POST,
        "/items/",
        alice,
        Some(json!({ "name": "Laptop", "description": "Gaming", "price": 1200 })),
    )
    .await?;

    let res = send(&app, Method::DELETE, "/auth/deleteuser/alice", alice, None).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["message"], "User deleted successfully");

    let me = send(&app, Method::GET, "/auth/me", alice, None).await?;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);

    // Signing up again under the same name starts from an empty item list
    signup(&app, "alice", "pw1").await?;
    let listed = send(&app, Method::GET, "/items/", alice, None).await?;
    assert_eq!(listed.body, json!([]));
    Ok(())
}
