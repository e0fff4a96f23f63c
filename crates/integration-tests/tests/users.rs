//! User record administration against the fake record store.

#![allow(clippy::unwrap_used)]

use glowcart_core::{ProfileEdit, UserId};
use glowcart_integration_tests::{FakeRemote, FakeState, user_json};
use glowcart_storefront::StoreError;
use serde_json::json;

async fn remote_with_users() -> FakeRemote {
    let cart = json!([
        { "id": 1, "name": "Gentle Cleanser", "price": 10, "quantity": 2, "image": "1.png" },
    ]);
    let favorites = json!([
        { "id": 4, "name": "Night Masque", "price": 40, "image": "4.png" },
    ]);
    FakeRemote::start(FakeState {
        users: vec![
            user_json("12", "Sara", &cart, &favorites),
            user_json("13", "Omar", &json!([]), &json!([])),
        ],
        ..FakeState::default()
    })
    .await
    .unwrap()
}

#[tokio::test]
async fn test_list_users() {
    let remote = remote_with_users().await;
    let records = remote.records().unwrap();

    let users = records.list_users().await.unwrap();

    assert_eq!(users.len(), 2);
    assert_eq!(users.first().unwrap().display_name(), "Sara");
    assert_eq!(users.first().unwrap().cart.len(), 1);
}

#[tokio::test]
async fn test_edit_user_keeps_rest_of_record() {
    let remote = remote_with_users().await;
    let records = remote.records().unwrap();

    let saved = records
        .edit_user(
            &UserId::new("12"),
            ProfileEdit {
                name: Some("Sara Ali".to_string()),
                email: Some("sara.ali@example.com".to_string()),
                ..ProfileEdit::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(saved.display_name(), "Sara Ali");
    assert_eq!(saved.cart.len(), 1);
    assert_eq!(saved.favorites.len(), 1);

    let state = remote.state();
    let stored = state.users.first().unwrap();
    assert_eq!(stored["name"], "Sara Ali");
    assert_eq!(stored["email"], "sara.ali@example.com");
    assert_eq!(stored["password"], "Secret123");
    assert_eq!(stored["phone"], "01000000000");
    assert_eq!(stored["cart"][0]["quantity"], 2);
    assert_eq!(stored["favorites"][0]["id"], 4);
}

#[tokio::test]
async fn test_edit_password_only() {
    let remote = remote_with_users().await;
    let records = remote.records().unwrap();

    records
        .edit_user(
            &UserId::new("13"),
            ProfileEdit {
                password: Some("Changed456".to_string()),
                ..ProfileEdit::default()
            },
        )
        .await
        .unwrap();

    let state = remote.state();
    let stored = state.users.get(1).unwrap();
    assert_eq!(stored["password"], "Changed456");
    assert_eq!(stored["name"], "Omar");
    assert_eq!(stored["email"], "omar@example.com");
}

#[tokio::test]
async fn test_edit_unknown_user() {
    let remote = remote_with_users().await;
    let records = remote.records().unwrap();

    let err = records
        .edit_user(
            &UserId::new("404"),
            ProfileEdit {
                name: Some("Nobody".to_string()),
                ..ProfileEdit::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::NotFound(_)));
    assert_eq!(remote.state().write_requests, 0);
}

#[tokio::test]
async fn test_rejected_edit_leaves_record() {
    let remote = remote_with_users().await;
    let records = remote.records().unwrap();
    remote.state().fail_writes = true;

    let err = records
        .edit_user(
            &UserId::new("12"),
            ProfileEdit {
                email: Some("sara.ali@example.com".to_string()),
                ..ProfileEdit::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::RemoteRejected { status: 500, .. }));
    assert_eq!(
        remote.state().users.first().unwrap()["email"],
        "sara@example.com"
    );
}

#[tokio::test]
async fn test_delete_user() {
    let remote = remote_with_users().await;
    let records = remote.records().unwrap();

    records.delete_user(&UserId::new("13")).await.unwrap();

    assert_eq!(remote.state().users.len(), 1);
    let err = records.get_user(&UserId::new("13")).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}
