//! tests/api/profile.rs
use crate::helpers::{assert_is_redirect_to, spawn_app};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn you_must_be_logged_in_to_access_a_profile() {
    let app = spawn_app().await;

    let response = app.get_profile(app.user.user_id).await;

    assert_is_redirect_to(&response, "/login");
}

#[tokio::test]
async fn your_own_profile_shows_your_account_details() {
    let app = spawn_app().await;
    let response = app
        .post_login(&json!({
            "email": app.user.email,
            "password": app.user.password
        }))
        .await;
    assert_eq!(response.status().as_u16(), 303);

    let html_page = app.get_profile_html(app.user.user_id).await;

    assert!(html_page.contains(&format!("Welcome {}!", app.user.username)));
    assert!(html_page.contains(&app.user.email));
    assert!(html_page.contains("Registered on:"));
    assert!(html_page.contains(r#"<a href="/logout">Logout</a>"#));
}

#[tokio::test]
async fn another_users_profile_is_forbidden_even_when_logged_in() {
    let app = spawn_app().await;
    let other_user = app.seed_user().await;
    let response = app
        .post_login(&json!({
            "email": app.user.email,
            "password": app.user.password
        }))
        .await;
    assert_eq!(response.status().as_u16(), 303);

    let response = app.get_profile(other_user.user_id).await;

    assert_eq!(response.status().as_u16(), 403);
    let html_page = response.text().await.unwrap();
    assert!(!html_page.contains(&other_user.email));
    assert!(!html_page.contains(&other_user.username));
}

#[tokio::test]
async fn a_profile_for_a_nonexistent_id_is_forbidden_too() {
    let app = spawn_app().await;
    let response = app
        .post_login(&json!({
            "email": app.user.email,
            "password": app.user.password
        }))
        .await;
    assert_eq!(response.status().as_u16(), 303);

    let response = app.get_profile(Uuid::new_v4()).await;

    assert_eq!(response.status().as_u16(), 403);
}
