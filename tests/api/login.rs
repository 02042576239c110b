//! tests/api/login.rs
use crate::helpers::{assert_is_redirect_to, spawn_app, spawn_app_with_secret};
use secrecy::Secret;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn error_flash_should_be_set_on_failed_login_attempt() {
    // Arrange
    let app = spawn_app().await;

    let body = json!({
        "email": app.user.email,
        "password": "wrong-password"
    });

    // Act 1 - POST with invalid credentials
    let response = app.post_login(&body).await;
    assert_is_redirect_to(&response, "/login");

    // Act 2 - Get the login page and assert the flash message is present
    let html_page = app.get_login_html().await;
    assert!(html_page.contains(r#"<p><i>Invalid email or password.</i></p>"#));

    // Act 3 - Get the login page again and assert the message is gone
    let html_page = app.get_login_html().await;
    assert!(!html_page.contains(r#"<p><i>Invalid email or password.</i></p>"#));
}

#[tokio::test]
async fn an_unknown_email_produces_the_same_error_as_a_wrong_password() {
    let app = spawn_app().await;

    let response = app
        .post_login(&json!({
            "email": "nouser@example.com",
            "password": "anything-at-all"
        }))
        .await;
    assert_is_redirect_to(&response, "/login");

    let html_page = app.get_login_html().await;
    assert!(html_page.contains(r#"<p><i>Invalid email or password.</i></p>"#));
}

#[tokio::test]
async fn redirect_to_own_profile_on_login_success() {
    let app = spawn_app().await;

    let body = json!({
        "email": app.user.email,
        "password": app.user.password
    });

    let response = app.post_login(&body).await;
    assert_is_redirect_to(&response, &format!("/profile/{}", app.user.user_id));

    let html_page = app.get_profile_html(app.user.user_id).await;

    assert!(html_page.contains(&format!("Welcome {}!", app.user.username)));
}

#[tokio::test]
async fn the_login_form_redirects_authenticated_users_to_their_profile() {
    let app = spawn_app().await;

    let response = app
        .post_login(&json!({
            "email": app.user.email,
            "password": app.user.password
        }))
        .await;
    assert_is_redirect_to(&response, &format!("/profile/{}", app.user.user_id));

    // The session cookie is in the jar; the form is no longer reachable.
    let response = app.get_login().await;
    assert_is_redirect_to(&response, &format!("/profile/{}", app.user.user_id));
}

#[tokio::test]
async fn a_session_bound_to_a_vanished_identity_gets_the_forms_not_a_redirect_loop() {
    // Two instances share the signing key, so a cookie minted by the first
    // is valid on the second, whose store has never seen the user. That is
    // the shape of a store reset underneath a surviving session.
    let hmac_secret = Secret::new(format!("{}{}", Uuid::new_v4(), Uuid::new_v4()));
    let app = spawn_app_with_secret(hmac_secret.clone()).await;
    let fresh = spawn_app_with_secret(hmac_secret).await;

    // Cookies are keyed by host, not port; one jar spans both instances.
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .cookie_store(true)
        .build()
        .unwrap();
    let response = client
        .post(format!("{}/login", app.address))
        .form(&json!({
            "email": app.user.email,
            "password": app.user.password
        }))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(response.status().as_u16(), 303);

    // The stale binding must not bounce the forms towards a profile that
    // itself bounces back.
    let response = client
        .get(format!("{}/login", fresh.address))
        .send()
        .await
        .expect("Failed to execute request.");
    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/register", fresh.address))
        .send()
        .await
        .expect("Failed to execute request.");
    assert!(response.status().is_success());

    // The profile itself sends the stale session back to the login form,
    // which renders rather than redirecting again.
    let response = client
        .get(format!("{}/profile/{}", fresh.address, app.user.user_id))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_is_redirect_to(&response, "/login");

    let response = client
        .get(format!("{}/login", fresh.address))
        .send()
        .await
        .expect("Failed to execute request.");
    assert!(response.status().is_success());
}
