//! tests/api/logout.rs
use crate::helpers::{assert_is_redirect_to, spawn_app};
use serde_json::json;

#[tokio::test]
async fn you_should_be_redirected_to_login_on_logout_with_success_message() {
    let app = spawn_app().await;

    let response = app
        .post_login(&json!(
            {
                "email": app.user.email,
                "password": app.user.password
            }
        ))
        .await;

    assert_is_redirect_to(&response, &format!("/profile/{}", app.user.user_id));

    let response = app.get_logout().await;

    assert_is_redirect_to(&response, "/login");

    let page_html = app.get_login_html().await;

    assert!(page_html.contains("You have successfully logged out."));
}

#[tokio::test]
async fn you_should_lose_access_to_your_profile_after_logout() {
    let app = spawn_app().await;

    let response = app
        .post_login(&json!(
            {
                "email": app.user.email,
                "password": app.user.password
            }
        ))
        .await;

    assert_is_redirect_to(&response, &format!("/profile/{}", app.user.user_id));

    let response = app.get_logout().await;

    assert_is_redirect_to(&response, "/login");

    let response = app.get_profile(app.user.user_id).await;

    assert_is_redirect_to(&response, "/login");
}

#[tokio::test]
async fn logging_out_an_anonymous_session_still_succeeds() {
    let app = spawn_app().await;

    let response = app.get_logout().await;

    assert_is_redirect_to(&response, "/login");
}
