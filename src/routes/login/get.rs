//! src/routes/login/get.rs
use crate::authentication::{AuthService, CurrentUser};
use crate::session_state::TypedSession;
use crate::utils::{e500, see_other};
use actix_web::{HttpResponse, http::header::ContentType, web};
use actix_web_flash_messages::IncomingFlashMessages;
use std::fmt::Write;

pub async fn login_form(
    session: TypedSession,
    auth: web::Data<AuthService>,
    flash_messages: IncomingFlashMessages,
) -> Result<HttpResponse, actix_web::Error> {
    // Resolved against the store: a binding whose identity no longer
    // exists falls through to the form instead of redirecting.
    if let CurrentUser::Authenticated(identity) = auth.current(&session).await.map_err(e500)? {
        return Ok(see_other(&format!("/profile/{}", identity.id)));
    }

    let mut msg_html = String::new();
    for m in flash_messages.iter() {
        writeln!(msg_html, "<p><i>{}</i></p>", m.content()).unwrap();
    }

    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta http-equiv="content-type" content="text/html; charset=utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Login</title>
</head>
<body>
    <h1>Login</h1>
    {msg_html}
    <form action="/login" method="post">
      <label for="email">Email
        <input type="text" name="email" placeholder="Enter email">
      </label>
      <br />
      <label for="password">Password
      <input type="password" name="password" placeholder="Enter password">
      </label>
      <button type="submit">Login</button>
     </form>
    <p>No account yet? <a href="/register">Register</a></p>
</body>
</html>"#
        )))
}
