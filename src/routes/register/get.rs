//! src/routes/register/get.rs
use crate::authentication::{AuthService, CurrentUser};
use crate::session_state::TypedSession;
use crate::utils::{e500, see_other};
use actix_web::{HttpResponse, http::header::ContentType, web};
use actix_web_flash_messages::IncomingFlashMessages;
use std::fmt::Write;

pub async fn register_form(
    session: TypedSession,
    auth: web::Data<AuthService>,
    flash_messages: IncomingFlashMessages,
) -> Result<HttpResponse, actix_web::Error> {
    // Same store-backed guard as the login form; stale bindings see the form.
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
  <title>Register</title>
</head>
<body>
    <h1>Register</h1>
    {msg_html}
    <form action="/register" method="post">
      <label for="username">Name
        <input type="text" name="username" placeholder="Enter username">
      </label>
      <br />
      <label for="email">Email
        <input type="text" name="email" placeholder="Enter email">
      </label>
      <br />
      <label for="password">Password
      <input type="password" name="password" placeholder="Enter password">
      </label>
      <br />
      <label for="password_confirmation">Repeat password
      <input type="password" name="password_confirmation" placeholder="Enter the password again">
      </label>
      <button type="submit">Register</button>
     </form>
    <p>Already registered? <a href="/login">Login</a></p>
</body>
</html>"#
        )))
}
