//! src/routes/profile.rs
use crate::authentication::{AccessError, AuthService, UserId};
use crate::session_state::{IdentityBinder, TypedSession};
use crate::utils::{e500, see_other};
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, web};
use uuid::Uuid;

/// A profile only ever renders the data of the identity it belongs to.
/// The surrounding middleware guarantees *some* authenticated user; the
/// ownership check against the requested id happens here, explicitly.
#[tracing::instrument(name = "Get profile", skip(session, auth, user_id), fields(user_id = %*user_id))]
pub async fn profile(
    requested_id: web::Path<Uuid>,
    user_id: web::ReqData<UserId>,
    session: TypedSession,
    auth: web::Data<AuthService>,
) -> Result<HttpResponse, actix_web::Error> {
    if *requested_id != **user_id {
        return Ok(HttpResponse::Forbidden()
            .content_type(ContentType::html())
            .body("You are not allowed to view this profile."));
    }
    let identity = match auth.require_authenticated(&session).await {
        Ok(identity) => identity,
        // The binding went stale between the middleware check and here.
        // Purge it so the login form is not redirected back to us.
        Err(AccessError::Unauthorized) => {
            session.clear();
            return Ok(see_other("/login"));
        }
        Err(AccessError::UnexpectedError(e)) => return Err(e500(e)),
    };
    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta http-equiv="content-type" content="text/html; charset=utf-8">
<title>Profile</title>
</head>
<body>
<p>Welcome {}!</p>
<p>Email: {}</p>
<p>Registered on: {}</p>
<p><a href="/logout">Logout</a></p>
</body>
</html>"#,
            identity.username,
            identity.email,
            identity.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
        )))
}
