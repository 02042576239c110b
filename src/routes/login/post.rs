//! src/routes/login/post.rs
use crate::authentication::{AuthService, LoginError};
use crate::session_state::TypedSession;
use crate::utils::see_other;
use actix_web::error::InternalError;
use actix_web::{HttpResponse, web};
use actix_web_flash_messages::FlashMessage;
use secrecy::Secret;

#[derive(serde::Deserialize)]
pub struct FormData {
    email: String,
    password: Secret<String>,
}

#[tracing::instrument(
    name = "Handle login",
    skip(form, auth, session),
    fields(email = %form.email, user_id = tracing::field::Empty)
)]
pub async fn login(
    web::Form(form): web::Form<FormData>,
    auth: web::Data<AuthService>,
    session: TypedSession,
) -> Result<HttpResponse, InternalError<LoginError>> {
    match auth.login(&session, &form.email, form.password).await {
        Ok(identity) => {
            tracing::Span::current().record("user_id", tracing::field::display(&identity.id));
            Ok(see_other(&format!("/profile/{}", identity.id)))
        }
        Err(e) => {
            match &e {
                LoginError::InvalidCredentials(_) => {
                    FlashMessage::error(e.to_string()).send();
                }
                LoginError::UnexpectedError(_) => {
                    tracing::error!("{e:?}");
                    FlashMessage::error("Something went wrong, please try again.").send();
                }
            }
            Err(InternalError::from_response(e, see_other("/login")))
        }
    }
}
