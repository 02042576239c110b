//! src/routes/register/post.rs
use crate::authentication::{AuthService, CurrentUser, RegisterError};
use crate::domain::Registration;
use crate::session_state::TypedSession;
use crate::utils::see_other;
use actix_web::error::InternalError;
use actix_web::{HttpResponse, web};
use actix_web_flash_messages::FlashMessage;
use secrecy::Secret;

#[derive(serde::Deserialize)]
pub struct FormData {
    username: String,
    email: String,
    password: Secret<String>,
    password_confirmation: Secret<String>,
}

impl From<FormData> for Registration {
    fn from(form: FormData) -> Self {
        Registration {
            username: form.username,
            email: form.email,
            password: form.password,
            password_confirmation: form.password_confirmation,
        }
    }
}

#[tracing::instrument(
    name = "Handle registration",
    skip(form, auth, session),
    fields(username = %form.username, email = %form.email, user_id = tracing::field::Empty)
)]
pub async fn register(
    web::Form(form): web::Form<FormData>,
    auth: web::Data<AuthService>,
    session: TypedSession,
) -> Result<HttpResponse, InternalError<RegisterError>> {
    // Authenticated visitors go to their profile, same as the form itself;
    // their submission must not mint a second account.
    match auth.current(&session).await {
        Ok(CurrentUser::Authenticated(identity)) => {
            return Ok(see_other(&format!("/profile/{}", identity.id)));
        }
        Ok(CurrentUser::Anonymous) => {}
        Err(e) => {
            let e = RegisterError::Store(e);
            tracing::error!("{e:?}");
            FlashMessage::error("Something went wrong, please try again.").send();
            return Err(InternalError::from_response(e, see_other("/register")));
        }
    }
    match auth.register(&session, form.into()).await {
        Ok(identity) => {
            tracing::Span::current().record("user_id", tracing::field::display(&identity.id));
            Ok(see_other(&format!("/profile/{}", identity.id)))
        }
        Err(e) => {
            match &e {
                // User-correctable failures are shown as submitted.
                RegisterError::Validation(_) | RegisterError::DuplicateKey(_) => {
                    FlashMessage::error(e.to_string()).send();
                }
                // Infrastructure failures are logged and masked behind a
                // generic notice.
                RegisterError::Store(_) | RegisterError::UnexpectedError(_) => {
                    tracing::error!("{e:?}");
                    FlashMessage::error("Something went wrong, please try again.").send();
                }
            }
            Err(InternalError::from_response(e, see_other("/register")))
        }
    }
}
