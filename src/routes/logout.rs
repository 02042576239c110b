//! src/routes/logout.rs
use crate::authentication::AuthService;
use crate::session_state::TypedSession;
use crate::utils::see_other;
use actix_web::{HttpResponse, web};
use actix_web_flash_messages::FlashMessage;

/// Always succeeds, even for a session that was never authenticated.
pub async fn logout(session: TypedSession, auth: web::Data<AuthService>) -> HttpResponse {
    auth.logout(&session);
    FlashMessage::info("You have successfully logged out.").send();
    see_other("/login")
}
