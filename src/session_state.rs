//! src/session_state.rs
use actix_session::{Session, SessionExt};
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use std::future::{Ready, ready};
use uuid::Uuid;

/// Associates the opaque, transport-provided session with at most one
/// identity id. Every new session starts anonymous.
pub trait IdentityBinder {
    /// Binds the session to `user_id`, overwriting any previous binding.
    fn establish(&self, user_id: Uuid) -> Result<(), anyhow::Error>;

    /// The identity id currently bound to the session, if any. Fail-closed:
    /// a session state that cannot be read resolves to `None`.
    fn bound_id(&self) -> Option<Uuid>;

    /// Removes the binding. Idempotent.
    fn clear(&self);
}

pub struct TypedSession(Session);

impl TypedSession {
    const USER_ID_KEY: &'static str = "user_id";
}

impl IdentityBinder for TypedSession {
    fn establish(&self, user_id: Uuid) -> Result<(), anyhow::Error> {
        // Rotate the session cookie on every (re-)login.
        self.0.renew();
        self.0
            .insert(Self::USER_ID_KEY, user_id)
            .map_err(anyhow::Error::from)
    }

    fn bound_id(&self) -> Option<Uuid> {
        match self.0.get(Self::USER_ID_KEY) {
            Ok(user_id) => user_id,
            Err(e) => {
                tracing::warn!(
                    error.cause_chain = ?e,
                    "Failed to deserialize the session state. Treating the session as anonymous."
                );
                None
            }
        }
    }

    fn clear(&self) {
        self.0.purge();
    }
}

impl FromRequest for TypedSession {
    // Same error as the `Session` extractor it wraps.
    type Error = <Session as FromRequest>::Error;
    type Future = Ready<Result<TypedSession, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(TypedSession(req.get_session())))
    }
}
