//! src/authentication/service.rs
use crate::authentication::password::{compute_password_hash, verify_password_hash};
use crate::domain::{NewUser, Registration, ValidationError};
use crate::session_state::IdentityBinder;
use crate::store::{CreateError, CredentialStore, DuplicateField, Identity, StoreError};
use crate::telemetry::spawn_blocking_with_tracing;
use crate::utils::error_chain_fmt;
use anyhow::Context;
use secrecy::Secret;
use std::sync::Arc;

// Verified whenever the submitted email is unknown, so that the lookup and
// the wrong-password path take the same amount of work.
const FALLBACK_PASSWORD_HASH: &str = "$argon2id$v=19$m=15000,t=2,p=1$\
gZiV/M1gPc22ElAH/Jh1Hw$\
CWOrkoo7oJBQ/iyh7uJ0LO2aLEfrHwTWllSAxT0zRno";

/// Registration and login use cases, composed from the credential store,
/// the password hasher and a per-request session binder.
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
}

#[derive(Debug)]
pub enum CurrentUser {
    Anonymous,
    Authenticated(Identity),
}

#[derive(thiserror::Error)]
pub enum RegisterError {
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("That {0} is already taken.")]
    DuplicateKey(DuplicateField),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for RegisterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[derive(thiserror::Error)]
pub enum LoginError {
    #[error("Invalid email or password.")]
    InvalidCredentials(#[source] anyhow::Error),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for LoginError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[derive(thiserror::Error)]
pub enum AccessError {
    #[error("The user is not logged in.")]
    Unauthorized,
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for AccessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl AuthService {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Validates the submitted fields, persists the new identity and only
    /// then binds the session to it. A crash between the two steps leaves
    /// a registered account with no session, never the other way around.
    #[tracing::instrument(
        name = "Register a new user",
        skip(self, binder, registration),
        fields(username = %registration.username, email = %registration.email)
    )]
    pub async fn register(
        &self,
        binder: &impl IdentityBinder,
        registration: Registration,
    ) -> Result<Identity, RegisterError> {
        let new_user: NewUser = registration.try_into()?;
        let password = new_user.password.into_inner();
        let password_hash = spawn_blocking_with_tracing(move || compute_password_hash(password))
            .await
            .context("Failed to spawn blocking task.")??;

        let identity = self
            .store
            .create(
                new_user.username.as_ref(),
                new_user.email.as_ref(),
                password_hash,
            )
            .await
            .map_err(|e| match e {
                CreateError::DuplicateKey(field) => RegisterError::DuplicateKey(field),
                CreateError::Store(e) => RegisterError::Store(e),
            })?;

        binder
            .establish(identity.id)
            .context("Failed to bind the session to the new user.")?;
        Ok(identity)
    }

    /// Unknown emails and wrong passwords are indistinguishable to the
    /// caller, both in error kind and in the work performed.
    #[tracing::instrument(name = "Log in a user", skip(self, binder, password))]
    pub async fn login(
        &self,
        binder: &impl IdentityBinder,
        email: &str,
        password: Secret<String>,
    ) -> Result<Identity, LoginError> {
        let mut identity = None;
        let mut expected_password_hash = Secret::new(FALLBACK_PASSWORD_HASH.to_string());
        if let Some(stored) = self
            .store
            .find_by_email(email)
            .await
            .map_err(|e| LoginError::UnexpectedError(e.into()))?
        {
            expected_password_hash = stored.password_hash.clone();
            identity = Some(stored);
        }

        let password_is_valid = spawn_blocking_with_tracing(move || {
            verify_password_hash(expected_password_hash, password)
        })
        .await
        .context("Failed to spawn blocking task.")?;

        let identity = identity
            .filter(|_| password_is_valid)
            .ok_or_else(|| LoginError::InvalidCredentials(anyhow::anyhow!("Unknown email or wrong password.")))?;
        binder
            .establish(identity.id)
            .context("Failed to bind the session to the user.")?;
        Ok(identity)
    }

    /// Always succeeds, even for an anonymous session.
    pub fn logout(&self, binder: &impl IdentityBinder) {
        binder.clear();
    }

    /// Resolves the session binding against the credential store. A missing
    /// binding or a binding to a no-longer-existing identity both resolve
    /// to `Anonymous`.
    #[tracing::instrument(name = "Resolve current user", skip(self, binder))]
    pub async fn current(&self, binder: &impl IdentityBinder) -> Result<CurrentUser, StoreError> {
        let Some(user_id) = binder.bound_id() else {
            return Ok(CurrentUser::Anonymous);
        };
        match self.store.find_by_id(user_id).await? {
            Some(identity) => Ok(CurrentUser::Authenticated(identity)),
            None => {
                tracing::warn!("The session is bound to an identity that no longer exists.");
                Ok(CurrentUser::Anonymous)
            }
        }
    }

    /// Guard for protected use cases. Callers gating a per-user resource
    /// must additionally compare the returned identity's id against the
    /// requested one.
    pub async fn require_authenticated(
        &self,
        binder: &impl IdentityBinder,
    ) -> Result<Identity, AccessError> {
        match self
            .current(binder)
            .await
            .map_err(|e| AccessError::UnexpectedError(e.into()))?
        {
            CurrentUser::Authenticated(identity) => Ok(identity),
            CurrentUser::Anonymous => Err(AccessError::Unauthorized),
        }
    }
}
