//! src/store/mod.rs

mod memory;
mod postgres;

pub use memory::InMemoryCredentialStore;
pub use postgres::PgCredentialStore;

use chrono::{DateTime, Utc};
use secrecy::Secret;
use uuid::Uuid;

/// A persisted user account record.
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: Secret<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateField {
    Username,
    Email,
}

impl std::fmt::Display for DuplicateField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            DuplicateField::Username => "username",
            DuplicateField::Email => "email",
        })
    }
}

/// An infrastructure failure in the underlying storage layer.
#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub struct StoreError(#[from] pub anyhow::Error);

#[derive(thiserror::Error, Debug)]
pub enum CreateError {
    #[error("That {0} is already taken.")]
    DuplicateKey(DuplicateField),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Owns the durable representation of identities and enforces the
/// uniqueness of usernames and emails.
#[async_trait::async_trait]
pub trait CredentialStore: Send + Sync {
    /// Persists a new identity. Atomic: either the full record becomes
    /// visible to subsequent reads or nothing does. Two concurrent calls
    /// with the same username or email yield exactly one success, the
    /// other observes `CreateError::DuplicateKey`.
    async fn create(
        &self,
        username: &str,
        email: &str,
        password_hash: Secret<String>,
    ) -> Result<Identity, CreateError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Identity>, StoreError>;
}
