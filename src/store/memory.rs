//! src/store/memory.rs
use crate::store::{CreateError, CredentialStore, DuplicateField, Identity, StoreError};
use chrono::Utc;
use secrecy::Secret;
use std::sync::Mutex;
use uuid::Uuid;

/// A mutex-guarded credential store, used to exercise the authentication
/// flows without a database at hand. The lock spans the uniqueness check
/// and the insert, so concurrent registrations observe the same atomic
/// create-or-duplicate behaviour as the Postgres store.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    identities: Mutex<Vec<Identity>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn identity_count(&self) -> usize {
        self.identities.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn create(
        &self,
        username: &str,
        email: &str,
        password_hash: Secret<String>,
    ) -> Result<Identity, CreateError> {
        let mut identities = self.identities.lock().unwrap();
        if identities.iter().any(|i| i.username == username) {
            return Err(CreateError::DuplicateKey(DuplicateField::Username));
        }
        if identities.iter().any(|i| i.email == email) {
            return Err(CreateError::DuplicateKey(DuplicateField::Email));
        }
        let identity = Identity {
            id: Uuid::new_v4(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
            created_at: Utc::now(),
        };
        identities.push(identity.clone());
        Ok(identity)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError> {
        let identities = self.identities.lock().unwrap();
        Ok(identities.iter().find(|i| i.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Identity>, StoreError> {
        let identities = self.identities.lock().unwrap();
        Ok(identities.iter().find(|i| i.id == id).cloned())
    }
}
