//! src/store/postgres.rs
use crate::store::{CreateError, CredentialStore, DuplicateField, Identity, StoreError};
use anyhow::Context;
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use sqlx::PgPool;
use uuid::Uuid;

pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct IdentityRow {
    user_id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl From<IdentityRow> for Identity {
    fn from(row: IdentityRow) -> Self {
        Identity {
            id: row.user_id,
            username: row.username,
            email: row.email,
            password_hash: Secret::new(row.password_hash),
            created_at: row.created_at,
        }
    }
}

#[async_trait::async_trait]
impl CredentialStore for PgCredentialStore {
    #[tracing::instrument(name = "Insert new user in the database", skip(self, password_hash))]
    async fn create(
        &self,
        username: &str,
        email: &str,
        password_hash: Secret<String>,
    ) -> Result<Identity, CreateError> {
        let id = Uuid::new_v4();
        let created_at = Utc::now();
        sqlx::query(
            r#"
INSERT INTO users (user_id, username, email, password_hash, created_at)
VALUES ($1, $2, $3, $4, $5)
"#,
        )
        .bind(id)
        .bind(username)
        .bind(email)
        .bind(password_hash.expose_secret())
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(into_create_error)?;
        Ok(Identity {
            id,
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
            created_at,
        })
    }

    #[tracing::instrument(name = "Fetch user by email", skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError> {
        let row = sqlx::query_as::<_, IdentityRow>(
            r#"
SELECT user_id, username, email, password_hash, created_at
FROM users
WHERE email = $1
"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to perform a query to retrieve a user by email.")
        .map_err(StoreError)?;
        Ok(row.map(Identity::from))
    }

    #[tracing::instrument(name = "Fetch user by id", skip(self))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Identity>, StoreError> {
        let row = sqlx::query_as::<_, IdentityRow>(
            r#"
SELECT user_id, username, email, password_hash, created_at
FROM users
WHERE user_id = $1
"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to perform a query to retrieve a user by id.")
        .map_err(StoreError)?;
        Ok(row.map(Identity::from))
    }
}

/// The unique constraints on `users` carry the uniqueness guarantee under
/// concurrent inserts; everything else is an infrastructure failure.
fn into_create_error(e: sqlx::Error) -> CreateError {
    match &e {
        sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
            let field = match db_error.constraint() {
                Some("users_email_key") => DuplicateField::Email,
                _ => DuplicateField::Username,
            };
            CreateError::DuplicateKey(field)
        }
        _ => CreateError::Store(StoreError(
            anyhow::Error::from(e).context("Failed to insert new user in the database."),
        )),
    }
}
