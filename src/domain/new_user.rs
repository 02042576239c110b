//! src/domain/new_user.rs
use crate::domain::{UserEmail, UserName, UserPassword};
use secrecy::{ExposeSecret, Secret};

/// Raw registration input, exactly as submitted by the client.
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: Secret<String>,
    pub password_confirmation: Secret<String>,
}

#[derive(Debug)]
pub struct NewUser {
    pub username: UserName,
    pub email: UserEmail,
    pub password: UserPassword,
}

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("The passwords do not match.")]
    PasswordMismatch,
    #[error("{0}")]
    Username(String),
    #[error("{0}")]
    Email(String),
    #[error("{0}")]
    Password(String),
}

impl TryFrom<Registration> for NewUser {
    type Error = ValidationError;

    fn try_from(registration: Registration) -> Result<Self, Self::Error> {
        // The mismatch check runs before any field parsing.
        if registration.password.expose_secret()
            != registration.password_confirmation.expose_secret()
        {
            return Err(ValidationError::PasswordMismatch);
        }
        let username = UserName::parse(registration.username).map_err(ValidationError::Username)?;
        let email = UserEmail::parse(registration.email).map_err(ValidationError::Email)?;
        let password =
            UserPassword::parse(registration.password).map_err(ValidationError::Password)?;
        Ok(NewUser {
            username,
            email,
            password,
        })
    }
}
