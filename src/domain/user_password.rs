//! src/domain/user_password.rs
use secrecy::{ExposeSecret, Secret};

#[derive(Debug)]
pub struct UserPassword(Secret<String>);

impl UserPassword {
    pub fn parse(password: Secret<String>) -> Result<Self, String> {
        let length = password.expose_secret().chars().count();
        if (6..=100).contains(&length) {
            Ok(Self(password))
        } else {
            Err("The password must be between 6 and 100 characters.".to_string())
        }
    }

    pub fn into_inner(self) -> Secret<String> {
        self.0
    }
}

impl std::fmt::Display for UserPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", "*".repeat(self.0.expose_secret().len()))
    }
}
