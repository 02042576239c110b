//! src/authentication/password.rs
use anyhow::Context;
use argon2::password_hash::SaltString;
use argon2::{Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier};
use secrecy::{ExposeSecret, Secret};

/// One-way, salted transform of a raw password into a PHC-format string.
#[tracing::instrument(name = "Compute password hash", skip(password))]
pub fn compute_password_hash(password: Secret<String>) -> Result<Secret<String>, anyhow::Error> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let password_hash = Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        Params::new(15000, 2, 1, None).context("Failed to build Argon2 parameters.")?,
    )
    .hash_password(password.expose_secret().as_bytes(), &salt)
    .context("Failed to hash password.")?
    .to_string();
    Ok(Secret::new(password_hash))
}

/// Returns true iff `password_candidate` produced `expected_password_hash`.
/// A malformed stored hash is treated as a non-match, never an error.
#[tracing::instrument(name = "Verify password hash", skip_all)]
pub fn verify_password_hash(
    expected_password_hash: Secret<String>,
    password_candidate: Secret<String>,
) -> bool {
    let expected_password_hash = match PasswordHash::new(expected_password_hash.expose_secret()) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::warn!(
                error.cause_chain = ?e,
                "Failed to parse stored password hash in PHC format. Rejecting the candidate."
            );
            return false;
        }
    };
    Argon2::default()
        .verify_password(
            password_candidate.expose_secret().as_bytes(),
            &expected_password_hash,
        )
        .is_ok()
}
