//! src/domain/mod.rs

mod new_user;
mod user_email;
mod user_name;
mod user_password;

pub use new_user::{NewUser, Registration, ValidationError};
pub use user_email::UserEmail;
pub use user_name::UserName;
pub use user_password::UserPassword;
