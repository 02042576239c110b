//! src/routes/mod.rs

mod databases;
mod health_check;
mod home;
mod login;
mod logout;
mod pages;
mod profile;
mod register;

pub use databases::{databases, show_database};
pub use health_check::health_check;
pub use home::home;
pub use login::{login, login_form};
pub use logout::logout;
pub use pages::{about, contact};
pub use profile::profile;
pub use register::{register, register_form};
