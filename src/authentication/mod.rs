//! src/authentication/mod.rs

mod middleware;
mod password;
mod service;
pub use middleware::UserId;
pub use middleware::reject_anonymous_users;
pub use password::*;
pub use service::*;
