//! src/routes/register/mod.rs

mod get;
mod post;

pub use get::register_form;
pub use post::register;
