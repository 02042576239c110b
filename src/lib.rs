//! src/lib.rs

pub mod authentication;
pub mod configuration;
pub mod datasets;
pub mod domain;
pub mod routes;
pub mod session_state;
pub mod startup;
pub mod store;
pub mod telemetry;
pub mod utils;
