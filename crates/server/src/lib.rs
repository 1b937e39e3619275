pub mod envelope;
pub mod errors;
pub mod observability;
pub mod openapi;
pub mod routes;
pub mod startup;

pub use startup::{config_from_env, run};
