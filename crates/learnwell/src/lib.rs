pub mod config;
pub mod courses;
pub mod error;
pub mod profiles;
pub mod telemetry;
