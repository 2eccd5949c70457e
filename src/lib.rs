pub mod config;
pub mod dispatcher;
pub mod error;
pub mod payload;
pub mod telemetry;
