pub mod config;
pub mod error;
pub mod incentives;
pub mod telemetry;
