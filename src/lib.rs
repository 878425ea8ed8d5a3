pub mod configuration;
pub mod db;
pub mod server;
pub mod telemetry;
pub mod transfer;
