//! Receipt scoring service core: rule engine, score store, and HTTP router.

pub mod config;
pub mod error;
pub mod receipts;
pub mod telemetry;
