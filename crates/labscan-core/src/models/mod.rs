//! Data models and configuration.

pub mod config;
pub mod parameter;
#[cfg(feature = "native")]
pub mod report;
