//! Configuration models.

#[cfg(feature = "server")]
pub mod config;
pub mod settings;
