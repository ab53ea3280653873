//! Configuration module

pub mod settings;

pub use settings::{BackendEndpoint, BackendsSettings, LoggingConfig, ServerConfig, Settings};
