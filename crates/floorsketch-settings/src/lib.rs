//! floorsketch Settings Crate
//!
//! Handles application configuration: file formats, validation and the
//! mapping from configuration to sketch session options.

pub mod config;
pub mod error;

pub use config::{Config, SurfaceSettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
