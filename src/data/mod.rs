//! Configuration data
//!
//! The clock configuration value and its RON loader, allowing the clock
//! to be tuned without recompiling.

pub mod config;
pub mod loader;

pub use config::{ClockConfig, ConfigError, DebugConfig, DisplayConfig, MovementConfig, Resolution};
pub use loader::{export_default_config, load_config, read_config, DEFAULT_CONFIG_PATH};
