//! RouterJig Settings Crate
//!
//! Handles joint configuration: default bit and board geometry, spacing
//! policy, fit thresholds and layout margins, persisted as JSON or TOML.

pub mod config;
pub mod error;

pub use config::{
    default_config_path, BitSettings, BoardSettings, Config, FitSettings, LayoutSettings,
    SpacingKind, SpacingSettings, UnitSettings,
};
pub use error::{ConfigError, SettingsError, SettingsResult};
