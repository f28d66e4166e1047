//! Periphery deploy tools
//!
//! Resolves which environment a deployment targets and loads its deploy
//! config record.

pub mod settings;

pub use settings::{EnvOverrides, RecordSource, Settings, SettingsError};
