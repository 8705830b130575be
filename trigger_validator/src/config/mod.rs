//! Configuration module for the trigger validator
//! Automatically uses generated constants from TOML configuration

// Include generated constants from build.rs
// This file is generated at compile time from the selected TOML profile
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

// Fixed domain constants (time units, precisions) and runtime preferences
pub mod constants;
pub mod runtime;

pub use runtime::{ConfigError, LoggingPreferences, RuntimeConfig, ValidatorPreferences};

/// Build information and configuration metadata
pub mod build_info {
    /// Returns the configuration profile used during build
    pub fn profile() -> &'static str {
        option_env!("TRIGGER_BUILD_PROFILE").unwrap_or("development")
    }

    /// Returns the configuration directory used during build
    pub fn config_dir() -> &'static str {
        option_env!("TRIGGER_CONFIG_DIR").unwrap_or("config")
    }

    /// Returns configuration source information
    pub fn source_info() -> String {
        format!("Generated from {}/{}.toml", config_dir(), profile())
    }
}
