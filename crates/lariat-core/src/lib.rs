//! lariat-core — shared configuration for the Lariat demo harness.

pub mod config;

pub use config::{ConfigError, ConfigResult, LariatConfig};
