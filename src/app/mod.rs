//! Application glue module
//!
//! Configuration, logging, and application-level utilities.

mod config;
mod logging;

pub use config::{default_config_path, ColorPalette, Config, ConfigError};
pub use logging::init_logging;
