//! Configuration for decoding and style resolution

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::{Color, Rgb};
use crate::parser::DecoderConfig;

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Colors used to resolve style handles
    pub palette: ColorPalette,
    /// Decoder settings
    pub decoder: DecoderConfig,
    /// `tracing` filter used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            palette: ColorPalette::default(),
            decoder: DecoderConfig::default(),
            log_filter: "warn".to_string(),
        }
    }
}

/// Color palette configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorPalette {
    /// Default foreground color
    pub foreground: Rgb,
    /// Default background color
    pub background: Rgb,
    /// The 16 ANSI colors (0-15)
    pub ansi: [Rgb; 16],
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            foreground: Rgb::new(229, 229, 229),
            background: Rgb::new(0, 0, 0),
            // Default ANSI colors (similar to xterm)
            ansi: [
                Rgb::new(0, 0, 0),       // 0: Black
                Rgb::new(205, 0, 0),     // 1: Red
                Rgb::new(0, 205, 0),     // 2: Green
                Rgb::new(205, 205, 0),   // 3: Yellow
                Rgb::new(0, 0, 238),     // 4: Blue
                Rgb::new(205, 0, 205),   // 5: Magenta
                Rgb::new(0, 205, 205),   // 6: Cyan
                Rgb::new(229, 229, 229), // 7: White
                Rgb::new(127, 127, 127), // 8: Bright Black
                Rgb::new(255, 0, 0),     // 9: Bright Red
                Rgb::new(0, 255, 0),     // 10: Bright Green
                Rgb::new(255, 255, 0),   // 11: Bright Yellow
                Rgb::new(92, 92, 255),   // 12: Bright Blue
                Rgb::new(255, 0, 255),   // 13: Bright Magenta
                Rgb::new(0, 255, 255),   // 14: Bright Cyan
                Rgb::new(255, 255, 255), // 15: Bright White
            ],
        }
    }
}

impl ColorPalette {
    /// Concrete color, or `None` for the default color
    pub fn resolve(&self, color: Color) -> Option<Rgb> {
        match color {
            Color::Default => None,
            Color::Indexed(i) => self.ansi.get(usize::from(i)).copied(),
            other => other.fixed_rgb(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from default location or return default config
    pub fn load_or_default() -> Self {
        let Some(path) = default_config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load(&path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %path.display(), "ignoring config: {err}");
                Self::default()
            }
        }
    }
}

/// `~/.config/sgr-console/config.json`
pub fn default_config_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| {
        PathBuf::from(home)
            .join(".config")
            .join("sgr-console")
            .join("config.json")
    })
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
