//! Session configuration.
//!
//! # Responsibility
//! - Hold host-provided layout values (surface rectangle, header band) and
//!   note defaults.
//! - Load them from JSON with a default for every missing field.
//!
//! # Invariants
//! - A validated config has a finite, non-negative surface and note size.

use crate::geometry::{Size, Surface};
use crate::model::note::Palette;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

const DEFAULT_SURFACE_WIDTH: f64 = 1280.0;
const DEFAULT_SURFACE_HEIGHT: f64 = 720.0;

/// Configuration load/validation failure.
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    InvalidValue { field: &'static str, value: f64 },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid session config: {err}"),
            Self::InvalidValue { field, value } => {
                write!(f, "invalid session config value for `{field}`: {value}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::InvalidValue { .. } => None,
        }
    }
}

/// Layout and default values a board session starts with.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Client rectangle notes are clamped to.
    pub surface: Surface,
    /// Size given to freshly created notes.
    pub default_note_size: Size,
    /// Palette given to freshly created notes.
    pub default_palette: Palette,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            surface: Surface::new(DEFAULT_SURFACE_WIDTH, DEFAULT_SURFACE_HEIGHT),
            default_note_size: Size::default(),
            default_palette: Palette::default(),
        }
    }
}

impl SessionConfig {
    /// Parses and validates a JSON config document.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("surface.width", self.surface.width),
            ("surface.height", self.surface.height),
            ("surface.top_inset", self.surface.top_inset),
            ("default_note_size.height", self.default_note_size.height),
            ("default_note_size.width", self.default_note_size.width),
        ];
        for (field, value) in checks {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }
        Ok(())
    }
}
