//! Game settings
//!
//! Playfield and entity dimensions. On the web the canvas size wins over the
//! configured field size; everything else may come from a `data-settings`
//! JSON attribute on the canvas.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid settings json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    pub field_width: f32,
    pub field_height: f32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    /// Pixels per second
    pub player_speed: f32,

    // === Blocks ===
    pub block_width: f32,
    pub block_height: f32,
    pub block_count: usize,

    /// Fixed RNG seed; a fresh one is drawn per run when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_speed: PLAYER_SPEED,
            block_width: BLOCK_WIDTH,
            block_height: BLOCK_HEIGHT,
            block_count: BLOCK_COUNT,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON (missing keys fall back to defaults) and validate them
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings = Self::parse_json(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parse settings from JSON without validating them
    pub fn parse_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Settings for a canvas of the given size. The canvas dimensions replace
    /// any configured field size before validation.
    pub fn for_canvas(json: Option<&str>, width: f32, height: f32) -> Result<Self, SettingsError> {
        let base = match json {
            Some(json) => Self::parse_json(json)?,
            None => Self::default(),
        };
        let settings = base.with_field_size(width, height);
        settings.validate()?;
        Ok(settings)
    }

    /// Replace the playfield size (used with the canvas dimensions)
    pub fn with_field_size(mut self, width: f32, height: f32) -> Self {
        self.field_width = width;
        self.field_height = height;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject configurations the simulation cannot run on
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("block_width", self.block_width),
            ("block_height", self.block_height),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(SettingsError::Invalid {
                    field,
                    reason: "must be a positive number",
                });
            }
        }

        if !self.player_speed.is_finite() || self.player_speed < 0.0 {
            return Err(SettingsError::Invalid {
                field: "player_speed",
                reason: "must be zero or positive",
            });
        }

        // Spawn column range [0, field_width - block_width) must be non-empty
        if self.field_width <= self.block_width {
            return Err(SettingsError::Invalid {
                field: "block_width",
                reason: "must be smaller than the field width",
            });
        }

        if self.player_width > self.field_width || self.player_height > self.field_height {
            return Err(SettingsError::Invalid {
                field: "player_width/player_height",
                reason: "player must fit inside the field",
            });
        }

        if self.block_count == 0 {
            return Err(SettingsError::Invalid {
                field: "block_count",
                reason: "at least one block is required",
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.block_count, 8);
        assert_eq!(settings.player_speed, 480.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "block_count": 3, "seed": 7 }"#).unwrap();
        assert_eq!(settings.block_count, 3);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.field_width, FIELD_WIDTH);
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_rejects_block_wider_than_field() {
        let err = Settings::from_json(r#"{ "field_width": 30.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Invalid {
                field: "block_width",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_zero_blocks() {
        let settings = Settings {
            block_count: 0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_canvas_size_override() {
        let settings = Settings::default().with_field_size(800.0, 600.0);
        assert_eq!(settings.field_width, 800.0);
        assert_eq!(settings.field_height, 600.0);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_canvas_size_applies_before_validation() {
        // Too wide for the default 480 px field, fine on an 800 px canvas
        let json = r#"{ "block_width": 500.0, "block_count": 2 }"#;
        assert!(Settings::from_json(json).is_err());

        let settings = Settings::for_canvas(Some(json), 800.0, 600.0).unwrap();
        assert_eq!(settings.block_width, 500.0);
        assert_eq!(settings.block_count, 2);
        assert_eq!(settings.field_width, 800.0);
        assert_eq!(settings.field_height, 600.0);
    }

    #[test]
    fn test_canvas_size_overrides_configured_field() {
        let json = r#"{ "field_width": 30.0, "field_height": 30.0 }"#;
        let settings = Settings::for_canvas(Some(json), 480.0, 640.0).unwrap();
        assert_eq!(settings.field_width, 480.0);
        assert_eq!(settings.field_height, 640.0);
    }

    #[test]
    fn test_canvas_too_small_for_config_is_rejected() {
        let err = Settings::for_canvas(Some(r#"{ "block_width": 500.0 }"#), 400.0, 600.0)
            .unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Invalid {
                field: "block_width",
                ..
            }
        ));
        assert!(Settings::for_canvas(None, 400.0, 600.0).is_ok());
    }
}
