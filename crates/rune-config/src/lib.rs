//! Rune motion configuration
//!
//! This crate loads the animation defaults used by `rune-motion` from
//! `rune.toml`, with environment variables as temporary overrides.
//!
//! ```toml
//! [motion]
//! reduced_motion = false
//! tween_duration_ms = 300.0
//! spring_stiffness = 500.0
//!
//! [viewport]
//! amount = 0.0
//! once = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid TOML for [`RuneConfig`].
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct RuneConfig {
    /// Animation defaults
    pub motion: MotionConfig,
    /// Viewport observer defaults
    pub viewport: ViewportConfig,
}

/// Animation defaults applied when a transition leaves a field unset
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MotionConfig {
    /// Snap transform properties instead of animating them
    pub reduced_motion: bool,
    /// Duration of the default tween in milliseconds
    pub tween_duration_ms: f64,
    /// Duration of keyframe sequences in milliseconds
    pub keyframes_duration_ms: f64,
    /// Spring stiffness for translate/rotate/skew properties
    pub spring_stiffness: f64,
    /// Spring damping for translate/rotate/skew properties
    pub spring_damping: f64,
    /// Spring mass shared by all default springs
    pub spring_mass: f64,
    /// Spring stiffness for scale properties
    pub scale_spring_stiffness: f64,
    /// Spring damping for scale properties
    pub scale_spring_damping: f64,
}

/// Viewport observer configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewportConfig {
    /// Visible fraction that counts as "in view" (0.0 = any pixel, 1.0 = fully visible)
    pub amount: f64,
    /// Report only the first entry/exit cycle
    pub once: bool,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            reduced_motion: false,
            tween_duration_ms: 300.0,
            keyframes_duration_ms: 800.0,
            spring_stiffness: 500.0,
            spring_damping: 25.0,
            spring_mass: 1.0,
            scale_spring_stiffness: 550.0,
            scale_spring_damping: 30.0,
        }
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            amount: 0.0,
            once: false,
        }
    }
}

fn parse_flag(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true")
}

impl RuneConfig {
    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from `rune.toml` in the current directory, or
    /// return the default configuration if it is missing or invalid
    pub fn load_or_default() -> Self {
        Self::load_from_file("rune.toml").unwrap_or_default()
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    pub fn merge_with_env(&mut self) {
        self.merge_with(|name| std::env::var(name).ok());
    }

    /// Merge overrides from an arbitrary variable lookup.
    ///
    /// Recognized variables: `RUNE_REDUCED_MOTION`, `RUNE_TWEEN_MS`,
    /// `RUNE_VIEWPORT_ONCE`. Unparseable numbers are ignored.
    pub fn merge_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("RUNE_REDUCED_MOTION") {
            self.motion.reduced_motion = parse_flag(&val);
        }
        if let Some(val) = lookup("RUNE_TWEEN_MS") {
            if let Ok(ms) = val.parse::<f64>() {
                self.motion.tween_duration_ms = ms;
            }
        }
        if let Some(val) = lookup("RUNE_VIEWPORT_ONCE") {
            self.viewport.once = parse_flag(&val);
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// 1. Load from rune.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = RuneConfig::default();
        assert!(!config.motion.reduced_motion);
        assert_eq!(config.motion.tween_duration_ms, 300.0);
        assert_eq!(config.motion.spring_stiffness, 500.0);
        assert_eq!(config.viewport.amount, 0.0);
        assert!(!config.viewport.once);
    }

    #[test]
    fn test_toml_serialization() {
        let config = RuneConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: RuneConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config = RuneConfig::from_toml_str(
            r#"
            [motion]
            reduced_motion = true
            tween_duration_ms = 120.0

            [viewport]
            once = true
            "#,
        )
        .unwrap();

        assert!(config.motion.reduced_motion);
        assert_eq!(config.motion.tween_duration_ms, 120.0);
        assert_eq!(config.motion.scale_spring_damping, 30.0);
        assert!(config.viewport.once);
        assert_eq!(config.viewport.amount, 0.0);
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let err = RuneConfig::from_toml_str("[motion]\ntween_duration_ms = \"slow\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = RuneConfig::load_from_file("does/not/exist/rune.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_load_or_default() {
        // Should not panic even if rune.toml doesn't exist
        let config = RuneConfig::load_or_default();
        assert!(config.motion.tween_duration_ms > 0.0);
    }

    #[test]
    fn test_merge_with_lookup() {
        let vars: HashMap<&str, &str> = [
            ("RUNE_REDUCED_MOTION", "1"),
            ("RUNE_TWEEN_MS", "not-a-number"),
            ("RUNE_VIEWPORT_ONCE", "TRUE"),
        ]
        .into_iter()
        .collect();

        let mut config = RuneConfig::default();
        config.merge_with(|name| vars.get(name).map(|v| v.to_string()));

        assert!(config.motion.reduced_motion);
        assert_eq!(config.motion.tween_duration_ms, 300.0);
        assert!(config.viewport.once);
    }

    #[test]
    fn test_merge_with_env() {
        unsafe {
            std::env::set_var("RUNE_TWEEN_MS", "450");
        }

        let mut config = RuneConfig::default();
        config.merge_with_env();
        assert_eq!(config.motion.tween_duration_ms, 450.0);

        unsafe {
            std::env::remove_var("RUNE_TWEEN_MS");
        }
    }
}
