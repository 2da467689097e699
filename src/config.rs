//! # Configuration Management
//!
//! This module handles loading and saving the face configuration from
//! `fiftyeight.toml`. The face itself never reads the file: the caller loads a
//! [`Config`] once, hands the [`ConfigFlags`] to the face, and replaces the
//! whole record between ticks when settings change.

use crate::classify::Ruleset;
use crate::widgets::WidgetType;
use crate::ScreenBounds;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Default configuration file, looked up in the working directory.
pub const CONFIG_FILE: &str = "fiftyeight.toml";

pub const DEFAULT_STEP_GOAL: u32 = 10_000;

/// Largest accepted display side, in pixels.
pub const MAX_DISPLAY_SIDE: i32 = 4096;

/// Errors raised while reading or writing the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config IO: {0}")]
    Io(#[from] io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config serialization: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Application configuration loaded from fiftyeight.toml
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Face behaviour, read by every tick
    pub face: ConfigFlags,
    /// Surface dimensions
    pub display: DisplayConfig,
}

/// Settings the face reads at the start of each tick.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ConfigFlags {
    /// Light glyphs on a dark background
    pub dark_mode: bool,
    /// 24-hour readout; also hides the AM/PM widget
    pub use_24h: bool,
    /// "MO" instead of "MON"
    pub two_letter_day: bool,
    pub show_second_dot: bool,
    pub show_hour_minute_dots: bool,
    /// Replace the clock with the synthetic debug table
    pub debug_mode: bool,
    /// Raise log verbosity to debug
    pub debug_logging: bool,
    pub top_left_widget: WidgetType,
    pub top_right_widget: WidgetType,
    /// Steps per day that fill the step widget
    pub step_goal: u32,
    /// Digit width rule table
    pub ruleset: Ruleset,
}

impl Default for ConfigFlags {
    fn default() -> Self {
        ConfigFlags {
            dark_mode: false,
            use_24h: false,
            two_letter_day: false,
            show_second_dot: false,
            show_hour_minute_dots: true,
            debug_mode: false,
            debug_logging: false,
            top_left_widget: WidgetType::DayDate,
            top_right_widget: WidgetType::Battery,
            step_goal: DEFAULT_STEP_GOAL,
            ruleset: Ruleset::Refined,
        }
    }
}

impl ConfigFlags {
    /// Replace values the face cannot use with their defaults.
    pub fn sanitized(mut self) -> Self {
        if self.step_goal == 0 {
            warn!(
                "Ignoring step goal of 0, keeping {}",
                DEFAULT_STEP_GOAL
            );
            self.step_goal = DEFAULT_STEP_GOAL;
        }
        self
    }
}

/// Drawable surface configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Display width in pixels
    pub width: i32,
    /// Display height in pixels
    pub height: i32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            width: 144,  // Pebble rectangular screen
            height: 168, // Pebble rectangular screen
        }
    }
}

impl DisplayConfig {
    pub fn screen(&self) -> ScreenBounds {
        ScreenBounds::new(self.width, self.height)
    }

    fn sanitized(self) -> Self {
        let in_range = |side: i32| (1..=MAX_DISPLAY_SIDE).contains(&side);
        if !in_range(self.width) || !in_range(self.height) {
            warn!(
                "Ignoring display size {}x{}, using default",
                self.width, self.height
            );
            return Self::default();
        }
        self
    }
}

impl Config {
    /// Load configuration from fiftyeight.toml
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_FILE)
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        Self::or_default(Self::try_load_from_path(path))
    }

    /// Load configuration, reporting why it could not be read.
    pub fn try_load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config.sanitized())
    }

    /// Turn a load result into a usable configuration, logging any fallback.
    pub fn or_default(loaded: Result<Self, ConfigError>) -> Self {
        match loaded {
            Ok(config) => {
                info!(
                    "Loaded configuration: widgets {:?}/{:?}, ruleset {:?}",
                    config.face.top_left_widget, config.face.top_right_widget, config.face.ruleset
                );
                config
            }
            Err(ConfigError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                info!("No config file found, using default configuration");
                Self::default()
            }
            Err(e) => {
                warn!("{}", e);
                warn!("Using default configuration");
                Self::default()
            }
        }
    }

    /// Save current configuration to `path`
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(&path, contents)?;
        info!("Configuration saved to {}", path.as_ref().display());
        Ok(())
    }

    pub fn sanitized(self) -> Self {
        Config {
            face: self.face.sanitized(),
            display: self.display.sanitized(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.face.dark_mode);
        assert!(!config.face.use_24h);
        assert!(config.face.show_hour_minute_dots);
        assert!(!config.face.show_second_dot);
        assert_eq!(config.face.top_left_widget, WidgetType::DayDate);
        assert_eq!(config.face.top_right_widget, WidgetType::Battery);
        assert_eq!(config.face.step_goal, 10_000);
        assert_eq!(config.display.screen(), ScreenBounds::new(144, 168));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.face.ruleset = Ruleset::Compact;
        config.face.top_left_widget = WidgetType::AmPm;
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let parsed: Config = toml::from_str(
            r#"
[face]
dark_mode = true
top_right_widget = "steps"
"#,
        )
        .unwrap();
        assert!(parsed.face.dark_mode);
        assert_eq!(parsed.face.top_right_widget, WidgetType::Steps);
        assert_eq!(parsed.face.top_left_widget, WidgetType::DayDate);
        assert_eq!(parsed.display.width, 144);
    }

    #[test]
    fn test_sanitize_rejects_unusable_values() {
        let mut config = Config::default();
        config.face.step_goal = 0;
        config.display.width = -5;
        let clean = config.sanitized();
        assert_eq!(clean.face.step_goal, DEFAULT_STEP_GOAL);
        assert_eq!(clean.display, DisplayConfig::default());
    }

    #[test]
    fn test_sanitize_rejects_oversized_display() {
        let mut config = Config::default();
        config.display.width = 70_000;
        config.display.height = 70_000;
        assert_eq!(config.clone().sanitized().display, DisplayConfig::default());

        config.display.width = MAX_DISPLAY_SIDE;
        config.display.height = MAX_DISPLAY_SIDE;
        assert_eq!(config.clone().sanitized().display, config.display);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let config = Config::load_from_path("/nonexistent/path");
        // Should fallback to default
        assert_eq!(config, Config::default());
        assert!(matches!(
            Config::try_load_from_path("/nonexistent/path"),
            Err(ConfigError::Io(_))
        ));
    }
}
