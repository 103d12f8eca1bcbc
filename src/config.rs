//! Configuration - TOML-backed settings for the controllers
//!
//! Every field has a default, so an empty document is a valid config.
//!
//! ```toml
//! [carousel]
//! autoplay = true
//! autoplay_delay_ms = 4000
//! drag_threshold_px = 100.0
//!
//! [menu_card]
//! add_feedback_ms = 600
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::carousel::{AutoplayConfig, DEFAULT_AUTOPLAY_DELAY, DEFAULT_DRAG_THRESHOLD};
use crate::error::{ConfigError, Result};
use crate::menu::DEFAULT_ADD_FEEDBACK;

// =============================================================================
// SECTIONS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub autoplay: bool,
    pub autoplay_delay_ms: u64,
    /// Horizontal drag distance (logical px) that counts as a swipe
    pub drag_threshold_px: f32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            autoplay: true,
            autoplay_delay_ms: DEFAULT_AUTOPLAY_DELAY.as_millis() as u64,
            drag_threshold_px: DEFAULT_DRAG_THRESHOLD,
        }
    }
}

impl CarouselConfig {
    pub fn autoplay_config(&self) -> AutoplayConfig {
        AutoplayConfig::new(self.autoplay, Some(self.autoplay_delay_ms))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuCardConfig {
    /// How long the add button stays in its "adding" state
    pub add_feedback_ms: u64,
}

impl Default for MenuCardConfig {
    fn default() -> Self {
        Self {
            add_feedback_ms: DEFAULT_ADD_FEEDBACK.as_millis() as u64,
        }
    }
}

impl MenuCardConfig {
    pub fn add_feedback(&self) -> Duration {
        Duration::from_millis(self.add_feedback_ms)
    }
}

// =============================================================================
// ROOT
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub carousel: CarouselConfig,
    pub menu_card: MenuCardConfig,
}

impl UiConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        log::debug!("loaded ui config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let carousel = &self.carousel;
        if carousel.autoplay && carousel.autoplay_delay_ms == 0 {
            return Err(ConfigError::invalid(
                "carousel.autoplay_delay_ms",
                "must be greater than zero when autoplay is enabled",
            ));
        }
        if !carousel.drag_threshold_px.is_finite() || carousel.drag_threshold_px < 0.0 {
            return Err(ConfigError::invalid(
                "carousel.drag_threshold_px",
                format!("expected a finite, non-negative distance, got {}", carousel.drag_threshold_px),
            ));
        }
        if self.menu_card.add_feedback_ms == 0 {
            return Err(ConfigError::invalid("menu_card.add_feedback_ms", "must be greater than zero"));
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
