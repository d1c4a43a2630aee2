//! Engine tunables, supplied by the host as JSON.
//!
//! Every field is optional on the wire; missing fields take the defaults in
//! [`crate::consts`]. [`BoardConfig::from_json`] validates after parsing so a
//! bad host config is rejected up front instead of producing a broken board.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::consts::{
    DEFAULT_HIT_RADIUS, DEFAULT_ZONE_RADIUS, FRAME_INTERVAL_MS, GHOST_ALPHA, GRID_SPACING, MAX_SCALE, MIN_SCALE,
    MIN_TRANSITION_MS, MIN_ZONE_RADIUS, PITCH_HEIGHT, PITCH_WIDTH, REGRAB_RADIUS, ZOOM_STEP,
};
use crate::error::BoardError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoardConfig {
    pub pitch_width: f64,
    pub pitch_height: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    pub zoom_step: f64,
    /// Floor applied to every step's transition duration during playback.
    pub min_transition_ms: f64,
    pub frame_interval_ms: f64,
    pub regrab_radius: f64,
    pub default_hit_radius: f64,
    pub min_zone_radius: f64,
    pub default_zone_radius: f64,
    pub ghost_alpha: f64,
    pub grid_spacing: f64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            pitch_width: PITCH_WIDTH,
            pitch_height: PITCH_HEIGHT,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            zoom_step: ZOOM_STEP,
            min_transition_ms: MIN_TRANSITION_MS,
            frame_interval_ms: FRAME_INTERVAL_MS,
            regrab_radius: REGRAB_RADIUS,
            default_hit_radius: DEFAULT_HIT_RADIUS,
            min_zone_radius: MIN_ZONE_RADIUS,
            default_zone_radius: DEFAULT_ZONE_RADIUS,
            ghost_alpha: GHOST_ALPHA,
            grid_spacing: GRID_SPACING,
        }
    }
}

impl BoardConfig {
    /// Parse and validate a host-supplied config object.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Config`] if the value does not deserialize and
    /// [`BoardError::InvalidConfig`] if a field is out of range.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, BoardError> {
        let config = Self::deserialize(value).inspect_err(|e| warn!(%e, "unparseable board config"))?;
        config.validate().inspect_err(|e| warn!(%e, "rejected board config"))?;
        Ok(config)
    }

    /// Check field ranges.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<(), BoardError> {
        let positive = [
            ("pitchWidth", self.pitch_width),
            ("pitchHeight", self.pitch_height),
            ("minScale", self.min_scale),
            ("zoomStep", self.zoom_step),
            ("minTransitionMs", self.min_transition_ms),
            ("frameIntervalMs", self.frame_interval_ms),
            ("gridSpacing", self.grid_spacing),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(BoardError::InvalidConfig(format!("{name} must be positive, got {value}")));
            }
        }
        if self.max_scale < self.min_scale {
            return Err(BoardError::InvalidConfig(format!(
                "maxScale {} is below minScale {}",
                self.max_scale, self.min_scale
            )));
        }
        if self.default_zone_radius < self.min_zone_radius {
            return Err(BoardError::InvalidConfig(format!(
                "defaultZoneRadius {} is below minZoneRadius {}",
                self.default_zone_radius, self.min_zone_radius
            )));
        }
        if !(0.0..=1.0).contains(&self.ghost_alpha) {
            return Err(BoardError::InvalidConfig(format!("ghostAlpha {} is outside 0..=1", self.ghost_alpha)));
        }
        Ok(())
    }
}
