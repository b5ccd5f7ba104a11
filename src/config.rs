//! Round configuration
//!
//! Data-driven tuning for a single round, loaded from JSON by the host or
//! built from defaults. Validation happens once at load; the simulation
//! assumes a valid config afterwards.

use serde::{Deserialize, Serialize};

/// Configuration for one round
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RoundConfig {
    /// Hole radius in world units
    pub hole_radius: f32,
    /// Input-to-motion speed multiplier
    pub movement_speed: f32,
    /// Round duration in seconds
    pub round_duration_secs: i64,
    /// Number of collectibles needed to win
    pub total_score_target: u32,
    /// Number of distinct countdown warning sounds to cycle through
    pub warning_sound_count: u32,
    /// Movement bound corner, +X side (mirrored to -X)
    pub bound_x: f32,
    /// Movement bound corner, -Z side (mirrored to +Z)
    pub bound_z: f32,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            hole_radius: 1.0,
            movement_speed: 10.0,
            round_duration_secs: 60,
            total_score_target: 10,
            warning_sound_count: 2,
            bound_x: 10.0,
            bound_z: -10.0,
        }
    }
}

/// Config load/validation error
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    Invalid(&'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl RoundConfig {
    /// Parse and validate a config from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Check the config describes a playable round
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.hole_radius > 0.0) {
            return Err(ConfigError::Invalid("hole_radius must be positive"));
        }
        if self.movement_speed < 0.0 {
            return Err(ConfigError::Invalid("movement_speed must be non-negative"));
        }
        if self.round_duration_secs <= 0 {
            return Err(ConfigError::Invalid("round_duration_secs must be positive"));
        }
        if self.total_score_target == 0 {
            return Err(ConfigError::Invalid("total_score_target must be positive"));
        }
        if self.warning_sound_count == 0 {
            return Err(ConfigError::Invalid("warning_sound_count must be positive"));
        }
        if self.bound_x <= 0.0 {
            return Err(ConfigError::Invalid("bound_x must be positive"));
        }
        if self.bound_z >= 0.0 {
            return Err(ConfigError::Invalid("bound_z must be negative"));
        }
        // The clamp insets by the perfect radius on all four sides; the
        // bounds must leave room for it
        if self.bound_x < self.perfect_radius() {
            return Err(ConfigError::Invalid("bound_x smaller than perfect radius"));
        }
        if -self.bound_z < self.perfect_radius() {
            return Err(ConfigError::Invalid("bound_z smaller than perfect radius"));
        }
        Ok(())
    }

    /// Detection radius for the affected-vertex scan
    pub fn detection_radius(&self) -> f32 {
        self.hole_radius + crate::consts::DETECTION_MARGIN
    }

    /// Inset margin used when clamping hole motion to the bounds
    pub fn perfect_radius(&self) -> f32 {
        crate::consts::PERFECT_RADIUS_FACTOR * self.hole_radius
    }
}
