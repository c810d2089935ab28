use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;

/// What a recycled star keeps of its old velocity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RespawnVelocity {
    /// Start from rest at the spawn position
    #[default]
    Zero,
    /// Carry the last frame's velocity over
    Keep,
}

/// Bloom applied to the trails
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlowConfig {
    /// Bloom strength, 0 disables the glow
    pub intensity: f32,
    /// Luminance below which pixels don't bloom
    pub threshold: f32,
}

impl Default for GlowConfig {
    fn default() -> Self {
        Self { intensity: GLOW_INTENSITY, threshold: 0.0 }
    }
}

/// Galaxy configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalaxyConfig {
    /// Number of stars in the pool (fixed for the galaxy's lifetime)
    pub star_count: u32,
    /// Random seed for deterministic simulation
    pub seed: u64,
    /// Simulation volume (width, height, depth)
    pub size: [f32; 3],
    /// Stars at or below this height are recycled
    pub min_y: f32,
    /// Horizontal spawn range [min, max)
    pub spawn_x: [f32; 2],
    /// Vertical spawn range; min == max spawns every star at the same height
    pub spawn_y: [f32; 2],
    /// Collisions allowed before a star stops bouncing
    pub max_collisions: u32,
    pub drag_coefficient: f32,
    pub gravity: f32,
    /// Exponent of the cosine-power bounce lobe
    pub lobe_exponent: f32,
    /// Speed a bounced star leaves the ground with
    pub bounce_speed: f32,
    /// Step applied every frame; None uses the real frame delta
    pub fixed_dt: Option<f32>,
    pub respawn_velocity: RespawnVelocity,
    /// Use the sensor heightmap as the ground instead of y = 0
    pub heightmap_collision: bool,
    /// Positions kept per trail
    pub trail_length: usize,
    pub glow: GlowConfig,
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self {
            star_count: DEFAULT_STAR_COUNT,
            seed: 42,
            size: VOLUME_SIZE,
            min_y: MIN_Y,
            spawn_x: [0.0, VOLUME_SIZE[0]],
            spawn_y: [VOLUME_SIZE[1], VOLUME_SIZE[1]],
            max_collisions: MAX_COLLISIONS,
            drag_coefficient: DRAG_COEFFICIENT,
            gravity: GRAVITY,
            lobe_exponent: LOBE_EXPONENT,
            bounce_speed: BOUNCE_SPEED,
            fixed_dt: Some(DEFAULT_DT),
            respawn_velocity: RespawnVelocity::Zero,
            heightmap_collision: false,
            trail_length: TRAIL_LENGTH,
            glow: GlowConfig::default(),
        }
    }
}

impl GalaxyConfig {
    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.star_count == 0 {
            return Err(ConfigError::invalid("star_count", "must be at least 1"));
        }
        check_range("spawn_x", self.spawn_x)?;
        check_range("spawn_y", self.spawn_y)?;
        check_finite("min_y", self.min_y)?;
        check_finite("drag_coefficient", self.drag_coefficient)?;
        check_finite("gravity", self.gravity)?;
        check_finite("bounce_speed", self.bounce_speed)?;
        if !self.size.iter().all(|s| s.is_finite() && *s > 0.0) {
            return Err(ConfigError::invalid("size", "every extent must be finite and positive"));
        }
        if !(self.lobe_exponent.is_finite() && self.lobe_exponent >= 0.0) {
            return Err(ConfigError::invalid("lobe_exponent", "must be finite and non-negative"));
        }
        if let Some(dt) = self.fixed_dt {
            if !(dt.is_finite() && dt > 0.0) {
                return Err(ConfigError::invalid("fixed_dt", "must be finite and positive"));
            }
        }
        if self.trail_length < 2 {
            return Err(ConfigError::invalid("trail_length", "a trail needs at least 2 points"));
        }
        check_unit("glow.intensity", self.glow.intensity)?;
        check_unit("glow.threshold", self.glow.threshold)?;
        Ok(())
    }
}

fn check_finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, "must be finite"))
    }
}

fn check_unit(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, "must be within [0, 1]"))
    }
}

fn check_range(field: &'static str, range: [f32; 2]) -> Result<(), ConfigError> {
    if !(range[0].is_finite() && range[1].is_finite()) {
        return Err(ConfigError::invalid(field, "bounds must be finite"));
    }
    if range[0] > range[1] {
        return Err(ConfigError::invalid(field, "min is greater than max"));
    }
    Ok(())
}
