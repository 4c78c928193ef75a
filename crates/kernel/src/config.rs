//! Immutable tunables for one game session.
//!
//! Every value is per tick, not per second: the simulation advances a fixed
//! amount each frame the host renders.

use dodgebox_common::Color;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Rejected configuration. Raised at construction, never mid-session.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{what} extents must be positive and finite, got {extents:?}")]
    InvalidExtents { what: &'static str, extents: Vec3 },
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },
    #[error("friction must be in (0, 1), got {0}")]
    FrictionOutOfRange(f32),
    #[error("spawn interval floor must be positive")]
    ZeroMinInterval,
    #[error("initial spawn interval {initial} is below the floor {min}")]
    InitialBelowFloor { initial: u32, min: u32 },
    #[error("invalid config JSON: {0}")]
    Json(String),
}

/// Global physics constants shared by every body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Vertical acceleration added each tick. Negative pulls down.
    pub gravity: f32,
    /// Fraction of vertical speed kept on each ground contact.
    pub friction: f32,
    /// Forward speed added each tick to bodies with `z_accelerate`.
    pub z_ramp: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: -0.03,
            friction: 0.2,
            z_ramp: 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Width, height, depth.
    pub size: Vec3,
    pub color: Color,
    pub position: Vec3,
    pub velocity: Vec3,
    /// Horizontal speed while a direction button is held.
    pub move_speed: f32,
    /// Vertical speed set by a jump.
    pub jump_speed: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            size: Vec3::ONE,
            color: Color(0xff59c7),
            position: Vec3::ZERO,
            velocity: Vec3::new(0.0, -0.4, 0.0),
            move_speed: 0.5,
            jump_speed: 0.3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundConfig {
    pub size: Vec3,
    pub color: Color,
    pub position: Vec3,
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            size: Vec3::new(10.0, 0.5, 50.0),
            color: Color(0xd9d4d7),
            position: Vec3::new(0.0, -2.0, 0.0),
        }
    }
}

/// Enemy spawning policy. Difficulty rises only by shrinking the interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Frames between spawns at session start.
    pub initial_interval: u32,
    /// Amount the interval shrinks after each spawn.
    pub interval_step: u32,
    /// The interval never drops below this.
    pub min_interval: u32,
    /// Enemies start at x uniformly drawn from `[-x_half_range, x_half_range)`.
    pub x_half_range: f32,
    pub start_y: f32,
    pub start_z: f32,
    pub velocity: Vec3,
    pub size: Vec3,
    pub color: Color,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            initial_interval: 80,
            interval_step: 20,
            min_interval: 20,
            x_half_range: 4.5,
            start_y: 0.0,
            start_z: -20.0,
            velocity: Vec3::new(0.0, -0.4, 0.05),
            size: Vec3::ONE,
            color: Color(0xff3131),
        }
    }
}

/// Full session configuration, passed into [`crate::Game`] at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub physics: PhysicsConfig,
    pub player: PlayerConfig,
    pub ground: GroundConfig,
    pub spawn: SpawnConfig,
    /// Real time between the player falling off the world and the loop stopping.
    pub fall_grace_ms: u64,
    /// Drop enemies from the live set once they fall below the ground.
    pub prune_fallen_enemies: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            player: PlayerConfig::default(),
            ground: GroundConfig::default(),
            spawn: SpawnConfig::default(),
            fall_grace_ms: 2000,
            prune_fallen_enemies: true,
        }
    }
}

impl GameConfig {
    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> String {
        // Plain data with string keys only; serialization cannot fail.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    pub fn fall_grace(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.fall_grace_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.physics;
        finite("physics.gravity", p.gravity)?;
        finite("physics.z_ramp", p.z_ramp)?;
        if !(p.friction > 0.0 && p.friction < 1.0) {
            return Err(ConfigError::FrictionOutOfRange(p.friction));
        }

        validate_extents("player", self.player.size)?;
        finite_vec("player.position", self.player.position)?;
        finite_vec("player.velocity", self.player.velocity)?;
        finite("player.move_speed", self.player.move_speed)?;
        finite("player.jump_speed", self.player.jump_speed)?;

        validate_extents("ground", self.ground.size)?;
        finite_vec("ground.position", self.ground.position)?;

        let s = &self.spawn;
        validate_extents("enemy", s.size)?;
        if s.min_interval == 0 {
            return Err(ConfigError::ZeroMinInterval);
        }
        if s.initial_interval < s.min_interval {
            return Err(ConfigError::InitialBelowFloor {
                initial: s.initial_interval,
                min: s.min_interval,
            });
        }
        finite("spawn.x_half_range", s.x_half_range)?;
        finite("spawn.start_y", s.start_y)?;
        finite("spawn.start_z", s.start_z)?;
        finite_vec("spawn.velocity", s.velocity)?;
        Ok(())
    }
}

/// Box extents must be strictly positive on every axis.
pub fn validate_extents(what: &'static str, extents: Vec3) -> Result<(), ConfigError> {
    if extents.is_finite() && extents.cmpgt(Vec3::ZERO).all() {
        Ok(())
    } else {
        Err(ConfigError::InvalidExtents { what, extents })
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field, value })
    }
}

fn finite_vec(field: &'static str, v: Vec3) -> Result<(), ConfigError> {
    finite(field, v.x)?;
    finite(field, v.y)?;
    finite(field, v.z)
}
