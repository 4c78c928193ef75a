use glam::Vec3;

use crate::body::{Body, BodyDesc};
use crate::config::{validate_extents, ConfigError, PhysicsConfig, SpawnConfig};

/// Frame-counted enemy spawner.
///
/// Spawns one enemy whenever `frame % interval == 0`, then shrinks the
/// interval by `interval_step`, never below `min_interval`. The shrinking
/// interval is the only difficulty ramp.
#[derive(Debug, Clone)]
pub struct EnemySpawner {
    config: SpawnConfig,
    physics: PhysicsConfig,
    interval: u32,
    last_polled: Option<u64>,
    spawned: u64,
}

impl EnemySpawner {
    pub fn new(config: SpawnConfig, physics: PhysicsConfig) -> Result<Self, ConfigError> {
        if config.min_interval == 0 {
            return Err(ConfigError::ZeroMinInterval);
        }
        if config.initial_interval < config.min_interval {
            return Err(ConfigError::InitialBelowFloor {
                initial: config.initial_interval,
                min: config.min_interval,
            });
        }
        validate_extents("enemy", config.size)?;
        Ok(Self {
            interval: config.initial_interval,
            config,
            physics,
            last_polled: None,
            spawned: 0,
        })
    }

    /// Current spawn interval in frames.
    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// Total enemies produced so far.
    pub fn spawned(&self) -> u64 {
        self.spawned
    }

    /// Evaluate the trigger for `frame`.
    ///
    /// Polling the same frame twice yields at most one enemy.
    pub fn poll(&mut self, frame: u64, rng: &mut fastrand::Rng) -> Option<Body> {
        if self.last_polled == Some(frame) {
            return None;
        }
        self.last_polled = Some(frame);

        if frame % u64::from(self.interval) != 0 {
            return None;
        }

        self.interval = self
            .interval
            .saturating_sub(self.config.interval_step)
            .max(self.config.min_interval);
        self.spawned += 1;

        let c = &self.config;
        let x = (rng.f32() - 0.5) * 2.0 * c.x_half_range;
        let enemy = Body::from_valid(BodyDesc {
            size: c.size,
            color: c.color,
            position: Vec3::new(x, c.start_y, c.start_z),
            velocity: c.velocity,
            z_accelerate: true,
            physics: self.physics,
        });
        tracing::debug!(
            frame,
            x,
            next_interval = self.interval,
            enemy = %enemy.id().short(),
            "spawned enemy"
        );
        Some(enemy)
    }
}
