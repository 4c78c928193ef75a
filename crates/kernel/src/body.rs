use dodgebox_common::{BodyId, Color};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::aabb::{Aabb, Faces};
use crate::collision::intersects;
use crate::config::{validate_extents, ConfigError, PhysicsConfig};

/// Construction parameters for a [`Body`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDesc {
    /// Width, height, depth.
    pub size: Vec3,
    pub color: Color,
    pub position: Vec3,
    pub velocity: Vec3,
    /// Ramp forward speed by `physics.z_ramp` every tick.
    pub z_accelerate: bool,
    pub physics: PhysicsConfig,
}

impl Default for BodyDesc {
    fn default() -> Self {
        Self {
            size: Vec3::ONE,
            color: Color::WHITE,
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            z_accelerate: false,
            physics: PhysicsConfig::default(),
        }
    }
}

/// A movable axis-aligned box under gravity.
///
/// Purely physical: the renderable node that draws it belongs to the scene
/// and is keyed by [`Body::id`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    id: BodyId,
    aabb: Aabb,
    pub velocity: Vec3,
    color: Color,
    gravity: f32,
    friction: f32,
    z_ramp: f32,
    z_accelerate: bool,
    falling: bool,
}

impl Body {
    pub fn new(desc: BodyDesc) -> Result<Self, ConfigError> {
        validate_extents("body", desc.size)?;
        Ok(Self::from_valid(desc))
    }

    /// Build from a descriptor whose extents were already validated.
    pub(crate) fn from_valid(desc: BodyDesc) -> Self {
        Self {
            id: BodyId::new(),
            aabb: Aabb::new(desc.position, desc.size),
            velocity: desc.velocity,
            color: desc.color,
            gravity: desc.physics.gravity,
            friction: desc.physics.friction,
            z_ramp: desc.physics.z_ramp,
            z_accelerate: desc.z_accelerate,
            falling: false,
        }
    }

    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn position(&self) -> Vec3 {
        self.aabb.center
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.aabb.center = position;
    }

    pub fn size(&self) -> Vec3 {
        self.aabb.size()
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    pub fn z_accelerate(&self) -> bool {
        self.z_accelerate
    }

    /// Set once the body dropped below the ground. Never cleared.
    pub fn is_falling(&self) -> bool {
        self.falling
    }

    /// Faces derived from the current position.
    pub fn faces(&self) -> Faces {
        self.aabb.faces()
    }

    /// Advance one tick: forward ramp, horizontal Euler step, then gravity.
    ///
    /// Horizontal motion is never checked against the ground. Returns whether
    /// the body touched the ground this tick.
    pub fn update(&mut self, ground: &Body) -> bool {
        if self.z_accelerate {
            self.velocity.z += self.z_ramp;
        }
        self.aabb.center.x += self.velocity.x;
        self.aabb.center.z += self.velocity.z;
        self.apply_gravity(ground)
    }

    /// Accelerate downward, then either bounce off the ground or move freely.
    ///
    /// On contact the vertical speed is damped by friction and reversed, and
    /// the position is held for this tick. Returns whether contact happened.
    pub fn apply_gravity(&mut self, ground: &Body) -> bool {
        self.velocity.y += self.gravity;

        if intersects(self, ground) {
            self.velocity.y *= self.friction;
            self.velocity.y = -self.velocity.y;
            return true;
        }

        self.aabb.center.y += self.velocity.y;
        if !self.falling && self.faces().top < ground.faces().bottom {
            self.falling = true;
            tracing::debug!(body = %self.id.short(), y = self.aabb.center.y, "body left the playable volume");
        }
        false
    }
}
