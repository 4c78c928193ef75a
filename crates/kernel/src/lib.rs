//! Game kernel: the per-frame physics and collision-response core.
//!
//! # Invariants
//! - Faces are derived from the current position on every read, never cached.
//! - Exactly one tick runs to completion before the next; no locking.
//! - `Stopped` is terminal: no state changes after it.
//! - All tunables come from an immutable [`GameConfig`] given at construction.

pub mod aabb;
pub mod body;
pub mod clock;
pub mod collision;
pub mod config;
pub mod game;
pub mod spawner;

pub use aabb::{Aabb, Faces};
pub use body::{Body, BodyDesc};
pub use clock::{Clock, ManualClock, SystemClock};
pub use collision::intersects;
pub use config::{ConfigError, GameConfig, GroundConfig, PhysicsConfig, PlayerConfig, SpawnConfig};
pub use game::{Game, GameEvent, RunState, StopReason};
pub use spawner::EnemySpawner;

pub fn crate_info() -> &'static str {
    "dodgebox-kernel v0.1.0"
}
