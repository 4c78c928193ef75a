use dodgebox_common::BodyId;
use dodgebox_input::InputState;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::body::{Body, BodyDesc};
use crate::clock::{Clock, SystemClock};
use crate::collision::intersects;
use crate::config::{ConfigError, GameConfig};
use crate::spawner::EnemySpawner;

/// Whether the loop still accepts ticks. `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    Running,
    Stopped,
}

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// The player touched this enemy.
    EnemyCollision(BodyId),
    /// The player fell below the ground and the grace delay ran out.
    FellOffWorld,
    /// The host cancelled the loop.
    Cancelled,
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnemyCollision(id) => write!(f, "hit by enemy {}", id.short()),
            Self::FellOffWorld => write!(f, "fell off the world"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// A record of each change to the live set or run state.
///
/// The scene binder drains these to add and remove renderable nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new enemy joined the live set.
    EnemySpawned { id: BodyId, frame: u64, position: Vec3 },
    /// An enemy fell out of the playable volume and was dropped.
    EnemyRemoved { id: BodyId, frame: u64 },
    /// The player left the playable volume; the loop stops at `deadline`.
    PlayerFell { frame: u64, deadline: Duration },
    /// The loop reached its terminal state.
    Stopped { frame: u64, reason: StopReason },
}

/// One game session: player, ground, live enemies and the spawner.
///
/// Driven by the host calling [`Game::tick`] once per animation frame. Key
/// handlers write to [`Game::input_mut`] between ticks. Every velocity is a
/// per-tick amount, so simulation speed follows the host frame rate.
#[derive(Debug)]
pub struct Game<C: Clock = SystemClock> {
    config: GameConfig,
    player: Body,
    ground: Body,
    enemies: Vec<Body>,
    spawner: EnemySpawner,
    rng: fastrand::Rng,
    seed: u64,
    input: InputState,
    frame: u64,
    state: RunState,
    stop_reason: Option<StopReason>,
    fall_deadline: Option<Duration>,
    clock: C,
    events: Vec<GameEvent>,
}

impl Game<SystemClock> {
    /// Start a real-time session with the given RNG seed.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_clock(config, seed, SystemClock::new())
    }
}

impl<C: Clock> Game<C> {
    /// Start a session whose grace deadline is measured by `clock`.
    pub fn with_clock(config: GameConfig, seed: u64, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;

        let player = Body::new(BodyDesc {
            size: config.player.size,
            color: config.player.color,
            position: config.player.position,
            velocity: config.player.velocity,
            z_accelerate: false,
            physics: config.physics,
        })?;
        let ground = Body::new(BodyDesc {
            size: config.ground.size,
            color: config.ground.color,
            position: config.ground.position,
            velocity: Vec3::ZERO,
            z_accelerate: false,
            physics: config.physics,
        })?;
        let spawner = EnemySpawner::new(config.spawn, config.physics)?;

        tracing::info!(seed, "game session started");
        Ok(Self {
            config,
            player,
            ground,
            enemies: Vec::new(),
            spawner,
            rng: fastrand::Rng::with_seed(seed),
            seed,
            input: InputState::new(),
            frame: 0,
            state: RunState::Running,
            stop_reason: None,
            fall_deadline: None,
            clock,
            events: Vec::new(),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn player(&self) -> &Body {
        &self.player
    }

    pub fn ground(&self) -> &Body {
        &self.ground
    }

    /// Live enemies in spawn order.
    pub fn enemies(&self) -> &[Body] {
        &self.enemies
    }

    pub fn spawner(&self) -> &EnemySpawner {
        &self.spawner
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of ticks completed.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason
    }

    /// When the grace delay after falling runs out, if it is armed.
    pub fn fall_deadline(&self) -> Option<Duration> {
        self.fall_deadline
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Key-state record sampled by the next tick.
    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Cancel the loop from the host side. No-op once stopped.
    pub fn stop(&mut self) {
        self.halt(StopReason::Cancelled);
    }

    /// Advance the session by one frame. Does nothing once stopped.
    pub fn tick(&mut self) {
        if self.state == RunState::Stopped {
            return;
        }
        if let Some(deadline) = self.fall_deadline {
            if self.clock.now() >= deadline {
                self.halt(StopReason::FellOffWorld);
                return;
            }
        }

        let _span = tracing::trace_span!("tick", frame = self.frame).entered();

        let speed = self.config.player.move_speed;
        self.player.velocity.x = self.input.lateral() * speed;
        self.player.velocity.z = self.input.depth() * speed;
        if self.input.take_jump() {
            self.player.velocity.y = self.config.player.jump_speed;
        }

        self.player.update(&self.ground);

        let mut hit = None;
        for enemy in &mut self.enemies {
            enemy.update(&self.ground);
            if hit.is_none() && intersects(&self.player, enemy) {
                hit = Some(enemy.id());
            }
        }
        if let Some(id) = hit {
            self.halt(StopReason::EnemyCollision(id));
        }

        if self.config.prune_fallen_enemies {
            self.prune_fallen();
        }

        if let Some(enemy) = self.spawner.poll(self.frame, &mut self.rng) {
            self.events.push(GameEvent::EnemySpawned {
                id: enemy.id(),
                frame: self.frame,
                position: enemy.position(),
            });
            self.enemies.push(enemy);
        }

        if self.player.is_falling() && self.fall_deadline.is_none() && self.is_running() {
            let deadline = self.clock.now() + self.config.fall_grace();
            self.fall_deadline = Some(deadline);
            self.events.push(GameEvent::PlayerFell {
                frame: self.frame,
                deadline,
            });
            tracing::info!(frame = self.frame, ?deadline, "player fell off the world");
        }

        tracing::trace!(
            frame = self.frame,
            enemies = self.enemies.len(),
            player_y = self.player.position().y,
            "tick complete"
        );
        self.frame += 1;
    }

    fn prune_fallen(&mut self) {
        let frame = self.frame;
        let events = &mut self.events;
        self.enemies.retain(|enemy| {
            if !enemy.is_falling() {
                return true;
            }
            tracing::debug!(frame, enemy = %enemy.id().short(), "removing fallen enemy");
            events.push(GameEvent::EnemyRemoved {
                id: enemy.id(),
                frame,
            });
            false
        });
    }

    fn halt(&mut self, reason: StopReason) {
        if self.state == RunState::Stopped {
            return;
        }
        self.state = RunState::Stopped;
        self.stop_reason = Some(reason);
        self.events.push(GameEvent::Stopped {
            frame: self.frame,
            reason,
        });
        tracing::info!(frame = self.frame, %reason, "game stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use dodgebox_input::Button;

    const FRAME: Duration = Duration::from_millis(16);

    fn game(config: GameConfig) -> Game<ManualClock> {
        Game::with_clock(config, 42, ManualClock::new()).unwrap()
    }

    /// Enemies spawn straight down the middle lane.
    fn centered_enemies() -> GameConfig {
        let mut config = GameConfig::default();
        config.spawn.x_half_range = 0.0;
        config
    }

    /// Player starts beside the ground and falls immediately.
    fn off_the_edge() -> GameConfig {
        let mut config = GameConfig::default();
        config.player.position = Vec3::new(20.0, 0.0, 0.0);
        config
    }

    fn run_frames(g: &mut Game<ManualClock>, n: usize) {
        for _ in 0..n {
            g.tick();
            g.clock().advance(FRAME);
        }
    }

    #[test]
    fn starts_running_and_empty() {
        let g = game(GameConfig::default());
        assert_eq!(g.state(), RunState::Running);
        assert_eq!(g.frame(), 0);
        assert!(g.enemies().is_empty());
        assert!(g.stop_reason().is_none());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = GameConfig::default();
        config.ground.size = Vec3::new(10.0, 0.0, 50.0);
        assert!(Game::with_clock(config, 0, ManualClock::new()).is_err());
    }

    #[test]
    fn first_tick_spawns_an_enemy() {
        let mut g = game(GameConfig::default());
        g.tick();
        assert_eq!(g.frame(), 1);
        assert_eq!(g.enemies().len(), 1);
        assert!(matches!(
            g.events()[0],
            GameEvent::EnemySpawned { frame: 0, .. }
        ));
        assert_eq!(g.spawner().interval(), 60);
    }

    #[test]
    fn directional_input_sets_horizontal_velocity() {
        let mut g = game(GameConfig::default());
        g.input_mut().press(Button::Left);
        g.input_mut().press(Button::Forward);
        g.tick();
        assert_eq!(g.player().velocity.x, -0.5);
        assert_eq!(g.player().velocity.z, -0.5);
        assert_eq!(g.player().position().x, -0.5);
        assert_eq!(g.player().position().z, -0.5);

        g.input_mut().clear();
        g.tick();
        assert_eq!(g.player().velocity.x, 0.0);
        assert_eq!(g.player().velocity.z, 0.0);
        assert_eq!(g.player().position().x, -0.5);
    }

    #[test]
    fn opposing_keys_are_exclusive() {
        let mut g = game(GameConfig::default());
        g.input_mut().press(Button::Left);
        g.input_mut().press(Button::Right);
        g.tick();
        assert_eq!(g.player().velocity.x, -0.5);
    }

    #[test]
    fn jump_sets_vertical_speed_even_mid_air() {
        let mut config = GameConfig::default();
        config.player.position = Vec3::new(0.0, 3.0, 0.0);
        config.player.velocity = Vec3::ZERO;
        let mut g = game(config);
        g.tick();
        assert!(g.player().velocity.y < 0.0);

        g.input_mut().key_down("Space");
        g.tick();
        // Jump speed, then one tick of gravity.
        assert!((g.player().velocity.y - 0.27).abs() < 1e-6);
        assert!(!g.input().jump_pending());
    }

    #[test]
    fn player_lands_without_penetrating_ground() {
        let mut config = GameConfig::default();
        config.player.position = Vec3::new(0.0, 2.0, 0.0);
        config.player.velocity = Vec3::ZERO;
        config.spawn.x_half_range = 0.0;
        config.spawn.start_z = -1000.0;
        let mut g = game(config);
        let top = g.ground().faces().top;
        let mut bounced = false;
        for _ in 0..60 {
            let vy = g.player().velocity.y + g.player().gravity();
            let will_touch = g.player().faces().bottom + vy <= top;
            g.tick();
            assert!(g.player().faces().bottom >= top - 1e-6);
            if will_touch {
                assert!(g.player().velocity.y > 0.0);
                bounced = true;
                break;
            }
        }
        assert!(bounced);
    }

    #[test]
    fn approaching_enemy_ends_the_game() {
        let mut g = game(centered_enemies());
        run_frames(&mut g, 200);
        assert_eq!(g.state(), RunState::Stopped);
        let first = g.enemies()[0].id();
        assert_eq!(g.stop_reason(), Some(StopReason::EnemyCollision(first)));
        // Spawned on frame 0, it closes the 20-unit gap on frame 19.
        assert!(g
            .events()
            .iter()
            .any(|e| matches!(e, GameEvent::Stopped { frame: 19, .. })));
        assert_eq!(g.frame(), 20);
    }

    #[test]
    fn stopped_is_terminal() {
        let mut g = game(centered_enemies());
        run_frames(&mut g, 200);
        let frame = g.frame();
        let player = g.player().clone();
        let events = g.events().len();

        g.input_mut().press(Button::Right);
        g.tick();
        g.tick();
        assert_eq!(g.frame(), frame);
        assert_eq!(g.player(), &player);
        assert_eq!(g.events().len(), events);
    }

    #[test]
    fn falling_player_stops_after_grace_delay() {
        let mut g = game(off_the_edge());
        let grace = g.config().fall_grace();

        let mut ticks = 0;
        while g.fall_deadline().is_none() {
            g.tick();
            g.clock().advance(FRAME);
            ticks += 1;
            assert!(ticks < 50, "player never fell");
        }
        let deadline = g.fall_deadline().unwrap();
        assert!(g.player().is_falling());
        assert_eq!(deadline, g.clock().now() - FRAME + grace);

        while g.clock().now() < deadline {
            g.tick();
            assert_eq!(g.state(), RunState::Running);
            g.clock().advance(FRAME);
        }
        g.tick();
        assert_eq!(g.state(), RunState::Stopped);
        assert_eq!(g.stop_reason(), Some(StopReason::FellOffWorld));
    }

    #[test]
    fn fall_deadline_is_armed_once() {
        let mut g = game(off_the_edge());
        run_frames(&mut g, 10);
        let first = g.fall_deadline();
        assert!(first.is_some());
        run_frames(&mut g, 10);
        assert_eq!(g.fall_deadline(), first);
        let fell = g
            .events()
            .iter()
            .filter(|e| matches!(e, GameEvent::PlayerFell { .. }))
            .count();
        assert_eq!(fell, 1);
    }

    #[test]
    fn deadline_after_stop_is_a_no_op() {
        let mut g = game(off_the_edge());
        run_frames(&mut g, 10);
        let deadline = g.fall_deadline().unwrap();

        g.stop();
        g.clock().set(deadline + FRAME);
        g.tick();
        assert_eq!(g.stop_reason(), Some(StopReason::Cancelled));
        let stops = g
            .events()
            .iter()
            .filter(|e| matches!(e, GameEvent::Stopped { .. }))
            .count();
        assert_eq!(stops, 1);
    }

    #[test]
    fn host_cancel_stops_the_loop() {
        let mut g = game(GameConfig::default());
        g.tick();
        g.stop();
        g.stop();
        assert_eq!(g.stop_reason(), Some(StopReason::Cancelled));
        let stops = g
            .events()
            .iter()
            .filter(|e| matches!(e, GameEvent::Stopped { .. }))
            .count();
        assert_eq!(stops, 1);
    }

    #[test]
    fn fallen_enemies_are_pruned() {
        let mut config = off_the_edge();
        config.fall_grace_ms = u64::MAX / 2;
        let mut g = game(config);
        run_frames(&mut g, 300);
        assert!(g.is_running());

        let removed = g
            .events()
            .iter()
            .filter(|e| matches!(e, GameEvent::EnemyRemoved { .. }))
            .count();
        assert!(removed > 0);
        assert_eq!(g.enemies().len() as u64 + removed as u64, g.spawner().spawned());
        assert!(g.enemies().iter().all(|e| !e.is_falling()));
    }

    #[test]
    fn pruning_can_be_disabled() {
        let mut config = off_the_edge();
        config.fall_grace_ms = u64::MAX / 2;
        config.prune_fallen_enemies = false;
        let mut g = game(config);
        run_frames(&mut g, 300);
        assert_eq!(g.enemies().len() as u64, g.spawner().spawned());
        assert!(g.enemies().iter().any(|e| e.is_falling()));
    }

    #[test]
    fn same_seed_same_session() {
        let run = || {
            let mut g = game(off_the_edge());
            run_frames(&mut g, 150);
            g.enemies()
                .iter()
                .map(|e| e.position())
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn drain_events_clears_log() {
        let mut g = game(GameConfig::default());
        g.tick();
        assert_eq!(g.drain_events().len(), 1);
        assert!(g.events().is_empty());
    }
}
