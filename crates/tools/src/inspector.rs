use dodgebox_common::BodyId;
use dodgebox_kernel::{Body, Clock, Game, RunState, StopReason};
use glam::Vec3;

/// Read-only queries against a running game for debugging and host UIs.
pub struct GameInspector;

impl GameInspector {
    /// Produce a summary of the game state.
    pub fn summary<C: Clock>(game: &Game<C>) -> GameSummary {
        GameSummary {
            frame: game.frame(),
            seed: game.seed(),
            state: game.state(),
            stop_reason: game.stop_reason(),
            live_enemies: game.enemies().len(),
            spawned_enemies: game.spawner().spawned(),
            spawn_interval: game.spawner().interval(),
            player_position: game.player().position(),
            player_falling: game.player().is_falling(),
            pending_events: game.events().len(),
        }
    }

    /// Details for one live enemy.
    pub fn inspect_enemy<C: Clock>(game: &Game<C>, id: BodyId) -> Option<BodyInfo> {
        game.enemies()
            .iter()
            .find(|e| e.id() == id)
            .map(BodyInfo::from_body)
    }

    /// Ids of all live enemies, in spawn order.
    pub fn list_enemies<C: Clock>(game: &Game<C>) -> Vec<BodyId> {
        game.enemies().iter().map(Body::id).collect()
    }

    /// The enemy nearest the player, with its distance.
    pub fn closest_enemy<C: Clock>(game: &Game<C>) -> Option<(BodyId, f32)> {
        let p = game.player().position();
        game.enemies()
            .iter()
            .map(|e| (e.id(), e.position().distance(p)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }
}

/// Summary of game state for the inspector.
#[derive(Debug, Clone)]
pub struct GameSummary {
    pub frame: u64,
    pub seed: u64,
    pub state: RunState,
    pub stop_reason: Option<StopReason>,
    pub live_enemies: usize,
    pub spawned_enemies: u64,
    pub spawn_interval: u32,
    pub player_position: Vec3,
    pub player_falling: bool,
    pub pending_events: usize,
}

impl std::fmt::Display for GameSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Game: frame={} seed={} state={:?} enemies={}/{} interval={} player=({:.2}, {:.2}, {:.2})",
            self.frame,
            self.seed,
            self.state,
            self.live_enemies,
            self.spawned_enemies,
            self.spawn_interval,
            self.player_position.x,
            self.player_position.y,
            self.player_position.z,
        )?;
        if self.player_falling {
            write!(f, " falling")?;
        }
        if let Some(reason) = self.stop_reason {
            write!(f, " ({reason})")?;
        }
        Ok(())
    }
}

/// Detailed info about a single body.
#[derive(Debug, Clone)]
pub struct BodyInfo {
    pub id: BodyId,
    pub position: [f32; 3],
    pub velocity: [f32; 3],
    pub size: [f32; 3],
    pub falling: bool,
}

impl BodyInfo {
    fn from_body(body: &Body) -> Self {
        Self {
            id: body.id(),
            position: body.position().to_array(),
            velocity: body.velocity.to_array(),
            size: body.size().to_array(),
            falling: body.is_falling(),
        }
    }
}

impl std::fmt::Display for BodyInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Body [{}] pos=({:.2}, {:.2}, {:.2}) vel=({:.2}, {:.2}, {:.2})",
            self.id.short(),
            self.position[0],
            self.position[1],
            self.position[2],
            self.velocity[0],
            self.velocity[1],
            self.velocity[2],
        )
    }
}
