use std::collections::BTreeMap;

use dodgebox_common::{BodyId, Color};
use dodgebox_kernel::{Body, Clock, Game, GameEvent};
use glam::Vec3;

use crate::renderer::RenderView;

/// Handle to a node owned by a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(pub u64);

/// A renderable box primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxNode {
    /// Width, height, depth.
    pub size: Vec3,
    pub color: Color,
    pub position: Vec3,
}

impl BoxNode {
    pub fn for_body(body: &Body) -> Self {
        Self {
            size: body.size(),
            color: body.color(),
            position: body.position(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Directional {
        position: Vec3,
        color: Color,
        intensity: f32,
    },
    Ambient {
        color: Color,
        intensity: f32,
    },
}

/// Errors from scene-graph operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    #[error("node {0:?} not found")]
    NodeNotFound(NodeHandle),
}

/// The scene-graph collaborator the game draws into.
///
/// The game core only ever sets positions on nodes it created; everything
/// else about how nodes are drawn belongs to the implementation.
pub trait Scene {
    fn add_box(&mut self, node: BoxNode) -> NodeHandle;
    fn set_position(&mut self, node: NodeHandle, position: Vec3) -> Result<(), SceneError>;
    fn remove(&mut self, node: NodeHandle) -> Result<(), SceneError>;
    fn add_light(&mut self, light: Light);
    fn set_camera(&mut self, view: RenderView);
}

/// In-memory scene graph for headless runs and tests.
#[derive(Debug, Default)]
pub struct MemoryScene {
    nodes: BTreeMap<NodeHandle, BoxNode>,
    lights: Vec<Light>,
    camera: Option<RenderView>,
    next: u64,
}

impl MemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, handle: NodeHandle) -> Option<&BoxNode> {
        self.nodes.get(&handle)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn camera(&self) -> Option<&RenderView> {
        self.camera.as_ref()
    }
}

impl Scene for MemoryScene {
    fn add_box(&mut self, node: BoxNode) -> NodeHandle {
        let handle = NodeHandle(self.next);
        self.next += 1;
        self.nodes.insert(handle, node);
        handle
    }

    fn set_position(&mut self, node: NodeHandle, position: Vec3) -> Result<(), SceneError> {
        let n = self.nodes.get_mut(&node).ok_or(SceneError::NodeNotFound(node))?;
        n.position = position;
        Ok(())
    }

    fn remove(&mut self, node: NodeHandle) -> Result<(), SceneError> {
        self.nodes
            .remove(&node)
            .map(|_| ())
            .ok_or(SceneError::NodeNotFound(node))
    }

    fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    fn set_camera(&mut self, view: RenderView) {
        self.camera = Some(view);
    }
}

/// Keeps a [`Scene`] in step with a [`Game`].
///
/// Creates the static nodes once, adds and removes enemy nodes as game
/// events arrive, and copies body positions onto nodes every frame.
pub struct SceneBinder<S: Scene> {
    scene: S,
    ground: NodeHandle,
    player: NodeHandle,
    enemies: BTreeMap<BodyId, NodeHandle>,
}

impl<S: Scene> SceneBinder<S> {
    /// Populate `scene` with the ground, player, any live enemies, the
    /// camera and the default lights.
    pub fn attach<C: Clock>(mut scene: S, game: &Game<C>, view: RenderView) -> Self {
        let ground = scene.add_box(BoxNode::for_body(game.ground()));
        let player = scene.add_box(BoxNode::for_body(game.player()));
        let enemies = game
            .enemies()
            .iter()
            .map(|e| (e.id(), scene.add_box(BoxNode::for_body(e))))
            .collect();

        scene.add_light(Light::Directional {
            position: Vec3::new(0.0, 3.0, 1.0),
            color: Color::WHITE,
            intensity: 1.0,
        });
        scene.add_light(Light::Ambient {
            color: Color::WHITE,
            intensity: 0.5,
        });
        scene.set_camera(view);

        Self {
            scene,
            ground,
            player,
            enemies,
        }
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn ground_node(&self) -> NodeHandle {
        self.ground
    }

    pub fn player_node(&self) -> NodeHandle {
        self.player
    }

    pub fn enemy_node(&self, id: BodyId) -> Option<NodeHandle> {
        self.enemies.get(&id).copied()
    }

    /// Apply drained game events, then copy every body position to its node.
    pub fn sync<C: Clock>(&mut self, game: &Game<C>, events: &[GameEvent]) -> Result<(), SceneError> {
        for event in events {
            match event {
                GameEvent::EnemySpawned { id, .. } => {
                    if let Some(body) = game.enemies().iter().find(|e| e.id() == *id) {
                        let node = self.scene.add_box(BoxNode::for_body(body));
                        self.enemies.insert(*id, node);
                    }
                }
                GameEvent::EnemyRemoved { id, .. } => match self.enemies.remove(id) {
                    Some(node) => self.scene.remove(node)?,
                    None => tracing::warn!(enemy = %id.short(), "no node for removed enemy"),
                },
                GameEvent::PlayerFell { .. } | GameEvent::Stopped { .. } => {}
            }
        }

        self.scene
            .set_position(self.player, game.player().position())?;
        for enemy in game.enemies() {
            if let Some(node) = self.enemies.get(&enemy.id()) {
                self.scene.set_position(*node, enemy.position())?;
            }
        }
        Ok(())
    }
}
