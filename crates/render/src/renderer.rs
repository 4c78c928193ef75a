use dodgebox_kernel::{Body, Clock, Game};
use glam::Vec3;

/// Camera/view configuration for rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(4.62, 2.74, 8.0),
            target: Vec3::ZERO,
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads game state and a view configuration, then produces
/// output. It never mutates the game.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given game state and view.
    fn render<C: Clock>(&self, game: &Game<C>, view: &RenderView) -> Self::Output;
}

/// Produces a human-readable dump of the game state.
///
/// Used by the headless CLI and in tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

fn body_line(label: &str, body: &Body) -> String {
    let p = body.position();
    let v = body.velocity;
    format!(
        "  {label:<7} [{}] pos=({:.2}, {:.2}, {:.2}) vel=({:.2}, {:.2}, {:.2}){}\n",
        body.id().short(),
        p.x,
        p.y,
        p.z,
        v.x,
        v.y,
        v.z,
        if body.is_falling() { " falling" } else { "" }
    )
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render<C: Clock>(&self, game: &Game<C>, view: &RenderView) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "=== Game (frame={}, state={:?}, seed={}) ===\n",
            game.frame(),
            game.state(),
            game.seed()
        ));
        out.push_str(&format!(
            "Enemies: {}  spawn interval: {}\n",
            game.enemies().len(),
            game.spawner().interval()
        ));
        out.push_str(&format!(
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0}\n",
            view.eye.x,
            view.eye.y,
            view.eye.z,
            view.target.x,
            view.target.y,
            view.target.z,
            view.fov_degrees
        ));

        out.push_str(&body_line("player", game.player()));
        for enemy in game.enemies() {
            out.push_str(&body_line("enemy", enemy));
        }
        if let Some(reason) = game.stop_reason() {
            out.push_str(&format!("Stopped: {reason}\n"));
        }

        out
    }
}
