//! Rendering Adapter: scene-graph binding and renderer-agnostic output.
//!
//! # Invariants
//! - Renderers never mutate game state.
//! - Physics bodies and scene nodes are separate; the binder maps one to the other.
//! - Scene nodes only ever receive positions, never feed them back.

mod renderer;
mod scene;

pub use renderer::{DebugTextRenderer, RenderView, Renderer};
pub use scene::{BoxNode, Light, MemoryScene, NodeHandle, Scene, SceneBinder, SceneError};

pub fn crate_info() -> &'static str {
    "dodgebox-render v0.1.0"
}
