//! Developer Tooling: read-only game inspector.
//!
//! # Invariants
//! - Tools never mutate game state.

mod inspector;

pub use inspector::{BodyInfo, GameInspector, GameSummary};

pub fn crate_info() -> &'static str {
    "dodgebox-tools v0.1.0"
}
