//! Shared types for the dodgebox workspace.

mod types;

pub use types::{BodyId, Color};
