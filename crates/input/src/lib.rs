//! Input: raw key-down/key-up events folded into a per-tick button snapshot.
//!
//! # Invariants
//! - Only current pressed-state affects physics; no event history is kept.
//! - Jump is a trigger: latched on key-down, consumed by the next tick.

pub mod action;
pub mod state;

pub use action::{Button, ParseButtonError};
pub use state::InputState;

pub fn crate_info() -> &'static str {
    "dodgebox-input v0.1.0"
}
