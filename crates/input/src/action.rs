use std::str::FromStr;

/// A logical button the game reads once per tick.
///
/// Physical keys are mapped onto these by [`Button::from_key_code`]; the kernel
/// never sees raw key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// Strafe toward -x.
    Left,
    /// Strafe toward +x.
    Right,
    /// Move toward -z (away from the camera, into oncoming enemies).
    Forward,
    /// Move toward +z.
    Back,
    /// Set the player's vertical speed to the jump speed.
    Jump,
}

impl Button {
    pub const ALL: [Button; 5] = [
        Button::Left,
        Button::Right,
        Button::Forward,
        Button::Back,
        Button::Jump,
    ];

    /// Map a DOM-style key code (`KeyA`, `Space`, ...) to a button.
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "KeyA" | "ArrowLeft" => Some(Self::Left),
            "KeyD" | "ArrowRight" => Some(Self::Right),
            "KeyW" | "ArrowUp" => Some(Self::Forward),
            "KeyS" | "ArrowDown" => Some(Self::Back),
            "Space" => Some(Self::Jump),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Forward => "forward",
            Self::Back => "back",
            Self::Jump => "jump",
        }
    }
}

/// Returned when a button name does not match any [`Button`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown button {0:?} (expected one of: left, right, forward, back, jump)")]
pub struct ParseButtonError(pub String);

impl FromStr for Button {
    type Err = ParseButtonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseButtonError(s.to_string()))
    }
}
