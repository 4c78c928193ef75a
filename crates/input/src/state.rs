use crate::action::Button;

/// Pressed-state record for the logical buttons.
///
/// Key handlers write to it whenever events arrive; the game samples it once
/// per tick. Directional buttons are level-triggered. Jump is edge-triggered:
/// a key-down latches a request that the next tick consumes with
/// [`InputState::take_jump`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    left: bool,
    right: bool,
    forward: bool,
    back: bool,
    jump_held: bool,
    jump_latched: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key-down event by DOM key code. Returns whether the key is bound.
    pub fn key_down(&mut self, code: &str) -> bool {
        match Button::from_key_code(code) {
            Some(button) => {
                self.press(button);
                true
            }
            None => {
                tracing::trace!(code, "ignoring unbound key");
                false
            }
        }
    }

    /// Handle a key-up event by DOM key code. Returns whether the key is bound.
    pub fn key_up(&mut self, code: &str) -> bool {
        match Button::from_key_code(code) {
            Some(button) => {
                self.release(button);
                true
            }
            None => false,
        }
    }

    pub fn press(&mut self, button: Button) {
        match button {
            Button::Left => self.left = true,
            Button::Right => self.right = true,
            Button::Forward => self.forward = true,
            Button::Back => self.back = true,
            Button::Jump => {
                self.jump_held = true;
                self.jump_latched = true;
            }
        }
    }

    pub fn release(&mut self, button: Button) {
        match button {
            Button::Left => self.left = false,
            Button::Right => self.right = false,
            Button::Forward => self.forward = false,
            Button::Back => self.back = false,
            // A latched jump still fires on the next tick even if the key is
            // already up again.
            Button::Jump => self.jump_held = false,
        }
    }

    pub fn is_pressed(&self, button: Button) -> bool {
        match button {
            Button::Left => self.left,
            Button::Right => self.right,
            Button::Forward => self.forward,
            Button::Back => self.back,
            Button::Jump => self.jump_held,
        }
    }

    /// Lateral direction: -1 (left), +1 (right) or 0.
    ///
    /// Left is checked first and wins when both are held.
    pub fn lateral(&self) -> f32 {
        if self.left {
            -1.0
        } else if self.right {
            1.0
        } else {
            0.0
        }
    }

    /// Depth direction: +1 (back), -1 (forward) or 0.
    ///
    /// Back is checked first and wins when both are held.
    pub fn depth(&self) -> f32 {
        if self.back {
            1.0
        } else if self.forward {
            -1.0
        } else {
            0.0
        }
    }

    /// Consume a pending jump request.
    pub fn take_jump(&mut self) -> bool {
        std::mem::take(&mut self.jump_latched)
    }

    /// Whether a jump request is waiting for the next tick.
    pub fn jump_pending(&self) -> bool {
        self.jump_latched
    }

    /// Release everything, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle() {
        let input = InputState::new();
        assert_eq!(input.lateral(), 0.0);
        assert_eq!(input.depth(), 0.0);
        assert!(!input.jump_pending());
    }

    #[test]
    fn key_events_drive_pressed_state() {
        let mut input = InputState::new();
        assert!(input.key_down("KeyD"));
        assert!(input.is_pressed(Button::Right));
        assert_eq!(input.lateral(), 1.0);

        assert!(input.key_up("KeyD"));
        assert!(!input.is_pressed(Button::Right));
        assert_eq!(input.lateral(), 0.0);
    }

    #[test]
    fn unbound_keys_are_ignored() {
        let mut input = InputState::new();
        assert!(!input.key_down("KeyZ"));
        assert!(!input.key_up("KeyZ"));
        assert_eq!(input, InputState::new());
    }

    #[test]
    fn opposing_lateral_keys_left_wins() {
        let mut input = InputState::new();
        input.press(Button::Right);
        input.press(Button::Left);
        assert_eq!(input.lateral(), -1.0);
    }

    #[test]
    fn opposing_depth_keys_back_wins() {
        let mut input = InputState::new();
        input.press(Button::Forward);
        input.press(Button::Back);
        assert_eq!(input.depth(), 1.0);
        input.release(Button::Back);
        assert_eq!(input.depth(), -1.0);
    }

    #[test]
    fn jump_is_consumed_once() {
        let mut input = InputState::new();
        input.key_down("Space");
        assert!(input.take_jump());
        assert!(!input.take_jump());
        // Still held, but holding does not re-trigger.
        assert!(input.is_pressed(Button::Jump));
    }

    #[test]
    fn jump_survives_quick_release() {
        let mut input = InputState::new();
        input.press(Button::Jump);
        input.release(Button::Jump);
        assert!(input.take_jump());
    }

    #[test]
    fn clear_releases_everything() {
        let mut input = InputState::new();
        input.press(Button::Left);
        input.press(Button::Jump);
        input.clear();
        assert_eq!(input, InputState::new());
    }
}
