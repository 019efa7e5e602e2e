// crates/engine_host/src/input/keyboard.rs

use engine_shared::input_types::action_mask;
use engine_shared::{ActionId, InputState};

/// Tracks which actions are held and turns frame-to-frame changes into the
/// pressed / released edges the plugin sees.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyboardState {
    held: u64,
    previous: u64,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, action: ActionId) {
        self.held |= action_mask(action);
    }

    pub fn release(&mut self, action: ActionId) {
        self.held &= !action_mask(action);
    }

    pub fn is_held(&self, action: ActionId) -> bool {
        self.held & action_mask(action) != 0
    }

    /// Input for the next simulation step.
    pub fn snapshot(&self) -> InputState {
        InputState::from_transition(self.previous, self.held)
    }

    /// Call once the plugin has seen this frame's edges.
    pub fn end_frame(&mut self) {
        self.previous = self.held;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_last_exactly_one_frame() {
        let mut keys = KeyboardState::new();
        keys.press(4);

        let first = keys.snapshot();
        assert!(first.is_held(4) && first.was_pressed(4));
        keys.end_frame();

        let second = keys.snapshot();
        assert!(second.is_held(4) && !second.was_pressed(4));

        keys.release(4);
        let third = keys.snapshot();
        assert!(!third.is_held(4) && third.was_released(4));
        keys.end_frame();
        assert_eq!(keys.snapshot(), InputState::default());
    }

    #[test]
    fn unknown_action_is_ignored() {
        let mut keys = KeyboardState::new();
        keys.press(engine_shared::ACTION_NOT_FOUND);
        assert_eq!(keys.snapshot(), InputState::default());
    }
}
