// crates/engine_shared/src/input_types.rs
//! Compact, FFI-friendly input types passed from host to plugin every frame.

/// Stable Integer ID for Actions (FFI-safe)
pub type ActionId = u32;
pub const ACTION_NOT_FOUND: ActionId = u32::MAX;

/// Digital actions are packed into a u64, so ids at or above this are ignored.
pub const MAX_ACTIONS: usize = 64;

/// Names of the actions the game asks the host to resolve.
pub mod action_names {
    pub const MOVE_UP: &str = "MoveUp";
    pub const MOVE_DOWN: &str = "MoveDown";
    pub const MOVE_LEFT: &str = "MoveLeft";
    pub const MOVE_RIGHT: &str = "MoveRight";
    pub const FIRE: &str = "Fire";

    pub const ALL: [&str; 5] = [MOVE_UP, MOVE_DOWN, MOVE_LEFT, MOVE_RIGHT, FIRE];
}

/// Per-frame snapshot of the digital actions.
///
/// - `held`: action is down this frame (`GetKey`)
/// - `pressed`: action went down this frame (`GetKeyDown`)
/// - `released`: action went up this frame (`GetKeyUp`)
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub held: u64,
    pub pressed: u64,
    pub released: u64,
}

impl InputState {
    /// Builds the edges from last frame's held mask and this frame's one.
    pub fn from_transition(previous: u64, current: u64) -> Self {
        Self {
            held: current,
            pressed: current & !previous,
            released: previous & !current,
        }
    }

    /// Same held mask, no edges. Used for extra fixed steps inside one frame.
    pub fn held_only(&self) -> Self {
        Self {
            held: self.held,
            pressed: 0,
            released: 0,
        }
    }

    pub fn is_held(&self, action_id: ActionId) -> bool {
        self.held & action_mask(action_id) != 0
    }

    pub fn was_pressed(&self, action_id: ActionId) -> bool {
        self.pressed & action_mask(action_id) != 0
    }

    pub fn was_released(&self, action_id: ActionId) -> bool {
        self.released & action_mask(action_id) != 0
    }
}

/// Bit for `action_id`; zero for out-of-range ids (including ACTION_NOT_FOUND).
pub fn action_mask(action_id: ActionId) -> u64 {
    if (action_id as usize) >= MAX_ACTIONS {
        0
    } else {
        1u64 << action_id
    }
}
