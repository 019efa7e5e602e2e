// crates/rockfall/src/controls.rs

use engine_shared::input_types::action_names;
use engine_shared::{ActionId, InputState, ACTION_NOT_FOUND};
use tracing::warn;

use crate::host::Host;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    /// Down this frame.
    pub held: bool,
    /// Went down this frame.
    pub pressed: bool,
    /// Went up this frame.
    pub released: bool,
}

/// What the ship reads each frame, already decoded from action ids.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShipInput {
    pub left: KeyState,
    pub right: KeyState,
    pub up: KeyState,
    pub down: KeyState,
    pub fire: KeyState,
}

/// Action ids resolved from the host's registry at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub left: ActionId,
    pub right: ActionId,
    pub up: ActionId,
    pub down: ActionId,
    pub fire: ActionId,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            left: ACTION_NOT_FOUND,
            right: ACTION_NOT_FOUND,
            up: ACTION_NOT_FOUND,
            down: ACTION_NOT_FOUND,
            fire: ACTION_NOT_FOUND,
        }
    }
}

impl Controls {
    pub fn resolve(host: &mut dyn Host) -> Self {
        let mut lookup = |name: &str| {
            let id = host.action_id(name);
            if id == ACTION_NOT_FOUND {
                warn!(action = name, "host has no binding for action");
            }
            id
        };

        Self {
            left: lookup(action_names::MOVE_LEFT),
            right: lookup(action_names::MOVE_RIGHT),
            up: lookup(action_names::MOVE_UP),
            down: lookup(action_names::MOVE_DOWN),
            fire: lookup(action_names::FIRE),
        }
    }

    pub fn read(&self, input: &InputState) -> ShipInput {
        let key = |id: ActionId| KeyState {
            held: input.is_held(id),
            pressed: input.was_pressed(id),
            released: input.was_released(id),
        };

        ShipInput {
            left: key(self.left),
            right: key(self.right),
            up: key(self.up),
            down: key(self.down),
            fire: key(self.fire),
        }
    }
}
