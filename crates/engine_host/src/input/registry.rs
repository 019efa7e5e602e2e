// crates/engine_host/src/input/registry.rs
use std::collections::HashMap;

use engine_shared::input_types::action_names;
use engine_shared::{ActionId, ACTION_NOT_FOUND, MAX_ACTIONS};

/// Named actions and the bit each one occupies in `InputState`.
#[derive(Default, Clone, Debug)]
pub struct ActionRegistry {
    name_to_id: HashMap<String, ActionId>,
    next_id: ActionId,
}

impl ActionRegistry {
    /// Registry with every action the shipped games bind.
    pub fn with_default_actions() -> Self {
        let mut registry = Self::default();
        for name in action_names::ALL {
            registry.register(name);
        }
        registry
    }

    /// Returns the existing id for a known name. `ACTION_NOT_FOUND` once
    /// every input bit is taken.
    pub fn register(&mut self, name: &str) -> ActionId {
        if let Some(&id) = self.name_to_id.get(name) {
            return id;
        }
        if self.next_id as usize >= MAX_ACTIONS {
            return ACTION_NOT_FOUND;
        }
        let id = self.next_id;
        self.name_to_id.insert(name.to_string(), id);
        self.next_id += 1;
        id
    }

    pub fn get_id(&self, name: &str) -> Option<ActionId> {
        self.name_to_id.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.name_to_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.name_to_id.is_empty()
    }
}
