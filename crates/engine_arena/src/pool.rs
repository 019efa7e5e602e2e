// crates/engine_arena/src/pool.rs
use crate::Handle;

struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Owning container with stable, generation-checked handles.
///
/// Iteration follows insertion order. Removal keeps the relative order of the
/// remaining values.
pub struct Pool<T> {
    slots: Vec<Slot<T>>,
    free_indices: Vec<u32>,
    order: Vec<u32>, // live slot indices, oldest first
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Pool<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_indices: Vec::new(),
            order: Vec::new(),
        }
    }

    pub fn insert(&mut self, value: T) -> Handle<T> {
        let index = if let Some(idx) = self.free_indices.pop() {
            self.slots[idx as usize].value = Some(value);
            idx
        } else {
            self.slots.push(Slot {
                generation: 0,
                value: Some(value),
            });
            (self.slots.len() - 1) as u32
        };

        self.order.push(index);
        Handle::new(index, self.slots[index as usize].generation)
    }

    /// Takes the value out and invalidates every copy of `handle`.
    /// Returns `None` for a handle that no longer resolves.
    pub fn remove(&mut self, handle: Handle<T>) -> Option<T> {
        let slot = self.slot_mut(handle)?;
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);

        let index = handle.index() as u32;
        if let Some(pos) = self.order.iter().position(|&i| i == index) {
            self.order.remove(pos);
        }
        self.free_indices.push(index);
        Some(value)
    }

    pub fn get(&self, handle: Handle<T>) -> Option<&T> {
        let slot = self.slots.get(handle.index())?;
        if slot.generation != handle.generation() {
            return None;
        }
        slot.value.as_ref()
    }

    pub fn get_mut(&mut self, handle: Handle<T>) -> Option<&mut T> {
        self.slot_mut(handle)?.value.as_mut()
    }

    pub fn contains(&self, handle: Handle<T>) -> bool {
        self.get(handle).is_some()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Snapshot of the live handles, oldest first.
    ///
    /// Walk it with `.into_iter().rev()` to mutate or remove while iterating;
    /// handles removed earlier in the walk simply stop resolving.
    pub fn handles(&self) -> Vec<Handle<T>> {
        self.order
            .iter()
            .map(|&i| Handle::new(i, self.slots[i as usize].generation))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Handle<T>, &T)> + '_ {
        self.order.iter().filter_map(move |&i| {
            let slot = &self.slots[i as usize];
            slot.value
                .as_ref()
                .map(|value| (Handle::new(i, slot.generation), value))
        })
    }

    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.iter().map(|(_, value)| value)
    }

    /// Removes everything, oldest first. All outstanding handles go stale.
    pub fn drain(&mut self) -> Vec<T> {
        let order = std::mem::take(&mut self.order);
        let mut drained = Vec::with_capacity(order.len());
        for index in order {
            let slot = &mut self.slots[index as usize];
            if let Some(value) = slot.value.take() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free_indices.push(index);
                drained.push(value);
            }
        }
        drained
    }

    fn slot_mut(&mut self, handle: Handle<T>) -> Option<&mut Slot<T>> {
        let slot = self.slots.get_mut(handle.index())?;
        if slot.generation != handle.generation() {
            return None;
        }
        Some(slot)
    }
}
