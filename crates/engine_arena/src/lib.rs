// crates/engine_arena/src/lib.rs
//! Generation-indexed owning containers.
//!
//! A `Pool<T>` owns its values outright. Removing a value bumps the slot's
//! generation, so every `Handle<T>` that pointed at it stops resolving instead
//! of dangling.

mod handle;
mod pool;

pub use handle::Handle;
pub use pool::Pool;
