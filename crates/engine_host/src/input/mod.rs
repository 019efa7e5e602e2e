// crates/engine_host/src/input/mod.rs
pub mod keyboard;
pub mod registry;

// Re-export core types to keep the API `crate::input::ActionRegistry`
pub use keyboard::KeyboardState;
pub use registry::ActionRegistry;
