// crates/engine_shared/src/lib.rs
//! Contract shared by the host engine and the game plugin.
//!
//! Everything in here crosses the `extern "C"` boundary, so every type is
//! `#[repr(C)]` and only made of plain data and function pointers.

pub mod input_types;
pub mod plugin_api;

pub use input_types::{ActionId, InputState, ACTION_NOT_FOUND, MAX_ACTIONS};
pub use plugin_api::{
    AssetId, FFIResult, HostContext, HostInterface, PluginApi, VisualId, INVALID_ASSET,
    INVALID_VISUAL,
};

/// Bumped whenever `HostInterface` or `PluginApi` change shape.
pub const ENGINE_API_VERSION: u32 = 1;
