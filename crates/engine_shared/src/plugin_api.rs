// crates/engine_shared/src/plugin_api.rs
use core::ffi::c_void;
use core::mem::size_of;

use glam::{Vec2, Vec3};

use crate::input_types::{ActionId, InputState};

// ==================================================================================
// 1. OPAQUE HANDLES (The "Firewall")
// ==================================================================================

/// Represents the Host's internal state (visual objects, assets, input registry).
///
/// PROPERTIES:
/// 1. Opaque: The plugin cannot see the fields (size is 0), so it cannot access memory directly.
/// 2. Type-Safe: It is a distinct type from `*mut c_void`, preventing accidental pointer mixing.
/// 3. !Send/!Sync: PhantomData ensures this handle stays on the main thread.
#[repr(C)]
pub struct HostContext {
    _data: [u8; 0],
    _marker: core::marker::PhantomData<(*mut u8, core::marker::PhantomPinned)>,
}

/// Host-side visual object (transform + sprite renderer + audio source).
pub type VisualId = u64;
pub const INVALID_VISUAL: VisualId = 0;

/// Host-side loaded asset (sprite or audio clip).
pub type AssetId = u32;
pub const INVALID_ASSET: AssetId = u32::MAX;

// ==================================================================================
// 2. STRUCTURAL HASHING (The "Handshake")
// ==================================================================================

/// FNV-1a over a type name.
pub fn calculate_layout_hash(type_name: &str) -> u64 {
    fnv1a(0xcbf29ce484222325, type_name.as_bytes())
}

fn fnv1a(mut hash: u64, bytes: &[u8]) -> u64 {
    const PRIME: u64 = 0x100000001b3;
    for &b in bytes {
        hash ^= b as u64;
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

/// Hash of every type that crosses the boundary: names and sizes.
/// Host and plugin each compute it; a mismatch means they were built
/// against different copies of this crate.
pub fn layout_hash() -> u64 {
    let layout = [
        ("HostInterface", size_of::<HostInterface>()),
        ("PluginApi", size_of::<PluginApi>()),
        ("InputState", size_of::<InputState>()),
        ("FFIResult", size_of::<FFIResult>()),
        ("Vec3", size_of::<Vec3>()),
    ];

    layout.iter().fold(calculate_layout_hash("engine_shared"), |hash, (name, size)| {
        let hash = fnv1a(hash, name.as_bytes());
        fnv1a(hash, &(*size as u64).to_le_bytes())
    })
}

// ==================================================================================
// 3. RESULT CODES
// ==================================================================================

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FFIResult {
    Success = 0,
    Error = 1,
    /// The game could not be initialized (an asset or visual object failed to load).
    InitFailed = 2,
    /// `on_update` called before a successful `on_load`.
    NotInitialized = 3,
    PanicDetected = 4,
}

// ==================================================================================
// 4. HOST INTERFACE
// ==================================================================================

/// Primitive operations the host engine provides to the plugin.
///
/// Strings are passed as (ptr, len) UTF-8 slices. Failure is reported with
/// `INVALID_ASSET` / `INVALID_VISUAL`.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct HostInterface {
    pub log: Option<extern "C" fn(ctx: *mut HostContext, msg_ptr: *const u8, msg_len: usize)>,
    pub get_action_id:
        extern "C" fn(ctx: *mut HostContext, name_ptr: *const u8, name_len: usize) -> ActionId,

    // Assets
    pub load_sprite:
        extern "C" fn(ctx: *mut HostContext, path_ptr: *const u8, path_len: usize) -> AssetId,
    pub load_audio:
        extern "C" fn(ctx: *mut HostContext, path_ptr: *const u8, path_len: usize) -> AssetId,
    /// Natural size of a sprite in world units.
    pub sprite_size: extern "C" fn(ctx: *mut HostContext, sprite: AssetId) -> Vec2,

    // Visual objects
    pub create_visual:
        extern "C" fn(ctx: *mut HostContext, name_ptr: *const u8, name_len: usize) -> VisualId,
    pub destroy_visual: extern "C" fn(ctx: *mut HostContext, visual: VisualId),
    pub set_tag:
        extern "C" fn(ctx: *mut HostContext, visual: VisualId, tag_ptr: *const u8, tag_len: usize),
    pub set_sprite: extern "C" fn(ctx: *mut HostContext, visual: VisualId, sprite: AssetId),
    pub get_position: extern "C" fn(ctx: *mut HostContext, visual: VisualId) -> Vec3,
    pub set_position: extern "C" fn(ctx: *mut HostContext, visual: VisualId, pos: Vec3),

    // Audio
    pub play_one_shot: extern "C" fn(ctx: *mut HostContext, visual: VisualId, clip: AssetId),
    pub play_looped: extern "C" fn(ctx: *mut HostContext, visual: VisualId, clip: AssetId),
    pub stop_audio: extern "C" fn(ctx: *mut HostContext, visual: VisualId),
}

// ==================================================================================
// 5. PLUGIN API
// ==================================================================================

#[repr(C)]
pub struct PluginApi {
    pub state: *mut c_void,

    /// Initialization entry point, called once after the handshake.
    pub on_load: extern "C" fn(*mut c_void, *mut HostContext, *const HostInterface) -> FFIResult,
    /// Simulate one frame of `dt` seconds.
    pub on_update: extern "C" fn(*mut c_void, *mut HostContext, *const InputState, f32) -> FFIResult,
    pub on_unload: extern "C" fn(*mut c_void, *mut HostContext) -> FFIResult,
    pub drop_state: extern "C" fn(*mut c_void),

    // The Safety Check
    // The Host calls these immediately after loading.
    // If either doesn't match the Host's expectation, the load is aborted.
    pub get_layout_hash: extern "C" fn() -> u64,
    pub get_api_version: extern "C" fn() -> u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_hash_is_stable_within_a_build() {
        assert_eq!(layout_hash(), layout_hash());
        assert_ne!(layout_hash(), calculate_layout_hash("engine_shared"));
    }

    #[test]
    fn type_name_hash_distinguishes_names() {
        assert_ne!(
            calculate_layout_hash("HostInterface"),
            calculate_layout_hash("PluginApi")
        );
    }
}
