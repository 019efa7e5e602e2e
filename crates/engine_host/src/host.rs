// crates/engine_host/src/host.rs
//! The `HostInterface` implementation handed to plugins. Every callback casts
//! the context pointer back to the `HeadlessEngine` it was created from.

use engine_shared::{
    ActionId, AssetId, HostContext, HostInterface, VisualId, ACTION_NOT_FOUND, INVALID_ASSET,
    INVALID_VISUAL,
};
use glam::{Vec2, Vec3};
use tracing::error;

use crate::engine::{AssetKind, HeadlessEngine};

/// Resolve the context pointer; `None` (and an error log) when it is null.
///
/// # Safety
/// A non-null `ctx` must point at a live `HeadlessEngine` with no other
/// outstanding borrow for the duration of the callback.
unsafe fn engine<'a>(ctx: *mut HostContext, call: &str) -> Option<&'a mut HeadlessEngine> {
    if ctx.is_null() {
        error!(call, "host callback invoked with null HostContext");
        return None;
    }
    Some(&mut *(ctx as *mut HeadlessEngine))
}

/// # Safety
/// `ptr` must be valid for `len` bytes when non-null.
unsafe fn read_str<'a>(ptr: *const u8, len: usize) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    std::str::from_utf8(std::slice::from_raw_parts(ptr, len)).ok()
}

/// The context pointer the callbacks expect for `engine`.
pub fn context_of(engine: &mut HeadlessEngine) -> *mut HostContext {
    engine as *mut HeadlessEngine as *mut HostContext
}

extern "C" fn host_log(ctx: *mut HostContext, msg_ptr: *const u8, msg_len: usize) {
    unsafe {
        if let (Some(engine), Some(message)) = (engine(ctx, "log"), read_str(msg_ptr, msg_len)) {
            engine.log(message);
        }
    }
}

extern "C" fn host_get_action_id(ctx: *mut HostContext, name_ptr: *const u8, name_len: usize) -> ActionId {
    unsafe {
        match (engine(ctx, "get_action_id"), read_str(name_ptr, name_len)) {
            (Some(engine), Some(name)) => engine.action_id(name),
            _ => ACTION_NOT_FOUND,
        }
    }
}

unsafe fn load(ctx: *mut HostContext, kind: AssetKind, path_ptr: *const u8, path_len: usize) -> AssetId {
    match (engine(ctx, "load_asset"), read_str(path_ptr, path_len)) {
        (Some(engine), Some(path)) => engine.load_asset(kind, path),
        _ => INVALID_ASSET,
    }
}

extern "C" fn host_load_sprite(ctx: *mut HostContext, path_ptr: *const u8, path_len: usize) -> AssetId {
    unsafe { load(ctx, AssetKind::Sprite, path_ptr, path_len) }
}

extern "C" fn host_load_audio(ctx: *mut HostContext, path_ptr: *const u8, path_len: usize) -> AssetId {
    unsafe { load(ctx, AssetKind::Audio, path_ptr, path_len) }
}

extern "C" fn host_sprite_size(ctx: *mut HostContext, sprite: AssetId) -> Vec2 {
    unsafe { engine(ctx, "sprite_size").map_or(Vec2::ZERO, |e| e.sprite_size(sprite)) }
}

extern "C" fn host_create_visual(ctx: *mut HostContext, name_ptr: *const u8, name_len: usize) -> VisualId {
    unsafe {
        match (engine(ctx, "create_visual"), read_str(name_ptr, name_len)) {
            (Some(engine), Some(name)) => engine.create_visual(name),
            _ => INVALID_VISUAL,
        }
    }
}

extern "C" fn host_destroy_visual(ctx: *mut HostContext, visual: VisualId) {
    unsafe {
        if let Some(engine) = engine(ctx, "destroy_visual") {
            engine.destroy_visual(visual);
        }
    }
}

extern "C" fn host_set_tag(ctx: *mut HostContext, visual: VisualId, tag_ptr: *const u8, tag_len: usize) {
    unsafe {
        if let (Some(engine), Some(tag)) = (engine(ctx, "set_tag"), read_str(tag_ptr, tag_len)) {
            engine.set_tag(visual, tag);
        }
    }
}

extern "C" fn host_set_sprite(ctx: *mut HostContext, visual: VisualId, sprite: AssetId) {
    unsafe {
        if let Some(engine) = engine(ctx, "set_sprite") {
            engine.set_sprite(visual, sprite);
        }
    }
}

extern "C" fn host_get_position(ctx: *mut HostContext, visual: VisualId) -> Vec3 {
    unsafe { engine(ctx, "get_position").map_or(Vec3::ZERO, |e| e.position(visual)) }
}

extern "C" fn host_set_position(ctx: *mut HostContext, visual: VisualId, pos: Vec3) {
    unsafe {
        if let Some(engine) = engine(ctx, "set_position") {
            engine.set_position(visual, pos);
        }
    }
}

extern "C" fn host_play_one_shot(ctx: *mut HostContext, visual: VisualId, clip: AssetId) {
    unsafe {
        if let Some(engine) = engine(ctx, "play_one_shot") {
            engine.play_one_shot(visual, clip);
        }
    }
}

extern "C" fn host_play_looped(ctx: *mut HostContext, visual: VisualId, clip: AssetId) {
    unsafe {
        if let Some(engine) = engine(ctx, "play_looped") {
            engine.play_looped(visual, clip);
        }
    }
}

extern "C" fn host_stop_audio(ctx: *mut HostContext, visual: VisualId) {
    unsafe {
        if let Some(engine) = engine(ctx, "stop_audio") {
            engine.stop_audio(visual);
        }
    }
}

/// Helper to construct the interface struct
pub fn create_interface() -> HostInterface {
    HostInterface {
        log: Some(host_log),
        get_action_id: host_get_action_id,
        load_sprite: host_load_sprite,
        load_audio: host_load_audio,
        sprite_size: host_sprite_size,
        create_visual: host_create_visual,
        destroy_visual: host_destroy_visual,
        set_tag: host_set_tag,
        set_sprite: host_set_sprite,
        get_position: host_get_position,
        set_position: host_set_position,
        play_one_shot: host_play_one_shot,
        play_looped: host_play_looped,
        stop_audio: host_stop_audio,
    }
}
