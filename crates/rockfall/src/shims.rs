// crates/rockfall/src/shims.rs
//! `extern "C"` entry points stored in the `PluginApi` table. Each one checks
//! its pointers, rebuilds a `Host` from the saved interface and never lets a
//! panic unwind into the engine.

use std::ffi::c_void;

use engine_shared::{
    input_types::InputState,
    plugin_api::{layout_hash, FFIResult, HostContext, HostInterface},
    ENGINE_API_VERSION,
};
use tracing::error;

use crate::host::{FfiHost, Host};
use crate::state::RockfallPlugin;

/// What `PluginApi::state` points at.
pub(crate) struct PluginState {
    pub plugin: RockfallPlugin,
    /// Saved in `on_load`; later calls only receive the context pointer.
    pub iface: Option<HostInterface>,
}

impl PluginState {
    pub fn new(plugin: RockfallPlugin) -> Self {
        Self { plugin, iface: None }
    }
}

fn catch_ffi_panic<F>(f: F) -> FFIResult
where
    F: FnOnce() -> FFIResult + std::panic::UnwindSafe,
{
    match std::panic::catch_unwind(f) {
        Ok(res) => res,
        Err(_) => FFIResult::PanicDetected,
    }
}

pub extern "C" fn on_load(
    state: *mut c_void,
    ctx: *mut HostContext,
    iface: *const HostInterface,
) -> FFIResult {
    catch_ffi_panic(|| {
        if state.is_null() || iface.is_null() {
            return FFIResult::Error;
        }

        unsafe {
            let state = &mut *(state as *mut PluginState);
            let iface = &*iface;
            state.iface = Some(*iface);

            let mut host = FfiHost::new(iface, ctx);
            match state.plugin.load(&mut host) {
                Ok(()) => FFIResult::Success,
                Err(err) => {
                    error!(%err, "game failed to start");
                    host.log(&format!("Rockfall failed to start: {err}"));
                    FFIResult::InitFailed
                }
            }
        }
    })
}

pub extern "C" fn on_update(
    state: *mut c_void,
    ctx: *mut HostContext,
    input: *const InputState,
    dt: f32,
) -> FFIResult {
    catch_ffi_panic(|| {
        if state.is_null() || input.is_null() {
            return FFIResult::Error;
        }

        unsafe {
            let state = &mut *(state as *mut PluginState);
            let Some(iface) = state.iface else {
                return FFIResult::NotInitialized;
            };

            let mut host = FfiHost::new(&iface, ctx);
            if state.plugin.update(&mut host, &*input, dt) {
                FFIResult::Success
            } else {
                FFIResult::NotInitialized
            }
        }
    })
}

pub extern "C" fn on_unload(state: *mut c_void, ctx: *mut HostContext) -> FFIResult {
    catch_ffi_panic(|| {
        if state.is_null() {
            return FFIResult::Error;
        }

        unsafe {
            let state = &mut *(state as *mut PluginState);
            if let Some(iface) = state.iface.take() {
                let mut host = FfiHost::new(&iface, ctx);
                state.plugin.unload(&mut host);
            }
        }

        FFIResult::Success
    })
}

pub extern "C" fn drop_state(state: *mut c_void) {
    if !state.is_null() {
        unsafe { drop(Box::from_raw(state as *mut PluginState)); }
    }
}

pub extern "C" fn get_layout_hash() -> u64 {
    layout_hash()
}

pub extern "C" fn get_api_version() -> u32 {
    ENGINE_API_VERSION
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::host::RecordingHost;
    use engine_shared::input_types::{action_mask, action_names};
    use engine_shared::{ActionId, AssetId, PluginApi, VisualId, INVALID_ASSET, INVALID_VISUAL};
    use glam::{Vec2, Vec3};

    // A HostInterface whose context pointer is a RecordingHost, so the whole
    // FFI path can be driven without an engine.

    fn host<'a>(ctx: *mut HostContext) -> &'a mut RecordingHost {
        unsafe { &mut *(ctx as *mut RecordingHost) }
    }

    fn text<'a>(ptr: *const u8, len: usize) -> &'a str {
        unsafe { std::str::from_utf8(std::slice::from_raw_parts(ptr, len)).unwrap() }
    }

    extern "C" fn log(ctx: *mut HostContext, ptr: *const u8, len: usize) {
        host(ctx).log(text(ptr, len));
    }
    extern "C" fn get_action_id(ctx: *mut HostContext, ptr: *const u8, len: usize) -> ActionId {
        host(ctx).action_id(text(ptr, len))
    }
    extern "C" fn load_sprite(ctx: *mut HostContext, ptr: *const u8, len: usize) -> AssetId {
        host(ctx).load_sprite(text(ptr, len)).unwrap_or(INVALID_ASSET)
    }
    extern "C" fn load_audio(ctx: *mut HostContext, ptr: *const u8, len: usize) -> AssetId {
        host(ctx).load_audio(text(ptr, len)).unwrap_or(INVALID_ASSET)
    }
    extern "C" fn sprite_size(ctx: *mut HostContext, sprite: AssetId) -> Vec2 {
        host(ctx).sprite_size(sprite)
    }
    extern "C" fn create_visual(ctx: *mut HostContext, ptr: *const u8, len: usize) -> VisualId {
        host(ctx).create_visual(text(ptr, len)).unwrap_or(INVALID_VISUAL)
    }
    extern "C" fn destroy_visual(ctx: *mut HostContext, visual: VisualId) {
        host(ctx).destroy_visual(visual)
    }
    extern "C" fn set_tag(ctx: *mut HostContext, visual: VisualId, ptr: *const u8, len: usize) {
        host(ctx).set_tag(visual, text(ptr, len))
    }
    extern "C" fn set_sprite(ctx: *mut HostContext, visual: VisualId, sprite: AssetId) {
        host(ctx).set_sprite(visual, sprite)
    }
    extern "C" fn get_position(ctx: *mut HostContext, visual: VisualId) -> Vec3 {
        host(ctx).position(visual)
    }
    extern "C" fn set_position(ctx: *mut HostContext, visual: VisualId, pos: Vec3) {
        host(ctx).set_position(visual, pos)
    }
    extern "C" fn play_one_shot(ctx: *mut HostContext, visual: VisualId, clip: AssetId) {
        host(ctx).play_one_shot(visual, clip)
    }
    extern "C" fn play_looped(ctx: *mut HostContext, visual: VisualId, clip: AssetId) {
        host(ctx).play_looped(visual, clip)
    }
    extern "C" fn stop_audio(ctx: *mut HostContext, visual: VisualId) {
        host(ctx).stop_audio(visual)
    }

    fn recording_interface() -> HostInterface {
        HostInterface {
            log: Some(log),
            get_action_id,
            load_sprite,
            load_audio,
            sprite_size,
            create_visual,
            destroy_visual,
            set_tag,
            set_sprite,
            get_position,
            set_position,
            play_one_shot,
            play_looped,
            stop_audio,
        }
    }

    fn ctx_of(host: &mut RecordingHost) -> *mut HostContext {
        host as *mut RecordingHost as *mut HostContext
    }

    fn api() -> PluginApi {
        crate::create_plugin_api(GameConfig::default(), 1)
    }

    #[test]
    fn full_session_through_the_table() {
        let mut recording = RecordingHost::new();
        let ctx = ctx_of(&mut recording);
        let iface = recording_interface();
        let api = api();

        assert_eq!((api.get_api_version)(), ENGINE_API_VERSION);
        assert_eq!((api.get_layout_hash)(), layout_hash());
        assert_eq!((api.on_load)(api.state, ctx, &iface), FFIResult::Success);

        let fire = action_mask(host(ctx).action_id(action_names::FIRE));
        let input = InputState::from_transition(0, fire);
        assert_eq!((api.on_update)(api.state, ctx, &input, 0.016), FFIResult::Success);
        assert_eq!(host(ctx).count_named("Missile"), 1);

        assert_eq!((api.on_unload)(api.state, ctx), FFIResult::Success);
        assert_eq!(host(ctx).live_visuals(), 0);
        (api.drop_state)(api.state);

        assert_eq!(recording.logs(), ["Rockfall plugin begin", "Rockfall plugin end"]);
    }

    #[test]
    fn update_before_load_is_rejected() {
        let mut recording = RecordingHost::new();
        let api = api();
        let input = InputState::default();

        assert_eq!(
            (api.on_update)(api.state, ctx_of(&mut recording), &input, 0.016),
            FFIResult::NotInitialized
        );
        (api.drop_state)(api.state);
    }

    #[test]
    fn failed_start_reports_init_failed() {
        let mut recording = RecordingHost::new().with_missing_asset("ufo");
        let ctx = ctx_of(&mut recording);
        let iface = recording_interface();
        let api = api();

        assert_eq!((api.on_load)(api.state, ctx, &iface), FFIResult::InitFailed);
        let input = InputState::default();
        assert_eq!((api.on_update)(api.state, ctx, &input, 0.016), FFIResult::NotInitialized);
        (api.drop_state)(api.state);

        assert!(recording.logs().iter().any(|l| l.contains("ufo")));
    }

    #[test]
    fn null_pointers_are_errors() {
        let iface = recording_interface();
        let input = InputState::default();
        let null_ctx = std::ptr::null_mut();

        assert_eq!(on_load(std::ptr::null_mut(), null_ctx, &iface), FFIResult::Error);
        assert_eq!(on_update(std::ptr::null_mut(), null_ctx, &input, 0.0), FFIResult::Error);
        assert_eq!(on_unload(std::ptr::null_mut(), null_ctx), FFIResult::Error);
        drop_state(std::ptr::null_mut());
    }

    #[test]
    fn panics_are_caught() {
        assert_eq!(catch_ffi_panic(|| panic!("boom")), FFIResult::PanicDetected);
        assert_eq!(catch_ffi_panic(|| FFIResult::Success), FFIResult::Success);
    }
}
