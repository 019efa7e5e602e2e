// crates/rockfall/src/host/ffi.rs

use engine_shared::{
    ActionId, AssetId, HostContext, HostInterface, VisualId, INVALID_ASSET, INVALID_VISUAL,
};
use glam::{Vec2, Vec3};

use super::Host;

/// `Host` backed by the function table the engine handed us in `on_load`.
pub struct FfiHost<'a> {
    iface: &'a HostInterface,
    ctx: *mut HostContext,
}

impl<'a> FfiHost<'a> {
    /// # Safety
    /// `ctx` must be the context pointer the host passed alongside `iface`,
    /// valid for the duration of the current call into the plugin.
    pub unsafe fn new(iface: &'a HostInterface, ctx: *mut HostContext) -> Self {
        Self { iface, ctx }
    }
}

impl Host for FfiHost<'_> {
    fn log(&mut self, message: &str) {
        if let Some(log) = self.iface.log {
            log(self.ctx, message.as_ptr(), message.len());
        }
    }

    fn action_id(&mut self, name: &str) -> ActionId {
        (self.iface.get_action_id)(self.ctx, name.as_ptr(), name.len())
    }

    fn load_sprite(&mut self, path: &str) -> Option<AssetId> {
        let id = (self.iface.load_sprite)(self.ctx, path.as_ptr(), path.len());
        (id != INVALID_ASSET).then_some(id)
    }

    fn load_audio(&mut self, path: &str) -> Option<AssetId> {
        let id = (self.iface.load_audio)(self.ctx, path.as_ptr(), path.len());
        (id != INVALID_ASSET).then_some(id)
    }

    fn sprite_size(&mut self, sprite: AssetId) -> Vec2 {
        (self.iface.sprite_size)(self.ctx, sprite)
    }

    fn create_visual(&mut self, name: &str) -> Option<VisualId> {
        let id = (self.iface.create_visual)(self.ctx, name.as_ptr(), name.len());
        (id != INVALID_VISUAL).then_some(id)
    }

    fn destroy_visual(&mut self, visual: VisualId) {
        (self.iface.destroy_visual)(self.ctx, visual)
    }

    fn set_tag(&mut self, visual: VisualId, tag: &str) {
        (self.iface.set_tag)(self.ctx, visual, tag.as_ptr(), tag.len())
    }

    fn set_sprite(&mut self, visual: VisualId, sprite: AssetId) {
        (self.iface.set_sprite)(self.ctx, visual, sprite)
    }

    fn position(&mut self, visual: VisualId) -> Vec3 {
        (self.iface.get_position)(self.ctx, visual)
    }

    fn set_position(&mut self, visual: VisualId, position: Vec3) {
        (self.iface.set_position)(self.ctx, visual, position)
    }

    fn play_one_shot(&mut self, visual: VisualId, clip: AssetId) {
        (self.iface.play_one_shot)(self.ctx, visual, clip)
    }

    fn play_looped(&mut self, visual: VisualId, clip: AssetId) {
        (self.iface.play_looped)(self.ctx, visual, clip)
    }

    fn stop_audio(&mut self, visual: VisualId) {
        (self.iface.stop_audio)(self.ctx, visual)
    }
}
