// crates/rockfall/src/host/mod.rs
//! The engine-side capabilities the game consumes.
//!
//! Game code only ever talks to `dyn Host`. In production that is `FfiHost`,
//! which forwards to the host's `HostInterface` table; tests use
//! `RecordingHost`.

mod ffi;
pub mod headless;

pub use ffi::FfiHost;
pub use headless::RecordingHost;

use engine_shared::{ActionId, AssetId, VisualId};
use glam::{Vec2, Vec3};

pub trait Host {
    fn log(&mut self, message: &str);
    fn action_id(&mut self, name: &str) -> ActionId;

    /// `None` when the host cannot find or decode the asset.
    fn load_sprite(&mut self, path: &str) -> Option<AssetId>;
    fn load_audio(&mut self, path: &str) -> Option<AssetId>;
    fn sprite_size(&mut self, sprite: AssetId) -> Vec2;

    /// `None` when the host refuses to create the object.
    fn create_visual(&mut self, name: &str) -> Option<VisualId>;
    fn destroy_visual(&mut self, visual: VisualId);
    fn set_tag(&mut self, visual: VisualId, tag: &str);
    fn set_sprite(&mut self, visual: VisualId, sprite: AssetId);
    fn position(&mut self, visual: VisualId) -> Vec3;
    fn set_position(&mut self, visual: VisualId, position: Vec3);

    fn play_one_shot(&mut self, visual: VisualId, clip: AssetId);
    fn play_looped(&mut self, visual: VisualId, clip: AssetId);
    fn stop_audio(&mut self, visual: VisualId);
}
