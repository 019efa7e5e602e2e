// crates/rockfall/src/frame.rs

use rand_chacha::ChaCha8Rng;

use crate::assets::AssetCache;
use crate::config::GameConfig;
use crate::host::Host;

/// Everything an entity may touch while it is updated or spawned.
pub struct Frame<'a> {
    pub host: &'a mut dyn Host,
    pub assets: &'a AssetCache,
    pub config: &'a GameConfig,
    pub rng: &'a mut ChaCha8Rng,
    /// Seconds simulated by this frame.
    pub dt: f32,
    /// Simulation clock after this frame's advance.
    pub now: f64,
}
