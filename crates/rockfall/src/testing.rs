// crates/rockfall/src/testing.rs
//! Shared setup for the unit tests: a recording host with the asset cache
//! already loaded and a clock the test advances by hand.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::assets::AssetCache;
use crate::config::GameConfig;
use crate::frame::Frame;
use crate::host::RecordingHost;

pub(crate) struct Fixture {
    pub host: RecordingHost,
    pub assets: AssetCache,
    pub config: GameConfig,
    pub rng: ChaCha8Rng,
    pub now: f64,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with(RecordingHost::new(), GameConfig::default())
    }

    pub fn with(mut host: RecordingHost, config: GameConfig) -> Self {
        let assets = AssetCache::load(&mut host, &config).expect("fixture assets load");
        Self {
            host,
            assets,
            config,
            rng: ChaCha8Rng::seed_from_u64(7),
            now: 0.0,
        }
    }

    /// Advance the clock by `dt` and hand out the frame for that step.
    pub fn frame(&mut self, dt: f32) -> Frame<'_> {
        self.now += f64::from(dt);
        Frame {
            host: &mut self.host,
            assets: &self.assets,
            config: &self.config,
            rng: &mut self.rng,
            dt,
            now: self.now,
        }
    }
}
