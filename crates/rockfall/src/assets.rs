// crates/rockfall/src/assets.rs
//! Every sprite and clip the game uses, loaded once when the game starts and
//! shared read-only by all entities afterwards.

use engine_shared::AssetId;
use glam::Vec2;
use tracing::debug;

use crate::config::GameConfig;
use crate::error::{GameError, Result};
use crate::host::Host;

/// A loaded sprite and its natural size in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub id: AssetId,
    pub size: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioClip(pub AssetId);

#[derive(Debug, Clone)]
pub struct ShipAssets {
    pub left: Sprite,
    pub right: Sprite,
    pub center: Sprite,
    pub fire: AudioClip,
    pub player_explosion: AudioClip,
    pub rock_explosion: AudioClip,
}

#[derive(Debug, Clone)]
pub struct AssetCache {
    pub background: Sprite,
    pub missile: Sprite,
    pub rock_frames: Vec<Sprite>,
    pub explosion_frames: Vec<Sprite>,
    pub alien: Sprite,
    pub alien_sound: AudioClip,
    pub ship: ShipAssets,
}

impl AssetCache {
    /// Fails on the first asset the host cannot load.
    pub fn load(host: &mut dyn Host, config: &GameConfig) -> Result<Self> {
        let paths = &config.assets;

        let rock_frames = (0..config.rock.frame_count)
            .map(|i| load_sprite(host, &paths.rock_frame(i)))
            .collect::<Result<Vec<_>>>()?;
        let explosion_frames = (0..config.explosion.frame_count)
            .map(|i| load_sprite(host, &paths.explosion_frame(i)))
            .collect::<Result<Vec<_>>>()?;

        let cache = Self {
            background: load_sprite(host, &paths.background)?,
            missile: load_sprite(host, &paths.missile)?,
            rock_frames,
            explosion_frames,
            alien: load_sprite(host, &paths.alien)?,
            alien_sound: load_audio(host, &paths.alien_sound)?,
            ship: ShipAssets {
                left: load_sprite(host, &paths.ship_left)?,
                right: load_sprite(host, &paths.ship_right)?,
                center: load_sprite(host, &paths.ship_center)?,
                fire: load_audio(host, &paths.fire_sound)?,
                player_explosion: load_audio(host, &paths.player_explosion_sound)?,
                rock_explosion: load_audio(host, &paths.rock_explosion_sound)?,
            },
        };

        debug!(
            rock_frames = cache.rock_frames.len(),
            explosion_frames = cache.explosion_frames.len(),
            "asset cache loaded"
        );
        Ok(cache)
    }
}

fn load_sprite(host: &mut dyn Host, path: &str) -> Result<Sprite> {
    let id = host.load_sprite(path).ok_or_else(|| GameError::AssetLoad {
        kind: "sprite",
        path: path.to_string(),
    })?;
    Ok(Sprite {
        id,
        size: host.sprite_size(id),
    })
}

fn load_audio(host: &mut dyn Host, path: &str) -> Result<AudioClip> {
    host.load_audio(path)
        .map(AudioClip)
        .ok_or_else(|| GameError::AssetLoad {
            kind: "audio clip",
            path: path.to_string(),
        })
}
