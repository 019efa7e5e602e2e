// crates/engine_host/src/engine.rs
//! Headless engine state: everything a `HostContext` points at.
//!
//! Visual objects carry a transform, a sprite renderer and an audio source,
//! but nothing is drawn or played. Audio calls are appended to an event log
//! so sessions can be inspected afterwards.

use std::collections::{BTreeMap, HashMap, HashSet};

use engine_shared::{ActionId, AssetId, VisualId, ACTION_NOT_FOUND, INVALID_ASSET, INVALID_VISUAL};
use glam::{Vec2, Vec3};
use tracing::{debug, info, warn};

use crate::input::ActionRegistry;

/// Sprite sizes are given in world units: 100 pixels per unit.
pub const PIXELS_PER_UNIT: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Sprite,
    Audio,
}

/// What the asset store knows before anything is loaded.
#[derive(Debug, Clone)]
pub struct AssetManifest {
    sprite_sizes: HashMap<String, Vec2>,
    default_sprite_size: Vec2,
    missing: HashSet<String>,
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self {
            sprite_sizes: HashMap::new(),
            default_sprite_size: Vec2::splat(64.0 / PIXELS_PER_UNIT),
            missing: HashSet::new(),
        }
        .with_sprite_pixels("background600x1024", 600, 1024)
    }
}

impl AssetManifest {
    pub fn with_sprite_size(mut self, path: &str, size: Vec2) -> Self {
        self.sprite_sizes.insert(path.to_string(), size);
        self
    }

    pub fn with_sprite_pixels(self, path: &str, width: u32, height: u32) -> Self {
        let size = Vec2::new(width as f32, height as f32) / PIXELS_PER_UNIT;
        self.with_sprite_size(path, size)
    }

    /// Loading `path` will fail.
    pub fn without(mut self, path: &str) -> Self {
        self.missing.insert(path.to_string());
        self
    }

    fn sprite_size(&self, path: &str) -> Vec2 {
        self.sprite_sizes
            .get(path)
            .copied()
            .unwrap_or(self.default_sprite_size)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AudioSource {
    pub clip: Option<AssetId>,
    pub looping: bool,
    pub playing: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VisualObject {
    pub name: String,
    pub tag: Option<String>,
    pub position: Vec3,
    pub sprite: Option<AssetId>,
    pub audio: AudioSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEvent {
    OneShot { visual: VisualId, clip: AssetId },
    Looped { visual: VisualId, clip: AssetId },
    Stopped { visual: VisualId },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineStats {
    pub visuals_created: u64,
    pub visuals_destroyed: u64,
    pub assets_loaded: u64,
}

#[derive(Debug)]
struct LoadedAsset {
    kind: AssetKind,
    path: String,
    size: Vec2,
}

pub struct HeadlessEngine {
    visuals: BTreeMap<VisualId, VisualObject>,
    next_visual: VisualId,
    assets: Vec<LoadedAsset>,
    manifest: AssetManifest,
    registry: ActionRegistry,
    audio_log: Vec<AudioEvent>,
    plugin_log: Vec<String>,
    stats: EngineStats,
}

impl Default for HeadlessEngine {
    fn default() -> Self {
        Self::new(AssetManifest::default())
    }
}

impl HeadlessEngine {
    pub fn new(manifest: AssetManifest) -> Self {
        Self {
            visuals: BTreeMap::new(),
            next_visual: INVALID_VISUAL + 1,
            assets: Vec::new(),
            manifest,
            registry: ActionRegistry::with_default_actions(),
            audio_log: Vec::new(),
            plugin_log: Vec::new(),
            stats: EngineStats::default(),
        }
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    pub fn action_id(&self, name: &str) -> ActionId {
        self.registry.get_id(name).unwrap_or(ACTION_NOT_FOUND)
    }

    /// Messages the plugin sent through `log`, forwarded to `tracing` as well.
    pub fn log(&mut self, message: &str) {
        info!(target: "plugin", "{message}");
        self.plugin_log.push(message.to_string());
    }

    pub fn plugin_log(&self) -> &[String] {
        &self.plugin_log
    }

    pub fn load_asset(&mut self, kind: AssetKind, path: &str) -> AssetId {
        if self.manifest.missing.contains(path) {
            warn!(path, ?kind, "asset not found");
            return INVALID_ASSET;
        }
        if let Some(existing) = self
            .assets
            .iter()
            .position(|asset| asset.kind == kind && asset.path == path)
        {
            return existing as AssetId;
        }

        let size = match kind {
            AssetKind::Sprite => self.manifest.sprite_size(path),
            AssetKind::Audio => Vec2::ZERO,
        };
        self.assets.push(LoadedAsset {
            kind,
            path: path.to_string(),
            size,
        });
        self.stats.assets_loaded += 1;
        debug!(path, ?kind, "asset loaded");
        (self.assets.len() - 1) as AssetId
    }

    pub fn sprite_size(&self, sprite: AssetId) -> Vec2 {
        match self.assets.get(sprite as usize) {
            Some(asset) if asset.kind == AssetKind::Sprite => asset.size,
            _ => Vec2::ZERO,
        }
    }

    pub fn asset_path(&self, asset: AssetId) -> Option<&str> {
        self.assets.get(asset as usize).map(|a| a.path.as_str())
    }

    pub fn create_visual(&mut self, name: &str) -> VisualId {
        let id = self.next_visual;
        self.next_visual += 1;
        self.visuals.insert(
            id,
            VisualObject {
                name: name.to_string(),
                tag: None,
                position: Vec3::ZERO,
                sprite: None,
                audio: AudioSource::default(),
            },
        );
        self.stats.visuals_created += 1;
        id
    }

    /// Returns whether `visual` existed.
    pub fn destroy_visual(&mut self, visual: VisualId) -> bool {
        match self.visuals.remove(&visual) {
            Some(_) => {
                self.stats.visuals_destroyed += 1;
                true
            }
            None => {
                warn!(visual, "destroy of unknown visual object");
                false
            }
        }
    }

    pub fn visual(&self, visual: VisualId) -> Option<&VisualObject> {
        self.visuals.get(&visual)
    }

    pub fn visual_count(&self) -> usize {
        self.visuals.len()
    }

    pub fn count_named(&self, name: &str) -> usize {
        self.visuals.values().filter(|v| v.name == name).count()
    }

    pub fn set_tag(&mut self, visual: VisualId, tag: &str) {
        if let Some(v) = self.visuals.get_mut(&visual) {
            v.tag = Some(tag.to_string());
        }
    }

    pub fn set_sprite(&mut self, visual: VisualId, sprite: AssetId) {
        if let Some(v) = self.visuals.get_mut(&visual) {
            v.sprite = Some(sprite);
        }
    }

    pub fn position(&self, visual: VisualId) -> Vec3 {
        self.visuals
            .get(&visual)
            .map(|v| v.position)
            .unwrap_or(Vec3::ZERO)
    }

    pub fn set_position(&mut self, visual: VisualId, position: Vec3) {
        if let Some(v) = self.visuals.get_mut(&visual) {
            v.position = position;
        }
    }

    pub fn play_one_shot(&mut self, visual: VisualId, clip: AssetId) {
        if self.visuals.contains_key(&visual) {
            self.audio_log.push(AudioEvent::OneShot { visual, clip });
        }
    }

    pub fn play_looped(&mut self, visual: VisualId, clip: AssetId) {
        if let Some(v) = self.visuals.get_mut(&visual) {
            v.audio = AudioSource {
                clip: Some(clip),
                looping: true,
                playing: true,
            };
            self.audio_log.push(AudioEvent::Looped { visual, clip });
        }
    }

    pub fn stop_audio(&mut self, visual: VisualId) {
        if let Some(v) = self.visuals.get_mut(&visual) {
            v.audio.playing = false;
            self.audio_log.push(AudioEvent::Stopped { visual });
        }
    }

    pub fn audio_events(&self) -> &[AudioEvent] {
        &self.audio_log
    }

    /// Paths of every one-shot clip played so far, in order.
    pub fn one_shot_paths(&self) -> Vec<&str> {
        self.audio_log
            .iter()
            .filter_map(|event| match *event {
                AudioEvent::OneShot { clip, .. } => self.asset_path(clip),
                _ => None,
            })
            .collect()
    }

    pub fn stats(&self) -> EngineStats {
        self.stats
    }
}
