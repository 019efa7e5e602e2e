// crates/rockfall/src/host/headless.rs

use std::collections::{BTreeMap, HashMap, HashSet};

use engine_shared::{ActionId, AssetId, VisualId, ACTION_NOT_FOUND, MAX_ACTIONS};
use glam::{Vec2, Vec3};

use super::Host;

#[derive(Debug, Clone, PartialEq)]
pub struct VisualRecord {
    pub name: String,
    pub tag: Option<String>,
    pub position: Vec3,
    pub sprite: Option<AssetId>,
    pub looping_clip: Option<AssetId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AssetKind {
    Sprite,
    Audio,
}

/// In-memory host that keeps just enough state to assert against.
///
/// Sprites are square `default_sprite_size` unless a size was registered for
/// their path. Loading an asset marked missing, or creating a visual whose
/// name was marked failing, reports failure like a real engine would.
#[derive(Debug)]
pub struct RecordingHost {
    visuals: BTreeMap<VisualId, VisualRecord>,
    next_visual: VisualId,
    assets: Vec<(AssetKind, String)>,
    sprite_sizes: HashMap<String, Vec2>,
    default_sprite_size: Vec2,
    missing_assets: HashSet<String>,
    failing_visuals: HashSet<String>,
    actions: Vec<String>,
    one_shots: Vec<(VisualId, AssetId)>,
    stopped: Vec<VisualId>,
    destroyed: Vec<VisualId>,
    logs: Vec<String>,
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingHost {
    pub fn new() -> Self {
        Self {
            visuals: BTreeMap::new(),
            next_visual: 1,
            assets: Vec::new(),
            sprite_sizes: HashMap::new(),
            default_sprite_size: Vec2::splat(0.2),
            missing_assets: HashSet::new(),
            failing_visuals: HashSet::new(),
            actions: Vec::new(),
            one_shots: Vec::new(),
            stopped: Vec::new(),
            destroyed: Vec::new(),
            logs: Vec::new(),
        }
    }

    pub fn with_sprite_size(mut self, path: &str, size: Vec2) -> Self {
        self.sprite_sizes.insert(path.to_string(), size);
        self
    }

    pub fn with_missing_asset(mut self, path: &str) -> Self {
        self.missing_assets.insert(path.to_string());
        self
    }

    /// Make every later `create_visual(name)` fail.
    pub fn fail_visuals_named(&mut self, name: &str) {
        self.failing_visuals.insert(name.to_string());
    }

    pub fn visual(&self, id: VisualId) -> Option<&VisualRecord> {
        self.visuals.get(&id)
    }

    pub fn live_visuals(&self) -> usize {
        self.visuals.len()
    }

    pub fn count_named(&self, name: &str) -> usize {
        self.visuals.values().filter(|v| v.name == name).count()
    }

    pub fn was_destroyed(&self, id: VisualId) -> bool {
        self.destroyed.contains(&id)
    }

    pub fn asset_path(&self, id: AssetId) -> Option<&str> {
        self.assets.get(id as usize).map(|(_, path)| path.as_str())
    }

    /// Paths of every one-shot clip played so far, in order.
    pub fn one_shot_paths(&self) -> Vec<&str> {
        self.one_shots
            .iter()
            .filter_map(|&(_, clip)| self.asset_path(clip))
            .collect()
    }

    /// Whether `stop_audio` reached `id` while it was still live.
    pub fn was_stopped(&self, id: VisualId) -> bool {
        self.stopped.contains(&id)
    }

    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    fn load(&mut self, kind: AssetKind, path: &str) -> Option<AssetId> {
        if self.missing_assets.contains(path) {
            return None;
        }
        if let Some(existing) = self
            .assets
            .iter()
            .position(|(k, p)| *k == kind && p == path)
        {
            return Some(existing as AssetId);
        }
        self.assets.push((kind, path.to_string()));
        Some((self.assets.len() - 1) as AssetId)
    }
}

impl Host for RecordingHost {
    fn log(&mut self, message: &str) {
        self.logs.push(message.to_string());
    }

    fn action_id(&mut self, name: &str) -> ActionId {
        if let Some(id) = self.actions.iter().position(|a| a == name) {
            return id as ActionId;
        }
        if self.actions.len() >= MAX_ACTIONS {
            return ACTION_NOT_FOUND;
        }
        self.actions.push(name.to_string());
        (self.actions.len() - 1) as ActionId
    }

    fn load_sprite(&mut self, path: &str) -> Option<AssetId> {
        self.load(AssetKind::Sprite, path)
    }

    fn load_audio(&mut self, path: &str) -> Option<AssetId> {
        self.load(AssetKind::Audio, path)
    }

    fn sprite_size(&mut self, sprite: AssetId) -> Vec2 {
        self.asset_path(sprite)
            .and_then(|path| self.sprite_sizes.get(path).copied())
            .unwrap_or(self.default_sprite_size)
    }

    fn create_visual(&mut self, name: &str) -> Option<VisualId> {
        if self.failing_visuals.contains(name) {
            return None;
        }
        let id = self.next_visual;
        self.next_visual += 1;
        self.visuals.insert(
            id,
            VisualRecord {
                name: name.to_string(),
                tag: None,
                position: Vec3::ZERO,
                sprite: None,
                looping_clip: None,
            },
        );
        Some(id)
    }

    fn destroy_visual(&mut self, visual: VisualId) {
        if self.visuals.remove(&visual).is_some() {
            self.destroyed.push(visual);
        }
    }

    fn set_tag(&mut self, visual: VisualId, tag: &str) {
        if let Some(v) = self.visuals.get_mut(&visual) {
            v.tag = Some(tag.to_string());
        }
    }

    fn set_sprite(&mut self, visual: VisualId, sprite: AssetId) {
        if let Some(v) = self.visuals.get_mut(&visual) {
            v.sprite = Some(sprite);
        }
    }

    fn position(&mut self, visual: VisualId) -> Vec3 {
        self.visuals
            .get(&visual)
            .map(|v| v.position)
            .unwrap_or(Vec3::ZERO)
    }

    fn set_position(&mut self, visual: VisualId, position: Vec3) {
        if let Some(v) = self.visuals.get_mut(&visual) {
            v.position = position;
        }
    }

    fn play_one_shot(&mut self, visual: VisualId, clip: AssetId) {
        self.one_shots.push((visual, clip));
    }

    fn play_looped(&mut self, visual: VisualId, clip: AssetId) {
        if let Some(v) = self.visuals.get_mut(&visual) {
            v.looping_clip = Some(clip);
        }
    }

    fn stop_audio(&mut self, visual: VisualId) {
        if let Some(v) = self.visuals.get_mut(&visual) {
            v.looping_clip = None;
            self.stopped.push(visual);
        }
    }
}
