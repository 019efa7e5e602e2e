// crates/rockfall/src/config.rs
//! Gameplay tuning. Every constant the entities use lives here so a session
//! can be reshaped from a TOML file without rebuilding the plugin.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub ship: ShipConfig,
    pub missile: MissileConfig,
    pub rock: RockConfig,
    pub alien: AlienConfig,
    pub explosion: ExplosionConfig,
    pub spawn: SpawnConfig,
    pub assets: AssetPaths,
    /// Frame deltas above this are clamped (breakpoints, window drags).
    pub max_frame_dt: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    /// World units per second. Rocks, missiles and the alien derive their speed from it.
    pub speed: f32,
    pub time_between_shots: f32,
    pub start: Vec3,
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
    pub hitbox_scale: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissileConfig {
    pub speed_factor: f32,
    /// Offset from the ship's position to the muzzle.
    pub muzzle_offset: Vec3,
    pub max_y: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RockConfig {
    pub speed_factor: f32,
    pub spawn_min_x: f32,
    pub spawn_max_x: f32,
    pub spawn_y: f32,
    pub min_y: f32,
    pub frame_count: usize,
    pub frame_interval: f32,
    pub hitbox_scale: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlienConfig {
    pub speed_factor: f32,
    pub start: Vec3,
    pub min_x: f32,
    pub hitbox_scale: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplosionConfig {
    pub frame_count: usize,
    pub frame_interval: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub rock_interval: f32,
    pub alien_check_interval: f32,
    /// Chance that a spawn-gate check produces an alien.
    pub alien_probability: f64,
}

/// Resource paths handed to the host's loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    pub background: String,
    pub missile: String,
    /// Frame `i` is `{rock_frame_prefix}{i:03}`.
    pub rock_frame_prefix: String,
    /// Frame `i` is `{explosion_frame_prefix}{i:02}`.
    pub explosion_frame_prefix: String,
    pub alien: String,
    pub alien_sound: String,
    pub ship_left: String,
    pub ship_right: String,
    pub ship_center: String,
    pub fire_sound: String,
    pub player_explosion_sound: String,
    pub rock_explosion_sound: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            ship: ShipConfig::default(),
            missile: MissileConfig::default(),
            rock: RockConfig::default(),
            alien: AlienConfig::default(),
            explosion: ExplosionConfig::default(),
            spawn: SpawnConfig::default(),
            assets: AssetPaths::default(),
            max_frame_dt: 0.25,
        }
    }
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            speed: 1.5,
            time_between_shots: 0.25,
            start: Vec3::new(0.0, -1.5, 0.0),
            min_x: -1.0,
            max_x: 1.0,
            min_y: -1.5,
            max_y: 0.0,
            hitbox_scale: 0.5,
        }
    }
}

impl Default for MissileConfig {
    fn default() -> Self {
        Self {
            speed_factor: 2.0,
            muzzle_offset: Vec3::new(-0.005, 0.27, 0.0),
            max_y: 2.5,
        }
    }
}

impl Default for RockConfig {
    fn default() -> Self {
        Self {
            speed_factor: 1.0,
            spawn_min_x: -1.25,
            spawn_max_x: 1.25,
            spawn_y: 1.5,
            min_y: -2.2,
            frame_count: 16,
            frame_interval: 0.05,
            hitbox_scale: 0.9,
        }
    }
}

impl Default for AlienConfig {
    fn default() -> Self {
        Self {
            speed_factor: 0.7,
            start: Vec3::new(1.5, 1.6, 0.0),
            min_x: -1.6,
            hitbox_scale: 1.0,
        }
    }
}

impl Default for ExplosionConfig {
    fn default() -> Self {
        Self {
            frame_count: 62,
            frame_interval: 0.01,
        }
    }
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            rock_interval: 1.0,
            alien_check_interval: 3.0,
            alien_probability: 0.5,
        }
    }
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            background: "background600x1024".to_string(),
            missile: "missile".to_string(),
            rock_frame_prefix: "tile".to_string(),
            explosion_frame_prefix: "explo64_b/explo64_b".to_string(),
            alien: "ufo".to_string(),
            alien_sound: "Sounds/saucerBig".to_string(),
            ship_left: "spaceship_high_left".to_string(),
            ship_right: "spaceship_high_right".to_string(),
            ship_center: "spaceship_high_center".to_string(),
            fire_sound: "Sounds/fire".to_string(),
            player_explosion_sound: "Sounds/explosion_player".to_string(),
            rock_explosion_sound: "Sounds/bangLarge".to_string(),
        }
    }
}

impl AssetPaths {
    pub fn rock_frame(&self, index: usize) -> String {
        format!("{}{:03}", self.rock_frame_prefix, index)
    }

    pub fn explosion_frame(&self, index: usize) -> String {
        format!("{}{:02}", self.explosion_frame_prefix, index)
    }
}

impl GameConfig {
    /// Parse and validate. Missing keys fall back to the defaults above.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("ship.speed", self.ship.speed),
            ("missile.speed_factor", self.missile.speed_factor),
            ("rock.speed_factor", self.rock.speed_factor),
            ("rock.frame_interval", self.rock.frame_interval),
            ("alien.speed_factor", self.alien.speed_factor),
            ("explosion.frame_interval", self.explosion.frame_interval),
            ("spawn.rock_interval", self.spawn.rock_interval),
            ("spawn.alien_check_interval", self.spawn.alien_check_interval),
            ("max_frame_dt", self.max_frame_dt),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(format!("{name} must be positive, got {value}")));
            }
        }

        let finite = [
            ("ship.time_between_shots", self.ship.time_between_shots),
            ("ship.min_x", self.ship.min_x),
            ("ship.max_x", self.ship.max_x),
            ("ship.min_y", self.ship.min_y),
            ("ship.max_y", self.ship.max_y),
            ("ship.hitbox_scale", self.ship.hitbox_scale),
            ("missile.max_y", self.missile.max_y),
            ("rock.spawn_min_x", self.rock.spawn_min_x),
            ("rock.spawn_max_x", self.rock.spawn_max_x),
            ("rock.spawn_y", self.rock.spawn_y),
            ("rock.min_y", self.rock.min_y),
            ("rock.hitbox_scale", self.rock.hitbox_scale),
            ("alien.min_x", self.alien.min_x),
            ("alien.hitbox_scale", self.alien.hitbox_scale),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(invalid(format!("{name} must be finite, got {value}")));
            }
        }
        for (name, point) in [
            ("ship.start", self.ship.start),
            ("missile.muzzle_offset", self.missile.muzzle_offset),
            ("alien.start", self.alien.start),
        ] {
            if !point.is_finite() {
                return Err(invalid(format!("{name} must be finite, got {point}")));
            }
        }

        if !(self.ship.time_between_shots >= 0.0) {
            return Err(invalid("ship.time_between_shots must not be negative"));
        }
        if self.ship.min_x > self.ship.max_x || self.ship.min_y > self.ship.max_y {
            return Err(invalid("ship play area has min above max"));
        }
        if self.rock.spawn_min_x > self.rock.spawn_max_x {
            return Err(invalid("rock spawn band has min above max"));
        }
        if self.rock.frame_count == 0 || self.explosion.frame_count == 0 {
            return Err(invalid("animations need at least one frame"));
        }
        if !(0.0..=1.0).contains(&self.spawn.alien_probability) {
            return Err(invalid("spawn.alien_probability must be within [0, 1]"));
        }
        for (name, scale) in [
            ("ship.hitbox_scale", self.ship.hitbox_scale),
            ("rock.hitbox_scale", self.rock.hitbox_scale),
            ("alien.hitbox_scale", self.alien.hitbox_scale),
        ] {
            if !(scale >= 0.0) {
                return Err(invalid(format!("{name} must not be negative")));
            }
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> GameError {
    GameError::InvalidConfig(message.into())
}
