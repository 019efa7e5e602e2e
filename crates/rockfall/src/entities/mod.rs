// crates/rockfall/src/entities/mod.rs
//! The things that live on the playfield.

pub mod alien;
pub mod explosion;
pub mod missile;
pub mod player_ship;
pub mod rock;

pub use alien::Alien;
pub use explosion::Explosion;
pub use missile::Missile;
pub use player_ship::PlayerShip;
pub use rock::Rock;

use engine_shared::VisualId;
use glam::Vec3;

use crate::assets::Sprite;
use crate::error::{GameError, Result};
use crate::geometry::Bounds;
use crate::host::Host;

/// Returned by `update`: the owner removes and destroys an `Expired` entity
/// before anything else can see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Alive,
    Expired,
}

/// Identity, host visual object, position and current sprite.
///
/// Owns its visual object exclusively; `despawn` is the only way to release it.
#[derive(Debug)]
pub struct EntityBody {
    name: &'static str,
    visual: VisualId,
    position: Vec3,
    sprite: Sprite,
}

impl EntityBody {
    /// Create the host visual object, tag it with `name` and place it.
    pub fn spawn(
        host: &mut dyn Host,
        name: &'static str,
        sprite: Sprite,
        position: Vec3,
    ) -> Result<Self> {
        let visual = host.create_visual(name).ok_or_else(|| GameError::VisualCreation {
            name: name.to_string(),
        })?;
        host.set_tag(visual, name);
        host.set_sprite(visual, sprite.id);
        host.set_position(visual, position);

        Ok(Self {
            name,
            visual,
            position,
            sprite,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn visual(&self) -> VisualId {
        self.visual
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, host: &mut dyn Host, position: Vec3) {
        self.position = position;
        host.set_position(self.visual, position);
    }

    pub fn sprite(&self) -> Sprite {
        self.sprite
    }

    pub fn set_sprite(&mut self, host: &mut dyn Host, sprite: Sprite) {
        if self.sprite != sprite {
            self.sprite = sprite;
            host.set_sprite(self.visual, sprite.id);
        }
    }

    /// Current sprite's natural size, centered on the position.
    pub fn bounds(&self) -> Bounds {
        Bounds::from_center_size(self.position.truncate(), self.sprite.size)
    }

    pub fn despawn(self, host: &mut dyn Host) {
        host.destroy_visual(self.visual);
    }
}

/// Shared read access for anything with a body.
pub trait Entity {
    fn body(&self) -> &EntityBody;

    fn name(&self) -> &'static str {
        self.body().name()
    }

    fn position(&self) -> Vec3 {
        self.body().position()
    }

    fn bounds(&self) -> Bounds {
        self.body().bounds()
    }
}
