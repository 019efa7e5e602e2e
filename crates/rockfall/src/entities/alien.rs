// crates/rockfall/src/entities/alien.rs

use super::{Entity, EntityBody, Lifecycle};
use crate::error::Result;
use crate::frame::Frame;
use crate::geometry::Bounds;
use crate::host::Host;

/// Saucer crossing the top of the field right to left with its siren looping.
pub struct Alien {
    body: EntityBody,
    speed: f32,
    hitbox_scale: f32,
}

impl Alien {
    pub const NAME: &'static str = "Alien";

    pub fn spawn(frame: &mut Frame<'_>, ship_speed: f32) -> Result<Self> {
        let config = &frame.config.alien;
        let body = EntityBody::spawn(frame.host, Self::NAME, frame.assets.alien, config.start)?;
        frame.host.play_looped(body.visual(), frame.assets.alien_sound.0);

        Ok(Self {
            body,
            speed: ship_speed * config.speed_factor,
            hitbox_scale: config.hitbox_scale,
        })
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn hitbox(&self) -> Bounds {
        self.bounds().scale_around_center(self.hitbox_scale)
    }

    pub fn update(&mut self, frame: &mut Frame<'_>) -> Lifecycle {
        let mut position = self.body.position();
        position.x -= self.speed * frame.dt;
        self.body.set_position(frame.host, position);

        if position.x < frame.config.alien.min_x {
            Lifecycle::Expired
        } else {
            Lifecycle::Alive
        }
    }

    /// Silences the loop before the visual goes away.
    pub fn despawn(self, host: &mut dyn Host) {
        host.stop_audio(self.body.visual());
        self.body.despawn(host);
    }
}

impl Entity for Alien {
    fn body(&self) -> &EntityBody {
        &self.body
    }
}

#[cfg(test)]
impl Alien {
    pub(crate) fn place(&mut self, host: &mut dyn Host, position: glam::Vec3) {
        self.body.set_position(host, position);
    }
}
