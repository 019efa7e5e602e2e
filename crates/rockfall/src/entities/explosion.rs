// crates/rockfall/src/entities/explosion.rs

use glam::Vec3;

use super::{Entity, EntityBody, Lifecycle};
use crate::clock::has_elapsed;
use crate::error::Result;
use crate::frame::Frame;
use crate::host::Host;

/// Plays its frame sequence once, then expires.
pub struct Explosion {
    body: EntityBody,
    frame_index: usize,
    last_frame_switch: f64,
}

impl Explosion {
    pub const NAME: &'static str = "Explosion";

    pub fn spawn(frame: &mut Frame<'_>, position: Vec3) -> Result<Self> {
        let body = EntityBody::spawn(
            frame.host,
            Self::NAME,
            frame.assets.explosion_frames[0],
            position,
        )?;

        Ok(Self {
            body,
            frame_index: 0,
            last_frame_switch: frame.now,
        })
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    /// Stepping past the last frame reports `Expired` without touching the
    /// sprite; the owner must drop the explosion then.
    pub fn update(&mut self, frame: &mut Frame<'_>) -> Lifecycle {
        if !has_elapsed(
            frame.now,
            self.last_frame_switch,
            frame.config.explosion.frame_interval,
        ) {
            return Lifecycle::Alive;
        }

        let frames = &frame.assets.explosion_frames;
        let next = self.frame_index + 1;
        if next >= frames.len() {
            return Lifecycle::Expired;
        }

        self.frame_index = next;
        self.body.set_sprite(frame.host, frames[next]);
        self.last_frame_switch = frame.now;
        Lifecycle::Alive
    }

    pub fn despawn(self, host: &mut dyn Host) {
        self.body.despawn(host);
    }
}

impl Entity for Explosion {
    fn body(&self) -> &EntityBody {
        &self.body
    }
}
