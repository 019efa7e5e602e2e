// crates/rockfall/src/entities/rock.rs

use glam::Vec3;
use rand::Rng;

use super::{Entity, EntityBody, Lifecycle};
use crate::clock::has_elapsed;
use crate::error::Result;
use crate::frame::Frame;
use crate::geometry::Bounds;
use crate::host::Host;

/// Tumbles down the field, cycling through its frame sequence.
pub struct Rock {
    body: EntityBody,
    speed: f32,
    frame_index: usize,
    last_frame_switch: f64,
    hitbox_scale: f32,
}

impl Rock {
    pub const NAME: &'static str = "Rock";

    /// Random column in the spawn band, random starting frame. `ship_speed`
    /// is captured now and never re-read.
    pub fn spawn(frame: &mut Frame<'_>, ship_speed: f32) -> Result<Self> {
        let config = &frame.config.rock;
        let frames = &frame.assets.rock_frames;

        let x = frame.rng.gen_range(config.spawn_min_x..=config.spawn_max_x);
        let frame_index = frame.rng.gen_range(0..frames.len());
        let body = EntityBody::spawn(
            frame.host,
            Self::NAME,
            frames[frame_index],
            Vec3::new(x, config.spawn_y, 0.0),
        )?;

        Ok(Self {
            body,
            speed: ship_speed * config.speed_factor,
            frame_index,
            last_frame_switch: frame.now,
            hitbox_scale: config.hitbox_scale,
        })
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    /// Collision box, smaller than the sprite.
    pub fn hitbox(&self) -> Bounds {
        self.bounds().scale_around_center(self.hitbox_scale)
    }

    pub fn update(&mut self, frame: &mut Frame<'_>) -> Lifecycle {
        let config = &frame.config.rock;

        if has_elapsed(frame.now, self.last_frame_switch, config.frame_interval) {
            let frames = &frame.assets.rock_frames;
            self.frame_index = (self.frame_index + 1) % frames.len();
            self.body.set_sprite(frame.host, frames[self.frame_index]);
            self.last_frame_switch = frame.now;
        }

        let mut position = self.body.position();
        position.y -= self.speed * frame.dt;
        self.body.set_position(frame.host, position);

        if position.y < config.min_y {
            Lifecycle::Expired
        } else {
            Lifecycle::Alive
        }
    }

    pub fn despawn(self, host: &mut dyn Host) {
        self.body.despawn(host);
    }
}

impl Entity for Rock {
    fn body(&self) -> &EntityBody {
        &self.body
    }
}

#[cfg(test)]
impl Rock {
    pub(crate) fn place(&mut self, host: &mut dyn Host, position: Vec3) {
        self.body.set_position(host, position);
    }

    pub(crate) fn set_frame_index(&mut self, index: usize) {
        self.frame_index = index;
    }
}
