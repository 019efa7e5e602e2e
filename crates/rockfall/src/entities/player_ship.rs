// crates/rockfall/src/entities/player_ship.rs

use engine_arena::{Handle, Pool};
use glam::Vec3;
use tracing::{debug, warn};

use super::{Entity, EntityBody, Lifecycle, Missile};
use crate::clock::has_elapsed;
use crate::controls::ShipInput;
use crate::error::Result;
use crate::frame::Frame;
use crate::geometry::Bounds;
use crate::host::Host;
use crate::playfield::Playfield;

/// The player's ship. Owns every missile it has fired that is still in flight.
pub struct PlayerShip {
    body: EntityBody,
    speed: f32,
    time_between_shots: f32,
    last_shot_time: Option<f64>,
    missiles: Pool<Missile>,
    hitbox_scale: f32,
}

impl PlayerShip {
    pub const NAME: &'static str = "PlayerShip";

    pub fn spawn(frame: &mut Frame<'_>) -> Result<Self> {
        let config = &frame.config.ship;
        let body = EntityBody::spawn(frame.host, Self::NAME, frame.assets.ship.center, config.start)?;

        Ok(Self {
            body,
            speed: config.speed,
            time_between_shots: config.time_between_shots,
            last_shot_time: None,
            missiles: Pool::new(),
            hitbox_scale: config.hitbox_scale,
        })
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn missiles(&self) -> &Pool<Missile> {
        &self.missiles
    }

    pub fn hitbox(&self) -> Bounds {
        self.bounds().scale_around_center(self.hitbox_scale)
    }

    /// Fires unless the last shot was `time_between_shots` ago or less.
    /// Returns whether a missile left the ship.
    pub fn fire_missile(&mut self, frame: &mut Frame<'_>) -> bool {
        if let Some(last) = self.last_shot_time {
            if !has_elapsed(frame.now, last, self.time_between_shots) {
                return false;
            }
        }

        let missile = match Missile::spawn(frame, self.body.position(), self.speed) {
            Ok(missile) => missile,
            Err(err) => {
                warn!(%err, "missile skipped");
                return false;
            }
        };

        self.last_shot_time = Some(frame.now);
        self.missiles.insert(missile);
        frame.host.play_one_shot(self.body.visual(), frame.assets.ship.fire.0);
        true
    }

    pub fn remove_missile(&mut self, host: &mut dyn Host, handle: Handle<Missile>) -> bool {
        match self.missiles.remove(handle) {
            Some(missile) => {
                missile.despawn(host);
                true
            }
            None => {
                debug_assert!(false, "stale missile handle {handle:?}");
                false
            }
        }
    }

    /// Newest missile first. A missile that hits something is spent for the
    /// frame and does not move; the rest advance.
    pub fn update_missiles(&mut self, frame: &mut Frame<'_>, field: &mut Playfield) {
        for handle in self.missiles.handles().into_iter().rev() {
            let Some(missile) = self.missiles.get(handle) else {
                continue;
            };
            let hitbox = missile.bounds();

            let hit = if let Some(rock) = field.rock_hit_by(&hitbox) {
                field.explode_rock(frame, rock)
            } else if field.alien_hit_by(&hitbox) {
                debug!("alien shot down");
                field.explode_alien(frame)
            } else {
                false
            };

            if hit {
                self.remove_missile(frame.host, handle);
                frame.host.play_one_shot(self.body.visual(), frame.assets.ship.rock_explosion.0);
                continue;
            }

            let expired = self
                .missiles
                .get_mut(handle)
                .is_some_and(|missile| missile.update(frame) == Lifecycle::Expired);
            if expired {
                self.remove_missile(frame.host, handle);
            }
        }
    }

    /// At most one rock per frame. Returns whether the ship was hit.
    pub fn check_rock_collision(&mut self, frame: &mut Frame<'_>, field: &mut Playfield) -> bool {
        let Some(rock) = field.rock_hit_by(&self.hitbox()) else {
            return false;
        };

        debug!(position = ?self.body.position(), "ship hit by rock");
        field.explode_rock(frame, rock);
        frame.host.play_one_shot(self.body.visual(), frame.assets.ship.player_explosion.0);
        true
    }

    pub fn update(&mut self, frame: &mut Frame<'_>, field: &mut Playfield, input: &ShipInput) {
        self.update_missiles(frame, field);
        self.check_rock_collision(frame, field);

        if input.fire.held {
            self.fire_missile(frame);
        }

        let sprites = &frame.assets.ship;
        if (input.left.released || input.right.released) && !(input.left.held || input.right.held) {
            self.body.set_sprite(frame.host, sprites.center);
        }
        if input.left.pressed {
            self.body.set_sprite(frame.host, sprites.left);
        }
        if input.right.pressed {
            self.body.set_sprite(frame.host, sprites.right);
        }

        let mut direction = Vec3::ZERO;
        if input.left.held {
            direction.x -= 1.0;
        }
        if input.right.held {
            direction.x += 1.0;
        }
        if input.up.held {
            direction.y += 1.0;
        }
        if input.down.held {
            direction.y -= 1.0;
        }

        if direction != Vec3::ZERO {
            let area = &frame.config.ship;
            let mut position = self.body.position() + direction * self.speed * frame.dt;
            position.x = position.x.clamp(area.min_x, area.max_x);
            position.y = position.y.clamp(area.min_y, area.max_y);
            self.body.set_position(frame.host, position);
        }
    }

    /// Destroys the ship and every missile still in flight.
    pub fn despawn(mut self, host: &mut dyn Host) {
        for missile in self.missiles.drain() {
            missile.despawn(host);
        }
        self.body.despawn(host);
    }
}

impl Entity for PlayerShip {
    fn body(&self) -> &EntityBody {
        &self.body
    }
}

#[cfg(test)]
impl PlayerShip {
    pub(crate) fn place(&mut self, host: &mut dyn Host, position: Vec3) {
        self.body.set_position(host, position);
    }

    /// A missile in flight at exactly `position`, bypassing the fire rate.
    pub(crate) fn add_missile_at(&mut self, frame: &mut Frame<'_>, position: Vec3) -> Handle<Missile> {
        let mut missile = Missile::spawn(frame, position, self.speed).expect("missile spawn");
        missile.place(frame.host, position);
        self.missiles.insert(missile)
    }
}
