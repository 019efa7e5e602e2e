// crates/rockfall/src/playfield.rs
//! The coordinator-owned collections: rocks, explosions and the single alien
//! slot. The ship reaches in here to resolve its collisions.

use engine_arena::{Handle, Pool};
use glam::Vec3;
use tracing::{debug, warn};

use crate::entities::{Alien, Entity, Explosion, Lifecycle, Rock};
use crate::error::Result;
use crate::frame::Frame;
use crate::geometry::Bounds;
use crate::host::Host;

#[derive(Default)]
pub struct Playfield {
    rocks: Pool<Rock>,
    explosions: Pool<Explosion>,
    alien: Option<Alien>,
}

impl Playfield {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rocks(&self) -> &Pool<Rock> {
        &self.rocks
    }

    pub fn explosions(&self) -> &Pool<Explosion> {
        &self.explosions
    }

    pub fn alien(&self) -> Option<&Alien> {
        self.alien.as_ref()
    }

    pub fn spawn_rock(&mut self, frame: &mut Frame<'_>, ship_speed: f32) -> Result<Handle<Rock>> {
        let rock = Rock::spawn(frame, ship_speed)?;
        Ok(self.rocks.insert(rock))
    }

    pub fn add_explosion(&mut self, frame: &mut Frame<'_>, position: Vec3) -> Result<Handle<Explosion>> {
        let explosion = Explosion::spawn(frame, position)?;
        Ok(self.explosions.insert(explosion))
    }

    pub fn remove_rock(&mut self, host: &mut dyn Host, handle: Handle<Rock>) -> bool {
        match self.rocks.remove(handle) {
            Some(rock) => {
                rock.despawn(host);
                true
            }
            None => {
                debug_assert!(false, "stale rock handle {handle:?}");
                false
            }
        }
    }

    pub fn remove_explosion(&mut self, host: &mut dyn Host, handle: Handle<Explosion>) -> bool {
        match self.explosions.remove(handle) {
            Some(explosion) => {
                explosion.despawn(host);
                true
            }
            None => {
                debug_assert!(false, "stale explosion handle {handle:?}");
                false
            }
        }
    }

    /// Fills the alien slot. A leftover alien is destroyed first.
    pub fn spawn_alien(&mut self, frame: &mut Frame<'_>, ship_speed: f32) -> Result<()> {
        if let Some(stale) = self.alien.take() {
            warn!("alien slot was still occupied, replacing it");
            stale.despawn(frame.host);
        }
        self.alien = Some(Alien::spawn(frame, ship_speed)?);
        debug!("alien spawned");
        Ok(())
    }

    /// Safe to call with the slot empty. Returns whether an alien was removed.
    pub fn remove_alien(&mut self, host: &mut dyn Host) -> bool {
        match self.alien.take() {
            Some(alien) => {
                alien.despawn(host);
                true
            }
            None => false,
        }
    }

    /// Newest rock whose hit-box overlaps `hitbox`.
    pub fn rock_hit_by(&self, hitbox: &Bounds) -> Option<Handle<Rock>> {
        self.rocks
            .handles()
            .into_iter()
            .rev()
            .find(|&handle| {
                self.rocks
                    .get(handle)
                    .is_some_and(|rock| rock.hitbox().intersects(hitbox))
            })
    }

    pub fn alien_hit_by(&self, hitbox: &Bounds) -> bool {
        self.alien
            .as_ref()
            .is_some_and(|alien| alien.hitbox().intersects(hitbox))
    }

    /// Leaves an explosion where the rock was, then removes it.
    pub fn explode_rock(&mut self, frame: &mut Frame<'_>, handle: Handle<Rock>) -> bool {
        let Some(position) = self.rocks.get(handle).map(|rock| rock.position()) else {
            return false;
        };
        self.explode_at(frame, position);
        self.remove_rock(frame.host, handle)
    }

    pub fn explode_alien(&mut self, frame: &mut Frame<'_>) -> bool {
        let Some(position) = self.alien.as_ref().map(|alien| alien.position()) else {
            return false;
        };
        self.explode_at(frame, position);
        self.remove_alien(frame.host)
    }

    pub fn update_rocks(&mut self, frame: &mut Frame<'_>) {
        for handle in self.rocks.handles().into_iter().rev() {
            let Some(rock) = self.rocks.get_mut(handle) else {
                continue;
            };
            if rock.update(frame) == Lifecycle::Expired {
                self.remove_rock(frame.host, handle);
            }
        }
    }

    pub fn update_explosions(&mut self, frame: &mut Frame<'_>) {
        for handle in self.explosions.handles().into_iter().rev() {
            let Some(explosion) = self.explosions.get_mut(handle) else {
                continue;
            };
            if explosion.update(frame) == Lifecycle::Expired {
                self.remove_explosion(frame.host, handle);
            }
        }
    }

    pub fn update_alien(&mut self, frame: &mut Frame<'_>) {
        let expired = self
            .alien
            .as_mut()
            .is_some_and(|alien| alien.update(frame) == Lifecycle::Expired);
        if expired {
            debug!("alien left the field");
            self.remove_alien(frame.host);
        }
    }

    /// Destroys every owned entity.
    pub fn clear(&mut self, host: &mut dyn Host) {
        for rock in self.rocks.drain() {
            rock.despawn(host);
        }
        for explosion in self.explosions.drain() {
            explosion.despawn(host);
        }
        self.remove_alien(host);
    }

    fn explode_at(&mut self, frame: &mut Frame<'_>, position: Vec3) {
        if let Err(err) = self.add_explosion(frame, position) {
            warn!(%err, "explosion skipped");
        }
    }
}

#[cfg(test)]
impl Playfield {
    pub(crate) fn rock_mut(&mut self, handle: Handle<Rock>) -> Option<&mut Rock> {
        self.rocks.get_mut(handle)
    }

    pub(crate) fn alien_mut(&mut self) -> Option<&mut Alien> {
        self.alien.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;

    #[test]
    fn expired_rocks_are_removed_during_the_pass() {
        let mut fx = Fixture::new();
        let mut field = Playfield::new();
        let low = field.spawn_rock(&mut fx.frame(0.0), 1.5).unwrap();
        let high = field.spawn_rock(&mut fx.frame(0.0), 1.5).unwrap();
        field.rock_mut(low).unwrap().place(&mut fx.host, Vec3::new(0.0, -2.1, 0.0));

        field.update_rocks(&mut fx.frame(0.1));

        assert!(!field.rocks().contains(low));
        assert!(field.rocks().contains(high));
        assert_eq!(fx.host.count_named(Rock::NAME), 1);
    }

    #[test]
    fn finished_explosion_is_removed_once() {
        let mut fx = Fixture::new();
        let mut field = Playfield::new();
        let handle = field.add_explosion(&mut fx.frame(0.0), Vec3::ZERO).unwrap();

        for _ in 0..61 {
            field.update_explosions(&mut fx.frame(0.02));
        }
        assert!(field.explosions().contains(handle));
        assert_eq!(field.explosions().get(handle).unwrap().frame_index(), 61);

        field.update_explosions(&mut fx.frame(0.02));
        assert!(field.explosions().is_empty());
        assert_eq!(fx.host.count_named(Explosion::NAME), 0);

        field.update_explosions(&mut fx.frame(0.02));
        assert!(field.explosions().is_empty());
    }

    #[test]
    fn remove_alien_is_idempotent() {
        let mut fx = Fixture::new();
        let mut field = Playfield::new();
        field.spawn_alien(&mut fx.frame(0.0), 1.5).unwrap();

        assert!(field.remove_alien(&mut fx.host));
        assert!(!field.remove_alien(&mut fx.host));
        assert!(field.alien().is_none());
        assert_eq!(fx.host.count_named(Alien::NAME), 0);
    }

    #[test]
    fn alien_leaving_the_field_frees_the_slot() {
        let mut fx = Fixture::new();
        let mut field = Playfield::new();
        field.spawn_alien(&mut fx.frame(0.0), 1.5).unwrap();
        field.alien_mut().unwrap().place(&mut fx.host, Vec3::new(-1.55, 1.6, 0.0));

        field.update_alien(&mut fx.frame(0.1));
        assert!(field.alien().is_none());
    }

    #[test]
    fn explode_rock_leaves_an_explosion_at_its_position() {
        let mut fx = Fixture::new();
        let mut field = Playfield::new();
        let handle = field.spawn_rock(&mut fx.frame(0.0), 1.5).unwrap();
        let position = field.rocks().get(handle).unwrap().position();

        assert!(field.explode_rock(&mut fx.frame(0.0), handle));
        assert!(field.rocks().is_empty());
        let (_, explosion) = field.explosions().iter().next().unwrap();
        assert_eq!(explosion.position(), position);
    }

    #[test]
    fn rock_hit_prefers_the_newest_rock() {
        let mut fx = Fixture::new();
        let mut field = Playfield::new();
        let older = field.spawn_rock(&mut fx.frame(0.0), 1.5).unwrap();
        let newer = field.spawn_rock(&mut fx.frame(0.0), 1.5).unwrap();
        field.rock_mut(older).unwrap().place(&mut fx.host, Vec3::ZERO);
        field.rock_mut(newer).unwrap().place(&mut fx.host, Vec3::new(0.05, 0.0, 0.0));

        let probe = Bounds::from_center_size(glam::Vec2::ZERO, glam::Vec2::splat(0.1));
        assert_eq!(field.rock_hit_by(&probe), Some(newer));

        let miss = Bounds::from_center_size(glam::Vec2::new(1.0, 1.0), glam::Vec2::splat(0.1));
        assert_eq!(field.rock_hit_by(&miss), None);
    }

    #[test]
    fn failed_explosion_spawn_still_removes_the_rock() {
        let mut fx = Fixture::new();
        let mut field = Playfield::new();
        let handle = field.spawn_rock(&mut fx.frame(0.0), 1.5).unwrap();
        fx.host.fail_visuals_named(Explosion::NAME);

        assert!(field.explode_rock(&mut fx.frame(0.0), handle));
        assert!(field.rocks().is_empty());
        assert!(field.explosions().is_empty());
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "stale rock handle"))]
    fn removing_a_stale_rock_handle_is_rejected() {
        let mut fx = Fixture::new();
        let mut field = Playfield::new();
        let handle = field.spawn_rock(&mut fx.frame(0.0), 1.5).unwrap();

        assert!(field.remove_rock(&mut fx.host, handle));
        assert!(!field.remove_rock(&mut fx.host, handle));
    }

    #[test]
    fn clear_destroys_everything() {
        let mut fx = Fixture::new();
        let mut field = Playfield::new();
        field.spawn_rock(&mut fx.frame(0.0), 1.5).unwrap();
        field.add_explosion(&mut fx.frame(0.0), Vec3::ZERO).unwrap();
        field.spawn_alien(&mut fx.frame(0.0), 1.5).unwrap();

        field.clear(&mut fx.host);
        assert_eq!(fx.host.live_visuals(), 0);
        assert!(field.rocks().is_empty() && field.explosions().is_empty() && field.alien().is_none());
    }
}
