// crates/rockfall/src/entities/missile.rs

use glam::Vec3;

use super::{Entity, EntityBody, Lifecycle};
use crate::error::Result;
use crate::frame::Frame;
use crate::host::Host;

pub struct Missile {
    body: EntityBody,
    speed: f32,
}

impl Missile {
    pub const NAME: &'static str = "Missile";

    /// Fired from the muzzle of a ship standing at `origin`.
    pub fn spawn(frame: &mut Frame<'_>, origin: Vec3, ship_speed: f32) -> Result<Self> {
        let config = frame.config;
        let body = EntityBody::spawn(
            frame.host,
            Self::NAME,
            frame.assets.missile,
            origin + config.missile.muzzle_offset,
        )?;

        Ok(Self {
            body,
            speed: ship_speed * config.missile.speed_factor,
        })
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Straight up. Expired once above the top of the field.
    pub fn update(&mut self, frame: &mut Frame<'_>) -> Lifecycle {
        let mut position = self.body.position();
        position.y += self.speed * frame.dt;
        self.body.set_position(frame.host, position);

        if position.y > frame.config.missile.max_y {
            Lifecycle::Expired
        } else {
            Lifecycle::Alive
        }
    }

    pub fn despawn(self, host: &mut dyn Host) {
        self.body.despawn(host);
    }
}

impl Entity for Missile {
    fn body(&self) -> &EntityBody {
        &self.body
    }
}

#[cfg(test)]
impl Missile {
    pub(crate) fn place(&mut self, host: &mut dyn Host, position: Vec3) {
        self.body.set_position(host, position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;
    use approx::assert_relative_eq;

    #[test]
    fn spawns_at_muzzle_with_doubled_speed() {
        let mut fx = Fixture::new();
        let missile = Missile::spawn(&mut fx.frame(0.0), Vec3::new(0.0, -1.5, 0.0), 1.5).unwrap();

        assert_relative_eq!(missile.position().x, -0.005);
        assert_relative_eq!(missile.position().y, -1.23, epsilon = 1e-6);
        assert_relative_eq!(missile.speed(), 3.0);
        assert_eq!(fx.host.count_named(Missile::NAME), 1);
    }

    #[test]
    fn expires_only_after_crossing_the_top() {
        let mut fx = Fixture::new();
        let mut missile = Missile::spawn(&mut fx.frame(0.0), Vec3::new(0.0, -1.5, 0.0), 1.5).unwrap();

        let mut steps = 0;
        loop {
            let state = missile.update(&mut fx.frame(0.01));
            steps += 1;
            if missile.position().y > 2.5 {
                assert_eq!(state, Lifecycle::Expired);
                break;
            }
            assert_eq!(state, Lifecycle::Alive, "expired early at y={}", missile.position().y);
            assert!(steps < 1_000, "missile never left the field");
        }
    }
}
