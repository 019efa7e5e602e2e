// crates/rockfall/src/game.rs
//! The world coordinator: owns the ship, the playfield and the spawn timers,
//! and fixes the order in which everything is updated each frame.

use engine_arena::Handle;
use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use crate::assets::AssetCache;
use crate::clock::{has_elapsed, sanitize_dt, SimClock};
use crate::config::GameConfig;
use crate::controls::ShipInput;
use crate::entities::{EntityBody, Explosion, PlayerShip, Rock};
use crate::error::Result;
use crate::frame::Frame;
use crate::host::Host;
use crate::playfield::Playfield;

const BACKGROUND_NAME: &str = "Background";
/// Behind everything else.
const BACKGROUND_POSITION: Vec3 = Vec3::new(0.0, 0.0, 1.0);

/// What a `Frame` borrows, kept apart from the entities so both can be
/// borrowed at once.
struct Resources {
    config: GameConfig,
    assets: AssetCache,
    rng: ChaCha8Rng,
    clock: SimClock,
}

impl Resources {
    fn frame<'a>(&'a mut self, host: &'a mut dyn Host, dt: f32) -> Frame<'a> {
        Frame {
            host,
            assets: &self.assets,
            config: &self.config,
            rng: &mut self.rng,
            dt,
            now: self.clock.now(),
        }
    }
}

pub struct Game {
    resources: Resources,
    background: EntityBody,
    ship: PlayerShip,
    field: Playfield,
    last_rock_spawn: f64,
    last_alien_check: f64,
}

impl Game {
    /// Loads every asset, then creates the background and the ship. Nothing
    /// is left behind on the host if any step fails.
    pub fn init(host: &mut dyn Host, config: GameConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let assets = AssetCache::load(host, &config)?;
        let background = EntityBody::spawn(host, BACKGROUND_NAME, assets.background, BACKGROUND_POSITION)?;

        let mut resources = Resources {
            config,
            assets,
            rng: ChaCha8Rng::seed_from_u64(seed),
            clock: SimClock::new(),
        };

        let spawned = PlayerShip::spawn(&mut resources.frame(host, 0.0));
        let ship = match spawned {
            Ok(ship) => ship,
            Err(err) => {
                background.despawn(host);
                return Err(err);
            }
        };

        info!(seed, "game initialized");
        Ok(Self {
            resources,
            background,
            ship,
            field: Playfield::new(),
            last_rock_spawn: 0.0,
            last_alien_check: 0.0,
        })
    }

    /// Simulate one frame.
    ///
    /// Order: ship (missiles, collisions, input), rock spawn, rocks,
    /// explosions, alien, alien spawn-gate. A rock spawned this frame is
    /// moved this frame but cannot be hit until the next one.
    pub fn update(&mut self, host: &mut dyn Host, input: &ShipInput, dt: f32) {
        let dt = sanitize_dt(dt, self.resources.config.max_frame_dt);
        self.resources.clock.advance(dt);

        let ship_speed = self.ship.speed();
        let mut frame = self.resources.frame(host, dt);

        self.ship.update(&mut frame, &mut self.field, input);

        if has_elapsed(frame.now, self.last_rock_spawn, frame.config.spawn.rock_interval) {
            self.last_rock_spawn = frame.now;
            if let Err(err) = self.field.spawn_rock(&mut frame, ship_speed) {
                warn!(%err, "rock spawn skipped");
            }
        }

        self.field.update_rocks(&mut frame);
        self.field.update_explosions(&mut frame);
        self.field.update_alien(&mut frame);
        run_alien_gate(&mut frame, &mut self.field, &mut self.last_alien_check, ship_speed);
    }

    /// The spawn-gate on its own, at the current clock time. Returns whether
    /// an alien was spawned.
    pub fn check_to_add_alien(&mut self, host: &mut dyn Host) -> bool {
        let ship_speed = self.ship.speed();
        let mut frame = self.resources.frame(host, 0.0);
        run_alien_gate(&mut frame, &mut self.field, &mut self.last_alien_check, ship_speed)
    }

    pub fn add_explosion(&mut self, host: &mut dyn Host, position: Vec3) -> Result<Handle<Explosion>> {
        let mut frame = self.resources.frame(host, 0.0);
        self.field.add_explosion(&mut frame, position)
    }

    pub fn spawn_rock(&mut self, host: &mut dyn Host) -> Result<Handle<Rock>> {
        let ship_speed = self.ship.speed();
        let mut frame = self.resources.frame(host, 0.0);
        self.field.spawn_rock(&mut frame, ship_speed)
    }

    pub fn remove_rock(&mut self, host: &mut dyn Host, handle: Handle<Rock>) -> bool {
        self.field.remove_rock(host, handle)
    }

    pub fn remove_explosion(&mut self, host: &mut dyn Host, handle: Handle<Explosion>) -> bool {
        self.field.remove_explosion(host, handle)
    }

    /// No-op without a live alien.
    pub fn remove_alien(&mut self, host: &mut dyn Host) -> bool {
        self.field.remove_alien(host)
    }

    pub fn ship(&self) -> &PlayerShip {
        &self.ship
    }

    pub fn field(&self) -> &Playfield {
        &self.field
    }

    pub fn config(&self) -> &GameConfig {
        &self.resources.config
    }

    pub fn assets(&self) -> &AssetCache {
        &self.resources.assets
    }

    pub fn clock(&self) -> &SimClock {
        &self.resources.clock
    }

    pub fn background(&self) -> &EntityBody {
        &self.background
    }

    /// Destroys every visual object the game owns.
    pub fn shutdown(mut self, host: &mut dyn Host) {
        self.field.clear(host);
        self.ship.despawn(host);
        self.background.despawn(host);
        info!(
            frames = self.resources.clock.frame_count(),
            "game shut down"
        );
    }
}

/// Paused while an alien is live; otherwise one coin flip per interval.
fn run_alien_gate(
    frame: &mut Frame<'_>,
    field: &mut Playfield,
    last_check: &mut f64,
    ship_speed: f32,
) -> bool {
    if field.alien().is_some() {
        *last_check = frame.now;
        return false;
    }
    let spawn = &frame.config.spawn;
    if !has_elapsed(frame.now, *last_check, spawn.alien_check_interval) {
        return false;
    }
    *last_check = frame.now;

    if !frame.rng.gen_bool(spawn.alien_probability) {
        debug!("alien gate passed without a spawn");
        return false;
    }
    match field.spawn_alien(frame, ship_speed) {
        Ok(()) => true,
        Err(err) => {
            warn!(%err, "alien spawn skipped");
            false
        }
    }
}

#[cfg(test)]
impl Game {
    pub(crate) fn field_mut(&mut self) -> &mut Playfield {
        &mut self.field
    }

    pub(crate) fn ship_mut(&mut self) -> &mut PlayerShip {
        &mut self.ship
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::KeyState;
    use crate::entities::{Alien, Entity};
    use crate::error::GameError;
    use crate::host::RecordingHost;
    use approx::assert_relative_eq;

    const UP: KeyState = KeyState {
        held: false,
        pressed: false,
        released: false,
    };
    const IDLE: ShipInput = ShipInput {
        left: UP,
        right: UP,
        up: UP,
        down: UP,
        fire: UP,
    };

    fn always_alien() -> GameConfig {
        let mut config = GameConfig::default();
        config.spawn.alien_probability = 1.0;
        config
    }

    fn run(game: &mut Game, host: &mut RecordingHost, frames: usize, dt: f32) {
        for _ in 0..frames {
            game.update(host, &IDLE, dt);
        }
    }

    #[test]
    fn init_places_background_and_ship() {
        let mut host = RecordingHost::new();
        let game = Game::init(&mut host, GameConfig::default(), 1).unwrap();

        assert_eq!(host.count_named(BACKGROUND_NAME), 1);
        assert_eq!(host.count_named(PlayerShip::NAME), 1);
        assert_eq!(game.ship().position(), Vec3::new(0.0, -1.5, 0.0));
        assert!(game.field().rocks().is_empty());
        assert_eq!(game.clock().now(), 0.0);
        assert_eq!(
            host.visual(game.background().visual()).unwrap().position,
            BACKGROUND_POSITION
        );
    }

    #[test]
    fn init_fails_on_missing_asset() {
        let mut host = RecordingHost::new().with_missing_asset("Sounds/fire");
        let err = Game::init(&mut host, GameConfig::default(), 1).err().unwrap();
        assert!(matches!(err, GameError::AssetLoad { .. }));
        assert_eq!(host.live_visuals(), 0);
    }

    #[test]
    fn init_cleans_up_when_the_ship_cannot_be_created() {
        let mut host = RecordingHost::new();
        host.fail_visuals_named(PlayerShip::NAME);
        let err = Game::init(&mut host, GameConfig::default(), 1).err().unwrap();
        assert!(matches!(err, GameError::VisualCreation { .. }));
        assert_eq!(host.live_visuals(), 0);
    }

    #[test]
    fn init_rejects_invalid_config() {
        let mut host = RecordingHost::new();
        let mut config = GameConfig::default();
        config.spawn.rock_interval = 0.0;
        assert!(matches!(
            Game::init(&mut host, config, 1).err().unwrap(),
            GameError::InvalidConfig(_)
        ));
    }

    #[test]
    fn rocks_spawn_once_the_interval_has_passed() {
        let mut host = RecordingHost::new();
        let mut game = Game::init(&mut host, GameConfig::default(), 1).unwrap();

        run(&mut game, &mut host, 4, 0.25);
        assert!(game.field().rocks().is_empty(), "no rock at exactly 1s");

        run(&mut game, &mut host, 1, 0.25);
        assert_eq!(game.field().rocks().len(), 1);

        // Spawned and moved in the same frame.
        let rock = game.field().rocks().values().next().unwrap();
        assert_relative_eq!(rock.position().y, 1.5 - 1.5 * 0.25, epsilon = 1e-6);

        run(&mut game, &mut host, 4, 0.25);
        assert_eq!(game.field().rocks().len(), 1);
        run(&mut game, &mut host, 1, 0.25);
        assert_eq!(game.field().rocks().len(), 2);
    }

    #[test]
    fn rock_spawned_this_frame_escapes_this_frames_missiles() {
        let mut host = RecordingHost::new();
        let mut game = Game::init(&mut host, GameConfig::default(), 1).unwrap();
        run(&mut game, &mut host, 4, 0.25);

        // Learn where the next rock will appear by replaying the rng.
        let mut probe_host = RecordingHost::new();
        let mut probe = Game::init(&mut probe_host, GameConfig::default(), 1).unwrap();
        let next_rock = probe.spawn_rock(&mut probe_host).unwrap();
        let spawn_at = probe.field().rocks().get(next_rock).unwrap().position();

        // A missile parked over the spawn point, moving clear of it this frame.
        let mut frame = game.resources.frame(&mut host, 0.0);
        game.ship.add_missile_at(&mut frame, spawn_at);
        drop(frame);

        run(&mut game, &mut host, 1, 0.25);
        assert_eq!(game.field().rocks().len(), 1);
        assert_eq!(game.ship().missiles().len(), 1);
        assert!(game.field().explosions().is_empty());
    }

    #[test]
    fn spawn_gate_never_doubles_up_aliens() {
        let mut host = RecordingHost::new();
        let mut game = Game::init(&mut host, always_alien(), 1).unwrap();

        run(&mut game, &mut host, 12, 0.25);
        assert!(game.field().alien().is_none(), "no alien at exactly 3s");
        run(&mut game, &mut host, 1, 0.25);
        assert!(game.field().alien().is_some());

        for _ in 0..100 {
            assert!(!game.check_to_add_alien(&mut host));
        }
        run(&mut game, &mut host, 8, 0.25);
        assert_eq!(host.count_named(Alien::NAME), 1);
    }

    #[test]
    fn spawn_clock_is_paused_while_the_alien_lives() {
        let mut host = RecordingHost::new();
        let mut game = Game::init(&mut host, always_alien(), 1).unwrap();
        run(&mut game, &mut host, 13, 0.25);
        assert!(game.field().alien().is_some());

        run(&mut game, &mut host, 4, 0.25);
        assert!(game.remove_alien(&mut host));
        assert!(!game.remove_alien(&mut host));

        // The last check happened while the alien was still live.
        assert!(!game.check_to_add_alien(&mut host));
        run(&mut game, &mut host, 12, 0.25);
        assert!(game.field().alien().is_none());
        run(&mut game, &mut host, 1, 0.25);
        assert!(game.field().alien().is_some());
    }

    #[test]
    fn zero_probability_never_spawns_an_alien() {
        let mut host = RecordingHost::new();
        let mut config = GameConfig::default();
        config.spawn.alien_probability = 0.0;
        let mut game = Game::init(&mut host, config, 1).unwrap();

        run(&mut game, &mut host, 200, 0.25);
        assert!(game.field().alien().is_none());
    }

    #[test]
    fn alien_leaves_and_its_audio_stops() {
        let mut host = RecordingHost::new();
        let mut game = Game::init(&mut host, always_alien(), 1).unwrap();
        run(&mut game, &mut host, 13, 0.25);
        let visual = game.field().alien().unwrap().body().visual();
        assert!(host.visual(visual).unwrap().looping_clip.is_some());

        // 3.1 units at 1.05 per second.
        run(&mut game, &mut host, 12, 0.25);
        assert!(game.field().alien().is_none());
        assert!(host.was_stopped(visual));
        assert!(host.was_destroyed(visual));
    }

    #[test]
    fn dt_is_sanitized_before_it_reaches_the_clock() {
        let mut host = RecordingHost::new();
        let mut game = Game::init(&mut host, GameConfig::default(), 1).unwrap();

        game.update(&mut host, &IDLE, -1.0);
        game.update(&mut host, &IDLE, f32::NAN);
        assert_eq!(game.clock().now(), 0.0);
        assert_eq!(game.clock().frame_count(), 2);

        game.update(&mut host, &IDLE, 10.0);
        assert_eq!(game.clock().now(), 0.25);
    }

    #[test]
    fn same_seed_same_session() {
        let positions = |seed: u64| {
            let mut host = RecordingHost::new();
            let mut game = Game::init(&mut host, GameConfig::default(), seed).unwrap();
            run(&mut game, &mut host, 40, 0.1);
            game.field()
                .rocks()
                .values()
                .map(|rock| (rock.position(), rock.frame_index()))
                .collect::<Vec<_>>()
        };

        let first = positions(9);
        assert!(!first.is_empty());
        assert_eq!(first, positions(9));
        assert_ne!(first, positions(10));
    }

    #[test]
    fn add_and_remove_through_the_coordinator() {
        let mut host = RecordingHost::new();
        let mut game = Game::init(&mut host, GameConfig::default(), 1).unwrap();

        let rock = game.spawn_rock(&mut host).unwrap();
        let explosion = game.add_explosion(&mut host, Vec3::new(0.1, 0.2, 0.0)).unwrap();
        assert!(game.remove_rock(&mut host, rock));
        assert!(game.remove_explosion(&mut host, explosion));
        assert!(game.field().rocks().is_empty());
        assert!(game.field().explosions().is_empty());
    }

    #[test]
    fn ship_crash_takes_out_the_rock() {
        let mut host = RecordingHost::new();
        let mut game = Game::init(&mut host, GameConfig::default(), 1).unwrap();
        let rock = game.spawn_rock(&mut host).unwrap();
        let ship_at = game.ship().position();
        game.field_mut().rock_mut(rock).unwrap().place(&mut host, ship_at);

        game.update(&mut host, &IDLE, 0.016);
        assert!(game.field().rocks().is_empty());
        assert_eq!(game.field().explosions().len(), 1);
        assert_eq!(host.one_shot_paths(), vec!["Sounds/explosion_player"]);
    }

    #[test]
    fn shutdown_releases_every_visual() {
        let mut host = RecordingHost::new();
        let mut game = Game::init(&mut host, always_alien(), 1).unwrap();
        let fire = ShipInput {
            fire: KeyState { held: true, ..UP },
            ..IDLE
        };
        for _ in 0..20 {
            game.update(&mut host, &fire, 0.2);
        }
        game.ship_mut().place(&mut host, Vec3::new(0.5, -1.0, 0.0));
        assert!(host.live_visuals() > 2);

        game.shutdown(&mut host);
        assert_eq!(host.live_visuals(), 0);
    }
}
