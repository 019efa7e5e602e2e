// crates/rockfall/src/state.rs

use engine_shared::InputState;
use tracing::info;

use crate::config::GameConfig;
use crate::controls::Controls;
use crate::error::Result;
use crate::game::Game;
use crate::host::Host;

/// Plugin instance: the configuration it was created with, the resolved
/// action bindings and, once loaded, the running game.
pub struct RockfallPlugin {
    config: GameConfig,
    seed: u64,
    controls: Controls,
    game: Option<Game>,
}

impl RockfallPlugin {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            seed,
            controls: Controls::default(),
            game: None,
        }
    }

    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.game.is_some()
    }

    /// Resolves the action bindings and starts the game. A second load keeps
    /// the running game and only re-resolves the bindings.
    pub fn load(&mut self, host: &mut dyn Host) -> Result<()> {
        host.log("Rockfall plugin begin");
        self.controls = Controls::resolve(host);

        if self.game.is_none() {
            self.game = Some(Game::init(host, self.config.clone(), self.seed)?);
            info!(seed = self.seed, "rockfall loaded");
        }

        host.log("Rockfall plugin end");
        Ok(())
    }

    /// Returns `false` when there is no game to update.
    pub fn update(&mut self, host: &mut dyn Host, input: &InputState, dt: f32) -> bool {
        let Some(game) = self.game.as_mut() else {
            return false;
        };
        let input = self.controls.read(input);
        game.update(host, &input, dt);
        true
    }

    pub fn unload(&mut self, host: &mut dyn Host) {
        if let Some(game) = self.game.take() {
            game.shutdown(host);
            info!("rockfall unloaded");
        }
    }
}
