// crates/rockfall/src/lib.rs
//! Rockfall: a small arcade shooter packaged as an engine plugin.
//!
//! The ship at the bottom of the field shoots down falling rocks and the
//! occasional alien saucer. The engine drives the game through the
//! `PluginApi` table returned by [`_create_game`]; everything it needs from
//! the engine goes through the [`host::Host`] trait.

pub mod assets;
pub mod clock;
pub mod config;
pub mod controls;
pub mod entities;
pub mod error;
pub mod frame;
pub mod game;
pub mod geometry;
pub mod host;
pub mod playfield;
mod shims;
pub mod state;

#[cfg(test)]
mod testing;

use std::ffi::c_void;

use engine_shared::{PluginApi, ENGINE_API_VERSION};
use tracing::warn;

pub use config::GameConfig;
pub use error::{GameError, Result};
pub use game::Game;
pub use state::RockfallPlugin;

/// Seed used when nothing else is configured.
pub const DEFAULT_SEED: u64 = 1;

/// Optional TOML file read by `_create_game`.
pub const CONFIG_ENV: &str = "ROCKFALL_CONFIG";
/// Optional RNG seed read by `_create_game`.
pub const SEED_ENV: &str = "ROCKFALL_SEED";

/// Box a fresh plugin and wire up its entry points. The caller owns the
/// state and must release it with `drop_state`.
pub fn create_plugin_api(config: GameConfig, seed: u64) -> PluginApi {
    let state = Box::new(shims::PluginState::new(RockfallPlugin::new(config, seed)));

    PluginApi {
        state: Box::into_raw(state) as *mut c_void,
        on_load: shims::on_load,
        on_update: shims::on_update,
        on_unload: shims::on_unload,
        drop_state: shims::drop_state,
        get_layout_hash: shims::get_layout_hash,
        get_api_version: shims::get_api_version,
    }
}

/// Configuration and seed from the environment, falling back to defaults.
pub fn settings_from_env() -> (GameConfig, u64) {
    let config = match std::env::var(CONFIG_ENV) {
        Ok(path) => GameConfig::load_from_file(&path).unwrap_or_else(|err| {
            warn!(%path, %err, "ignoring game config");
            GameConfig::default()
        }),
        Err(_) => GameConfig::default(),
    };

    let seed = match std::env::var(SEED_ENV) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(%raw, "ignoring non-numeric seed");
            DEFAULT_SEED
        }),
        Err(_) => DEFAULT_SEED,
    };

    (config, seed)
}

//
// FFI exports
//

#[no_mangle]
pub extern "C" fn _create_game() -> PluginApi {
    let (config, seed) = settings_from_env();
    create_plugin_api(config, seed)
}

#[no_mangle]
pub extern "C" fn get_api_version() -> u32 {
    ENGINE_API_VERSION
}
