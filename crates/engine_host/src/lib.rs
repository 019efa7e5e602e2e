// crates/engine_host/src/lib.rs
//! Headless host for game plugins: visual objects, assets, audio and input
//! behind the `HostInterface` table, driven by a fixed-timestep loop.

pub mod app;
pub mod engine;
pub mod engine_loop;
pub mod error;
pub mod host;
pub mod input;
pub mod plugin_manager;

pub use app::App;
pub use engine::{AssetManifest, HeadlessEngine};
pub use error::{HostError, Result};
pub use plugin_manager::{PluginHandle, PluginRuntimeState};
