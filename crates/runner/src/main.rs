//! Headless Rockfall session: loads the plugin (statically linked, or a built
//! cdylib with `--plugin`), plays a scripted run and logs what happened.
//!
//! Usage:
//!   cargo run -p runner -- --frames 3600 --seed 7
//!   cargo run -p runner -- --plugin target/debug/librockfall.so

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use engine_host::engine::AudioEvent;
use engine_host::{App, AssetManifest, HeadlessEngine, PluginHandle, PluginRuntimeState};
use engine_shared::input_types::action_names;
use rockfall::GameConfig;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "rockfall-runner")]
#[command(about = "Play a scripted Rockfall session on the headless host")]
struct Args {
    /// Display frames to run
    #[arg(long, default_value_t = 3_600)]
    frames: u32,

    /// Seconds per display frame
    #[arg(long, default_value_t = 1.0 / 60.0)]
    frame_dt: f32,

    /// RNG seed for rock columns and alien appearances
    #[arg(long, default_value_t = rockfall::DEFAULT_SEED)]
    seed: u64,

    /// Gameplay tuning TOML file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Load this plugin library instead of the linked-in game
    #[arg(long)]
    plugin: Option<PathBuf>,

    /// Frames between direction changes of the scripted sweep
    #[arg(long, default_value_t = 120)]
    sweep: u32,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn load_plugin(args: &Args) -> Result<PluginHandle, Box<dyn std::error::Error>> {
    match &args.plugin {
        Some(path) => {
            // The library reads its settings in `_create_game`.
            if let Some(config) = &args.config {
                std::env::set_var(rockfall::CONFIG_ENV, config);
            }
            std::env::set_var(rockfall::SEED_ENV, args.seed.to_string());
            Ok(unsafe { PluginHandle::load(path)? })
        }
        None => {
            let config = match &args.config {
                Some(path) => GameConfig::load_from_file(path)?,
                None => GameConfig::default(),
            };
            Ok(PluginHandle::from_api(rockfall::create_plugin_api(config, args.seed))?)
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(HeadlessEngine::new(AssetManifest::default()), load_plugin(args)?);
    app.start()?;

    let sweep = args.sweep.max(1);
    app.press(action_names::FIRE);
    for frame in 0..args.frames {
        // Hold fire and sweep left and right.
        if frame % (2 * sweep) == 0 {
            app.release(action_names::MOVE_RIGHT);
            app.press(action_names::MOVE_LEFT);
        } else if frame % (2 * sweep) == sweep {
            app.release(action_names::MOVE_LEFT);
            app.press(action_names::MOVE_RIGHT);
        }
        app.frame(args.frame_dt);

        if let PluginRuntimeState::PausedError(reason) = app.runtime_state() {
            error!(frame, %reason, "plugin paused");
            break;
        }
    }

    let engine = app.engine();
    info!(
        rocks = engine.count_named("Rock"),
        missiles = engine.count_named("Missile"),
        explosions = engine.count_named("Explosion"),
        aliens = engine.count_named("Alien"),
        "field at end of session"
    );

    let shots = engine.one_shot_paths();
    let count = |path: &str| shots.iter().filter(|&&p| p == path).count();
    let saucers = engine
        .audio_events()
        .iter()
        .filter(|event| matches!(event, AudioEvent::Looped { .. }))
        .count();
    info!(
        fired = count("Sounds/fire"),
        rocks_destroyed = count("Sounds/bangLarge"),
        ship_hits = count("Sounds/explosion_player"),
        saucers,
        "sounds played"
    );

    let engine = app.shutdown();
    let stats = engine.stats();
    info!(
        created = stats.visuals_created,
        destroyed = stats.visuals_destroyed,
        assets = stats.assets_loaded,
        "visual objects"
    );
    Ok(())
}
