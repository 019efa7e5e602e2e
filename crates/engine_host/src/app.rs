// crates/engine_host/src/app.rs
//! Headless application: owns the engine state, the plugin and the loop, and
//! lets the caller script key presses frame by frame.

use engine_shared::HostInterface;
use tracing::{info, warn};

use crate::engine::HeadlessEngine;
use crate::engine_loop::EngineLoop;
use crate::error::Result;
use crate::host::{self, context_of};
use crate::input::KeyboardState;
use crate::plugin_manager::{PluginHandle, PluginManager, PluginRuntimeState};

pub struct App {
    // Boxed so the context pointer handed to the plugin stays put.
    engine: Box<HeadlessEngine>,
    plugin: PluginManager,
    engine_loop: EngineLoop,
    keyboard: KeyboardState,
    interface: HostInterface,
    frames: u64,
}

impl App {
    pub fn new(engine: HeadlessEngine, plugin: PluginHandle) -> Self {
        Self {
            engine: Box::new(engine),
            plugin: PluginManager::new(plugin),
            engine_loop: EngineLoop::default(),
            keyboard: KeyboardState::new(),
            interface: host::create_interface(),
            frames: 0,
        }
    }

    pub fn with_sim_dt(mut self, sim_dt: f32) -> Self {
        self.engine_loop = EngineLoop::new(sim_dt);
        self
    }

    pub fn start(&mut self) -> Result<()> {
        let ctx = context_of(&mut self.engine);
        self.plugin.initial_load(ctx, &self.interface)?;
        info!(visuals = self.engine.visual_count(), "plugin started");
        Ok(())
    }

    /// Hold the key bound to `action` until [`App::release`].
    pub fn press(&mut self, action: &str) {
        match self.engine.registry().get_id(action) {
            Some(id) => self.keyboard.press(id),
            None => warn!(action, "press of unknown action"),
        }
    }

    pub fn release(&mut self, action: &str) {
        match self.engine.registry().get_id(action) {
            Some(id) => self.keyboard.release(id),
            None => warn!(action, "release of unknown action"),
        }
    }

    /// Advance one display frame of `dt` seconds. Returns the number of
    /// simulation steps that ran.
    pub fn frame(&mut self, dt: f32) -> u32 {
        let steps = self
            .engine_loop
            .update_simulation(dt, &mut self.engine, &mut self.plugin, &self.keyboard);
        // Edges survive frames too short to step the simulation.
        if steps > 0 {
            self.keyboard.end_frame();
        }
        self.frames += 1;
        steps
    }

    pub fn engine(&self) -> &HeadlessEngine {
        &self.engine
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn steps(&self) -> u64 {
        self.engine_loop.total_steps()
    }

    pub fn runtime_state(&self) -> &PluginRuntimeState {
        self.plugin.runtime_state()
    }

    /// Unload the plugin and hand back the engine for inspection.
    pub fn shutdown(mut self) -> HeadlessEngine {
        let ctx = context_of(&mut self.engine);
        self.plugin.unload(ctx);
        info!(frames = self.frames, steps = self.engine_loop.total_steps(), "session ended");
        // The plugin state is released before the engine it points into.
        drop(self.plugin);
        *self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin_manager::tests::{counting_api, CountingPlugin};
    use engine_shared::input_types::action_names;

    #[test]
    fn scripted_presses_reach_the_plugin() {
        let mut plugin = CountingPlugin::default();
        let handle = PluginHandle::from_api(counting_api(&mut plugin)).unwrap();
        let mut app = App::new(HeadlessEngine::default(), handle).with_sim_dt(0.25);
        app.start().unwrap();

        app.press(action_names::FIRE);
        assert_eq!(app.frame(0.125), 0);
        assert_eq!(app.frame(0.125), 1);
        app.release(action_names::FIRE);
        app.press("Jump");
        assert_eq!(app.frame(0.25), 1);

        assert_eq!(app.frames(), 3);
        assert_eq!(app.steps(), 2);
        assert_eq!(app.runtime_state(), &PluginRuntimeState::Running);
        let _engine = app.shutdown();

        assert_eq!((plugin.loads, plugin.updates, plugin.unloads), (1, 2, 1));
        assert_eq!(plugin.fires, 1);
    }
}
