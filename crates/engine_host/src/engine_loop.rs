// crates/engine_host/src/engine_loop.rs

use crate::engine::HeadlessEngine;
use crate::host::context_of;
use crate::input::KeyboardState;
use crate::plugin_manager::PluginManager;

/// Frame deltas above this are clamped (breakpoints, stalls).
pub const MAX_FRAME_DT: f32 = 0.25;

/// Encapsulates fixed-timestep simulation bookkeeping (accumulator, limits).
pub struct EngineLoop {
    sim_accumulator: f32,
    sim_dt: f32,
    max_steps_per_frame: u32,
    total_steps: u64,
}

impl Default for EngineLoop {
    fn default() -> Self {
        Self::new(1.0 / 60.0)
    }
}

impl EngineLoop {
    pub fn new(sim_dt: f32) -> Self {
        Self {
            sim_accumulator: 0.0,
            sim_dt,
            max_steps_per_frame: 5,
            total_steps: 0,
        }
    }

    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    /// Runs fixed-timestep simulation steps until the accumulator is caught up
    /// or we hit max_steps_per_frame. If the backlog still remains at the cap,
    /// we drop it, to avoid "chasing" an infinite backlog under heavy load.
    ///
    /// Only the first step of a frame sees pressed/released edges; later
    /// catch-up steps get the held keys alone so a tap fires once.
    pub fn update_simulation(
        &mut self,
        frame_dt: f32,
        engine: &mut HeadlessEngine,
        plugin_manager: &mut PluginManager,
        keyboard: &KeyboardState,
    ) -> u32 {
        let frame_dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.sim_accumulator += frame_dt;

        let snapshot = keyboard.snapshot();
        let ctx = context_of(engine);
        let mut steps = 0;
        while self.sim_accumulator >= self.sim_dt && steps < self.max_steps_per_frame {
            let input = if steps == 0 { snapshot } else { snapshot.held_only() };
            plugin_manager.update(ctx, &input, self.sim_dt);
            self.sim_accumulator -= self.sim_dt;
            steps += 1;
        }
        self.total_steps += u64::from(steps);

        // Prevent unbounded backlog if we're constantly saturated.
        if steps == self.max_steps_per_frame && self.sim_accumulator >= self.sim_dt {
            self.sim_accumulator = 0.0;
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin_manager::tests::{counting_api, CountingPlugin};
    use crate::plugin_manager::PluginHandle;

    fn run(frames: &[f32], plugin: &mut CountingPlugin, keyboard: &mut KeyboardState) -> Vec<u32> {
        let mut engine = HeadlessEngine::default();
        let mut manager = PluginManager::new(PluginHandle::from_api(counting_api(plugin)).unwrap());
        let mut engine_loop = EngineLoop::new(0.125);
        frames
            .iter()
            .map(|&dt| {
                let steps = engine_loop.update_simulation(dt, &mut engine, &mut manager, keyboard);
                if steps > 0 {
                    keyboard.end_frame();
                }
                steps
            })
            .collect()
    }

    #[test]
    fn accumulator_carries_the_remainder() {
        let mut plugin = CountingPlugin::default();
        let steps = run(&[0.0625, 0.0625, 0.1875], &mut plugin, &mut KeyboardState::new());

        assert_eq!(steps, vec![0, 1, 1]);
        assert_eq!(plugin.updates, 2);
        assert_eq!(plugin.total_dt, 0.25);
    }

    #[test]
    fn long_frames_are_clamped_and_capped() {
        let mut plugin = CountingPlugin::default();
        let mut engine = HeadlessEngine::default();
        let mut manager = PluginManager::new(PluginHandle::from_api(counting_api(&mut plugin)).unwrap());
        let mut engine_loop = EngineLoop::new(0.03125);
        let keyboard = KeyboardState::new();

        // 10s clamps to 0.25s = 8 steps, capped at 5 and the rest dropped.
        assert_eq!(engine_loop.update_simulation(10.0, &mut engine, &mut manager, &keyboard), 5);
        assert_eq!(engine_loop.update_simulation(0.0, &mut engine, &mut manager, &keyboard), 0);
        assert_eq!(engine_loop.update_simulation(f32::NAN, &mut engine, &mut manager, &keyboard), 0);
        assert_eq!(engine_loop.update_simulation(-1.0, &mut engine, &mut manager, &keyboard), 0);
        assert_eq!(engine_loop.total_steps(), 5);
    }

    #[test]
    fn a_tap_is_seen_by_one_step() {
        let mut plugin = CountingPlugin::default();
        let mut keyboard = KeyboardState::new();
        keyboard.press(4);

        // Two steps in the first frame, one in the second.
        let steps = run(&[0.25, 0.125], &mut plugin, &mut keyboard);

        assert_eq!(steps, vec![2, 1]);
        assert_eq!(plugin.updates, 3);
        assert_eq!(plugin.fires, 1);
    }
}
