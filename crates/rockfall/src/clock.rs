// crates/rockfall/src/clock.rs

/// Simulation time, advanced only by the `dt` handed to `Game::update`.
/// Every "time since last X" comparison in the game reads from here.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimClock {
    now: f64,
    frames: u64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, dt: f32) {
        self.now += f64::from(dt);
        self.frames += 1;
    }

    /// Seconds since the game started.
    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

/// True once strictly more than `interval` seconds separate `since` and `now`.
pub fn has_elapsed(now: f64, since: f64, interval: f32) -> bool {
    now - since > f64::from(interval)
}

/// Negative or non-finite deltas become 0; spikes are clamped to `max_dt`.
pub fn sanitize_dt(dt: f32, max_dt: f32) -> f32 {
    if !dt.is_finite() || dt < 0.0 {
        0.0
    } else {
        dt.min(max_dt)
    }
}
