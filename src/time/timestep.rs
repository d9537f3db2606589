//! Fixed-timestep accumulator.
//!
//! Irregular host ticks are turned into a whole number of fixed sub-steps:
//! elapsed wall time is added to an accumulator and drained one `dt` at a
//! time. The accumulator is clamped to [`MAX_FRAME_TIME`] so a long stall
//! never triggers an unbounded catch-up.
//!
//! In frame-stepping mode the accumulator still drains at the same rate,
//! but a sub-step only runs when one was explicitly granted.

/// Longest stretch of wall time (seconds) caught up in one sample.
pub const MAX_FRAME_TIME: f64 = 0.1;

/// Outcome of draining one `dt` from the accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Run a fixed sub-step.
    Run,
    /// Time was consumed but the simulation is paused.
    Skipped,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FixedTimestep {
    dt: f64,
    accumulator: f64,
    last_sample_ms: u64,
    frame_stepping: bool,
    can_step: bool,
}

impl FixedTimestep {
    pub fn new(dt: f64) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            last_sample_ms: 0,
            frame_stepping: false,
            can_step: false,
        }
    }

    pub fn from_rate(ticks_per_second: u32) -> Self {
        Self::new(1.0 / f64::from(ticks_per_second))
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    pub fn last_sample_ms(&self) -> u64 {
        self.last_sample_ms
    }

    /// Adds the time elapsed since the previous sample. A clock that went
    /// backwards only drains the accumulator down to zero.
    pub fn sample(&mut self, now_ms: u64) {
        let elapsed = (now_ms as f64 - self.last_sample_ms as f64) / 1000.0;
        self.accumulator += elapsed;
        self.last_sample_ms = now_ms;
        self.accumulator = self.accumulator.clamp(0.0, MAX_FRAME_TIME);
    }

    /// Drains one `dt` if enough time has accumulated.
    pub fn next_tick(&mut self) -> Option<Tick> {
        if self.accumulator < self.dt {
            return None;
        }
        self.accumulator -= self.dt;
        if !self.frame_stepping {
            return Some(Tick::Run);
        }
        if self.can_step {
            self.can_step = false;
            Some(Tick::Run)
        } else {
            Some(Tick::Skipped)
        }
    }

    pub fn frame_stepping(&self) -> bool {
        self.frame_stepping
    }

    /// Enables or disables frame stepping without granting a sub-step.
    pub fn set_frame_stepping(&mut self, enabled: bool) {
        self.frame_stepping = enabled;
        if !enabled {
            self.can_step = false;
        }
    }

    /// Flips frame stepping. Switching it on grants one sub-step so the
    /// frame that was in flight still completes.
    pub fn toggle_frame_stepping(&mut self) {
        let enabled = !self.frame_stepping;
        self.set_frame_stepping(enabled);
        if enabled {
            self.can_step = true;
        }
    }

    /// Pauses automatic stepping (if it was running) and grants exactly
    /// one sub-step.
    pub fn request_single_step(&mut self) {
        self.frame_stepping = true;
        self.can_step = true;
    }

    pub fn can_step(&self) -> bool {
        self.can_step
    }
}
