use log::trace;

use crate::game::Game;
use crate::input::InputKeys;
use crate::surface::Surface;

/// Whether the host should schedule another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// Turns host timestamps into frame deltas and runs one tick per call.
///
/// Deltas are clamped to `[0, max_frame_delta]`, so a stalled host or a
/// clock that steps backwards can never push more than one frame's worth
/// of time into the simulation.
#[derive(Debug, Clone)]
pub struct GameLoop {
    last_time: f64,
    max_frame_delta: f64,
}

impl GameLoop {
    pub fn new(max_frame_delta: f64) -> Self {
        Self {
            last_time: 0.0,
            max_frame_delta,
        }
    }

    pub fn last_time(&self) -> f64 {
        self.last_time
    }

    /// Delta since the previous timestamp, clamped
    pub fn frame_delta(&mut self, timestamp: f64) -> f64 {
        let raw = timestamp - self.last_time;
        self.last_time = timestamp;

        let delta = raw.clamp(0.0, self.max_frame_delta);
        if delta != raw {
            trace!("Clamped frame delta {raw:.1}ms to {delta:.1}ms");
        }
        delta
    }

    /// Clears the surface, updates, draws, and reports whether to go on.
    /// The final frame is always drawn before `Stop` is returned.
    pub fn animate(
        &mut self,
        timestamp: f64,
        keys: &InputKeys,
        game: &mut Game,
        surface: &mut dyn Surface,
    ) -> LoopControl {
        let delta = self.frame_delta(timestamp);
        surface.clear();
        game.update(delta, keys);
        game.draw(surface);

        if game.is_game_over() {
            LoopControl::Stop
        } else {
            LoopControl::Continue
        }
    }
}
