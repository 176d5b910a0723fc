//=========================================================================
// Frame Clock
//=========================================================================
//
// Measures the time between redraws and hands it out as the frame `dt`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Instant;

//=== FrameClock ==========================================================

/// Wall-clock delta between consecutive frames, capped at `max_dt`.
///
/// The first tick has nothing to measure against and yields `0.0`.
#[derive(Debug, Clone)]
pub(crate) struct FrameClock {
    last: Option<Instant>,
    max_dt: f32,
}

impl FrameClock {
    pub(crate) fn new(max_dt: f32) -> Self {
        Self { last: None, max_dt }
    }

    /// Marks a frame at `now` and returns the seconds since the last one.
    pub(crate) fn tick(&mut self, now: Instant) -> f32 {
        let dt = match self.last {
            Some(last) => now.saturating_duration_since(last).as_secs_f32(),
            None => 0.0,
        };
        self.last = Some(now);
        dt.min(self.max_dt)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
