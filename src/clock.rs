// Frame timing for the host loop. The core takes dt as given, so stall
// protection lives here.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    last: Instant,
    pub max_frame_dt: f64, // s
}

impl FrameClock {
    pub fn new(max_frame_dt: f64) -> Self {
        Self::starting_at(Instant::now(), max_frame_dt)
    }

    pub fn starting_at(start: Instant, max_frame_dt: f64) -> Self {
        Self {
            last: start,
            max_frame_dt,
        }
    }

    /// Seconds since the previous frame, or `None` when no time has passed.
    /// A delta longer than `max_frame_dt` (tab hidden, debugger, ...) is
    /// dropped to 0 instead of being integrated in one huge step.
    pub fn tick(&mut self, now: Instant) -> Option<f64> {
        let elapsed = now.saturating_duration_since(self.last);
        if elapsed == Duration::ZERO {
            return None;
        }
        self.last = now;
        Some(clamp_frame_dt(elapsed.as_secs_f64(), self.max_frame_dt))
    }
}

pub fn clamp_frame_dt(dt: f64, max_frame_dt: f64) -> f64 {
    if dt > max_frame_dt { 0.0 } else { dt }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn normal_frames_pass_through() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start, 1.0);
        let dt = clock.tick(start + Duration::from_millis(16)).unwrap();
        assert_relative_eq!(dt, 0.016);
    }

    #[test]
    fn zero_length_frames_are_skipped() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start, 1.0);
        assert_eq!(clock.tick(start), None);
    }

    #[test]
    fn stalled_frames_become_zero() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start, 1.0);
        assert_eq!(clock.tick(start + Duration::from_secs(3)), Some(0.0));

        // the stall still advances the reference time
        let dt = clock
            .tick(start + Duration::from_secs(3) + Duration::from_millis(20))
            .unwrap();
        assert_relative_eq!(dt, 0.020);
    }
}
