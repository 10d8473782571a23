//! Fixed-rate tick scheduling
//!
//! Converts host animation timestamps into a whole number of simulation
//! ticks so game speed does not depend on the display refresh rate.

use crate::consts::{MAX_FRAME_GAP, MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
    accumulator: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the host timestamp (ms) and get the number of ticks to run
    ///
    /// The first call only primes the clock. Backwards timestamps count as
    /// no elapsed time; long stalls are capped instead of replayed.
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let Some(last) = self.last_ms.replace(now_ms) else {
            return 0;
        };
        let elapsed = ((now_ms - last) / 1000.0).clamp(0.0, MAX_FRAME_GAP);
        self.accumulator += elapsed;

        let mut ticks = 0;
        while self.accumulator >= SIM_DT && ticks < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            ticks += 1;
        }
        if ticks == MAX_SUBSTEPS {
            // Drop whatever could not be caught up this frame
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        ticks
    }

    /// Forget timing history (after a pause or tab switch)
    pub fn reset(&mut self) {
        self.last_ms = None;
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_primes() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(1000.0), 0);
    }

    #[test]
    fn test_sixty_hz_runs_one_tick_per_frame() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        let frame = SIM_DT * 1000.0;
        let total: u32 = (1..=60).map(|i| clock.advance(i as f64 * frame + 0.01)).sum();
        assert_eq!(total, 60);
    }

    #[test]
    fn test_high_refresh_rate_keeps_game_speed() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        let frame = 1000.0 / 144.0;
        let total: u32 = (1..=144).map(|i| clock.advance(i as f64 * frame)).sum();
        assert!((59..=60).contains(&total));
    }

    #[test]
    fn test_stall_is_capped() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        assert_eq!(clock.advance(10_000.0), MAX_SUBSTEPS);
        assert!(clock.advance(10_000.0 + SIM_DT * 1000.0) <= 2);
    }

    #[test]
    fn test_backwards_time_is_ignored() {
        let mut clock = FrameClock::new();
        clock.advance(500.0);
        assert_eq!(clock.advance(400.0), 0);
        clock.reset();
        assert_eq!(clock.advance(0.0), 0);
    }
}
