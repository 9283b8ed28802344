//! Frame clock
//!
//! Turns host timestamps into per-frame `dt` and keeps the simulation's own
//! notion of "now" (seconds of simulated time since the first frame).

/// Frame delta source shared by every system in a tick
#[derive(Debug, Clone)]
pub struct Clock {
    last_timestamp: Option<f64>,
    now: f64,
    dt: f32,
    max_dt: f32,
}

impl Clock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last_timestamp: None,
            now: 0.0,
            dt: 0.0,
            max_dt,
        }
    }

    /// Advance from a wall-clock timestamp (seconds). The first call yields `dt = 0`.
    pub fn tick(&mut self, timestamp: f64) -> f32 {
        let raw = match self.last_timestamp {
            Some(last) => (timestamp - last) as f32,
            None => 0.0,
        };
        self.last_timestamp = Some(timestamp);
        self.advance(raw)
    }

    /// Advance by an explicit delta (fixed-step hosts and tests)
    pub fn advance(&mut self, dt: f32) -> f32 {
        // Timestamps going backwards (host clock reset) count as a zero-length frame
        let dt = if dt.is_finite() { dt.clamp(0.0, self.max_dt) } else { 0.0 };
        self.dt = dt;
        self.now += f64::from(dt);
        dt
    }

    /// Simulated seconds since the first frame
    #[inline]
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Delta of the most recent frame
    #[inline]
    pub fn dt(&self) -> f32 {
        self.dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_is_zero() {
        let mut clock = Clock::new(0.25);
        assert_eq!(clock.tick(1000.0), 0.0);
        assert_eq!(clock.now(), 0.0);
    }

    #[test]
    fn test_tick_measures_delta() {
        let mut clock = Clock::new(0.25);
        clock.tick(10.0);
        let dt = clock.tick(10.016);
        assert!((dt - 0.016).abs() < 1e-4);
        assert!((clock.now() - 0.016).abs() < 1e-4);
    }

    #[test]
    fn test_spike_is_clamped() {
        let mut clock = Clock::new(0.25);
        clock.tick(0.0);
        assert_eq!(clock.tick(30.0), 0.25);
    }

    #[test]
    fn test_backwards_timestamp_is_zero() {
        let mut clock = Clock::new(0.25);
        clock.tick(5.0);
        assert_eq!(clock.tick(4.0), 0.0);
        assert_eq!(clock.dt(), 0.0);
    }
}
