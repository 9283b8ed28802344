//! Keyed, cancelable timers driven by the frame clock
//!
//! Timers hold no references into the world. Advancing them yields the keys
//! that fired; the owner turns those into state changes. Arming a key that is
//! already pending replaces the old instance outright, so a canceled timer can
//! never fire afterwards.

use std::fmt::Debug;

/// Slack for accumulated floating-point frame deltas
const FIRE_EPSILON: f32 = 1e-4;

/// One-shot or repeating
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimerMode {
    Once,
    Repeat { interval: f32 },
}

#[derive(Debug, Clone)]
struct Timer<K> {
    key: K,
    remaining: f32,
    mode: TimerMode,
}

/// Set of pending timers, at most one per key
#[derive(Debug, Clone)]
pub struct Timers<K> {
    pending: Vec<Timer<K>>,
}

impl<K> Default for Timers<K> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
        }
    }
}

impl<K: Copy + Eq + Debug> Timers<K> {
    pub fn new() -> Self {
        Self::default()
    }

    fn arm(&mut self, key: K, delay: f32, mode: TimerMode) {
        if self.cancel(key) {
            log::trace!("timer {key:?} re-armed");
        }
        self.pending.push(Timer {
            key,
            remaining: delay.max(0.0),
            mode,
        });
    }

    /// Fire once after `delay` seconds
    pub fn arm_once(&mut self, key: K, delay: f32) {
        self.arm(key, delay, TimerMode::Once);
    }

    /// Fire every `interval` seconds, first after one interval
    pub fn arm_repeating(&mut self, key: K, interval: f32) {
        self.arm(key, interval, TimerMode::Repeat { interval });
    }

    /// Drop a pending timer; returns whether one existed
    pub fn cancel(&mut self, key: K) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.key != key);
        self.pending.len() != before
    }

    pub fn is_armed(&self, key: K) -> bool {
        self.pending.iter().any(|t| t.key == key)
    }

    /// Seconds until `key` next fires
    pub fn remaining(&self, key: K) -> Option<f32> {
        self.pending
            .iter()
            .find(|t| t.key == key)
            .map(|t| t.remaining.max(0.0))
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Advance all timers by `dt`, returning fired keys in arming order.
    /// A repeating timer appears once per elapsed interval.
    pub fn advance(&mut self, dt: f32) -> Vec<K> {
        let mut fired = Vec::new();
        for timer in &mut self.pending {
            timer.remaining -= dt;
            match timer.mode {
                TimerMode::Once => {
                    if timer.remaining <= FIRE_EPSILON {
                        fired.push(timer.key);
                    }
                }
                TimerMode::Repeat { interval } => {
                    if interval <= 0.0 {
                        // Degenerate interval fires once per frame
                        fired.push(timer.key);
                        timer.remaining = 0.0;
                        continue;
                    }
                    while timer.remaining <= FIRE_EPSILON {
                        fired.push(timer.key);
                        timer.remaining += interval;
                    }
                }
            }
        }
        self.pending
            .retain(|t| !(t.mode == TimerMode::Once && t.remaining <= FIRE_EPSILON));
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Key {
        A,
        B,
    }

    #[test]
    fn test_once_fires_after_delay() {
        let mut timers = Timers::new();
        timers.arm_once(Key::A, 1.0);
        assert!(timers.advance(0.5).is_empty());
        assert_eq!(timers.advance(0.5), vec![Key::A]);
        assert!(!timers.is_armed(Key::A));
        assert!(timers.advance(5.0).is_empty());
    }

    #[test]
    fn test_rearm_replaces_pending() {
        let mut timers = Timers::new();
        timers.arm_once(Key::A, 1.0);
        timers.advance(0.8);
        timers.arm_once(Key::A, 1.0);
        assert_eq!(timers.len(), 1);
        // The first instance would have fired here
        assert!(timers.advance(0.5).is_empty());
        assert_eq!(timers.advance(0.5), vec![Key::A]);
    }

    #[test]
    fn test_cancel_is_total() {
        let mut timers = Timers::new();
        timers.arm_once(Key::A, 0.1);
        timers.arm_once(Key::B, 0.1);
        assert!(timers.cancel(Key::A));
        assert!(!timers.cancel(Key::A));
        assert_eq!(timers.advance(1.0), vec![Key::B]);
    }

    #[test]
    fn test_repeating_fires_per_interval() {
        let mut timers = Timers::new();
        timers.arm_repeating(Key::A, 0.25);
        assert_eq!(timers.advance(0.1), Vec::<Key>::new());
        assert_eq!(timers.advance(0.5), vec![Key::A, Key::A]);
        assert!(timers.is_armed(Key::A));
        let left = timers.remaining(Key::A).unwrap();
        assert!((left - 0.15).abs() < 1e-4, "left={left}");
    }

    #[test]
    fn test_sixty_hz_accumulation_fires_on_time() {
        let mut timers = Timers::new();
        timers.arm_once(Key::A, 5.0);
        let dt = 1.0 / 60.0;
        let mut fired_at = None;
        for frame in 1..=400 {
            if !timers.advance(dt).is_empty() {
                fired_at = Some(frame);
                break;
            }
        }
        assert_eq!(fired_at, Some(300));
    }
}
