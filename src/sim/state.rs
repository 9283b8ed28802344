//! Game state: score, health, fire rate and the Running → GameOver machine
//!
//! Mutated only by the collision pass, the spawner's outcomes and timer
//! intents. Every mutation that the HUD cares about pushes a [`GameEvent`].

use serde::{Deserialize, Serialize};

use super::events::GameEvent;
use crate::consts::*;

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Running,
    /// Terminal; entered once when the ship is destroyed
    GameOver,
}

/// Weapon cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FireRateMode {
    Normal,
    Boosted,
}

impl FireRateMode {
    /// Minimum seconds between shots
    pub fn interval(self) -> f32 {
        match self {
            FireRateMode::Normal => FIRE_INTERVAL_NORMAL,
            FireRateMode::Boosted => FIRE_INTERVAL_BOOSTED,
        }
    }
}

/// Outcome of an obstacle striking the ship
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HullDamage {
    /// Health dropped to the contained level
    Absorbed(u8),
    /// The hit landed at zero health
    Destroyed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub score: u64,
    /// Seconds of play, frozen at game over
    pub elapsed: f64,
    /// 0..=HEALTH_MAX
    pub health: u8,
    pub fire_rate: FireRateMode,
    pub phase: GamePhase,
    /// Simulated time of the last shot, `None` before the first
    pub last_shot_at: Option<f64>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            score: 0,
            elapsed: 0.0,
            health: HEALTH_START,
            fire_rate: FireRateMode::Normal,
            phase: GamePhase::Running,
            last_shot_at: None,
        }
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn fire_interval(&self) -> f32 {
        self.fire_rate.interval()
    }

    /// Whether the weapon has cooled down at `now`
    pub fn ready_to_fire(&self, now: f64) -> bool {
        match self.last_shot_at {
            None => true,
            Some(last) => now - last > f64::from(self.fire_interval()),
        }
    }

    /// Accrue play time; no-op after game over
    pub fn accrue(&mut self, dt: f32) {
        if !self.is_game_over() {
            self.elapsed += f64::from(dt);
        }
    }

    pub fn add_points(&mut self, points: u64, events: &mut Vec<GameEvent>) {
        if self.is_game_over() {
            return;
        }
        self.score = self.score.saturating_add(points);
        events.push(GameEvent::ScoreChanged(self.score));
    }

    /// Health pickups restore to full rather than adding a level
    pub fn restore_health(&mut self, events: &mut Vec<GameEvent>) {
        self.health = HEALTH_MAX;
        events.push(GameEvent::HealthChanged(self.health));
    }

    /// An obstacle hit the ship
    pub fn take_hit(&mut self, events: &mut Vec<GameEvent>) -> HullDamage {
        if self.health == 0 {
            return HullDamage::Destroyed;
        }
        debug_assert!(self.health <= HEALTH_MAX, "health above max: {}", self.health);
        self.health = self.health.saturating_sub(1);
        events.push(GameEvent::HealthChanged(self.health));
        HullDamage::Absorbed(self.health)
    }

    pub fn boost_fire_rate(&mut self) {
        self.fire_rate = FireRateMode::Boosted;
    }

    pub fn reset_fire_rate(&mut self) {
        self.fire_rate = FireRateMode::Normal;
    }

    /// Enter the terminal phase. Returns false if already there.
    pub fn end_game(&mut self, events: &mut Vec<GameEvent>) -> bool {
        if self.is_game_over() {
            return false;
        }
        self.phase = GamePhase::GameOver;
        self.fire_rate = FireRateMode::Normal;
        events.push(GameEvent::GameOver {
            final_score: self.score,
        });
        log::info!(
            "game over: score {} after {:.1}s",
            self.score,
            self.elapsed
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new();
        assert_eq!(state.health, 2);
        assert_eq!(state.score, 0);
        assert_eq!(state.fire_interval(), 0.5);
        assert!(!state.is_game_over());
    }

    #[test]
    fn test_hits_count_down_then_destroy() {
        let mut state = GameState::new();
        let mut events = Vec::new();
        assert_eq!(state.take_hit(&mut events), HullDamage::Absorbed(1));
        assert_eq!(state.take_hit(&mut events), HullDamage::Absorbed(0));
        assert_eq!(state.take_hit(&mut events), HullDamage::Destroyed);
        assert_eq!(state.health, 0);
        assert_eq!(
            events,
            vec![GameEvent::HealthChanged(1), GameEvent::HealthChanged(0)]
        );
    }

    #[test]
    fn test_restore_is_a_reset_not_increment() {
        let mut state = GameState::new();
        let mut events = Vec::new();
        state.restore_health(&mut events);
        assert_eq!(state.health, HEALTH_MAX);
        state.restore_health(&mut events);
        assert_eq!(state.health, HEALTH_MAX);
    }

    #[test]
    fn test_game_over_freezes_score_and_time() {
        let mut state = GameState::new();
        let mut events = Vec::new();
        state.add_points(10, &mut events);
        state.accrue(1.5);
        assert!(state.end_game(&mut events));
        assert!(!state.end_game(&mut events));

        state.add_points(10, &mut events);
        state.accrue(3.0);
        assert_eq!(state.score, 10);
        assert!((state.elapsed - 1.5).abs() < 1e-9);
        assert_eq!(
            events.last(),
            Some(&GameEvent::GameOver { final_score: 10 })
        );
    }

    #[test]
    fn test_cooldown_is_strict() {
        let mut state = GameState::new();
        assert!(state.ready_to_fire(0.0));
        state.last_shot_at = Some(1.0);
        assert!(!state.ready_to_fire(1.5));
        assert!(state.ready_to_fire(1.51));
        state.boost_fire_rate();
        assert!(state.ready_to_fire(1.11));
    }

    #[test]
    fn test_fire_rate_modes() {
        let mut state = GameState::new();
        state.boost_fire_rate();
        assert_eq!(state.fire_interval(), 0.1);
        state.reset_fire_rate();
        assert_eq!(state.fire_interval(), 0.5);
    }
}
