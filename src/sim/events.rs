//! Outbound notifications for audio, effects and the HUD
//!
//! The core pushes these as they happen; the host drains them once per frame
//! and never feeds anything back.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundKind {
    Shoot,
    ObstacleExplode,
    ShipExplode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExplosionKind {
    Obstacle,
    Ship,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PlaySound(SoundKind),
    SpawnExplosion {
        kind: ExplosionKind,
        at: Vec2,
        /// Seconds the emitter should keep birthing particles
        duration_hint: f32,
    },
    ScoreChanged(u64),
    HealthChanged(u8),
    ElapsedTimeChanged(f64),
    /// Seconds left in the power-up window, `None` once it lapses
    PowerUpTimerChanged(Option<f32>),
    GameOver {
        final_score: u64,
    },
}
