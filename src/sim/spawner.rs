//! Stochastic spawner
//!
//! Each frame rolls once for a spawn; a hit picks one kind from a fixed
//! weighting and places it just above the top edge of the field.

use glam::Vec2;
use rand::Rng;

use super::path::{CurvePath, LinearPath, Motion};
use super::registry::{Appearance, EntityId, EntityKind, Registry, Spawn};
use crate::consts::*;
use crate::error::SimResult;

/// Play-field bounds; (0, 0) is the bottom-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayField {
    pub width: f32,
    pub height: f32,
}

impl PlayField {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Kinds the spawner can drop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpawnKind {
    WeaponPowerUp,
    EnemyShip,
    HealthPickup,
    Obstacle,
}

impl SpawnKind {
    /// Map a roll in 0..100 to a kind (10% / 15% / 3% / 72%)
    pub fn from_roll(roll: u32) -> Self {
        if roll < POWER_UP_THRESHOLD {
            SpawnKind::WeaponPowerUp
        } else if roll < ENEMY_THRESHOLD {
            SpawnKind::EnemyShip
        } else if roll < HEALTH_THRESHOLD {
            SpawnKind::HealthPickup
        } else {
            SpawnKind::Obstacle
        }
    }
}

/// The once-per-frame spawn check
pub fn should_spawn<R: Rng>(rng: &mut R) -> bool {
    rng.random_range(0..SPAWN_DENOMINATOR) < SPAWN_NUMERATOR
}

pub fn roll_kind<R: Rng>(rng: &mut R) -> SpawnKind {
    SpawnKind::from_roll(rng.random_range(0..100))
}

/// Uniform draw in `[lo, hi)`, collapsing to `lo` when the field is too narrow
fn uniform<R: Rng>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.random_range(lo..hi) } else { lo }
}

/// Placement, size and trajectory for a freshly dropped entity
pub fn build<R: Rng>(kind: SpawnKind, rng: &mut R, field: PlayField) -> Spawn {
    let (w, h) = (field.width, field.height);
    match kind {
        SpawnKind::Obstacle => {
            let side = rng.random_range(OBSTACLE_MIN_SIZE..=OBSTACLE_MAX_SIZE) as f32;
            let start = Vec2::new(uniform(rng, -w / 4.0, w * 1.25), h + side);
            let end = Vec2::new(uniform(rng, 0.0, w), -side);
            let duration =
                rng.random_range(OBSTACLE_MIN_DURATION..=OBSTACLE_MAX_DURATION) as f32;
            // 3 radians per 1-3 seconds
            let spin = 3.0 / rng.random_range(1..=3u32) as f32;
            Spawn::new(
                EntityKind::Obstacle,
                start,
                Vec2::splat(side),
                Motion::Linear(LinearPath::new(start, end, duration)),
            )
            .with_look(Appearance::spinning(spin))
        }
        SpawnKind::HealthPickup => {
            let side = HEALTH_PICKUP_SIZE;
            let x = uniform(rng, 0.0, w - 40.0);
            let start = Vec2::new(x, h + side);
            let end = Vec2::new(x, -side);
            Spawn::new(
                EntityKind::HealthPickup,
                start,
                Vec2::splat(side),
                Motion::Linear(LinearPath::new(start, end, HEALTH_PICKUP_DURATION)),
            )
            .with_look(Appearance {
                fade_out: true,
                ..Appearance::spinning(1.0)
            })
        }
        SpawnKind::EnemyShip => {
            let side = ENEMY_SIZE;
            let start = Vec2::new(uniform(rng, 20.0, w - 20.0), h + side);
            Spawn::new(
                EntityKind::EnemyShip,
                start,
                Vec2::splat(side),
                Motion::Curve(CurvePath::new(start, ENEMY_PATH_DURATION)),
            )
            .with_look(Appearance {
                orient_to_path: true,
                ..Appearance::default()
            })
        }
        SpawnKind::WeaponPowerUp => {
            let side = POWER_UP_SIZE;
            let x = uniform(rng, 30.0, w - 30.0);
            let start = Vec2::new(x, h + side);
            let end = Vec2::new(x, -side);
            Spawn::new(
                EntityKind::WeaponPowerUp,
                start,
                Vec2::splat(side),
                Motion::Linear(LinearPath::new(start, end, POWER_UP_PATH_DURATION)),
            )
            .with_look(Appearance::spinning(1.0))
        }
    }
}

/// Roll for a spawn and insert the result. At most one entity per call.
pub fn maybe_spawn<R: Rng>(
    rng: &mut R,
    registry: &mut Registry,
    field: PlayField,
    now: f64,
) -> SimResult<Option<EntityId>> {
    if !should_spawn(rng) {
        return Ok(None);
    }
    let kind = roll_kind(rng);
    let id = registry.insert(build(kind, rng, field), now)?;
    Ok(Some(id))
}
