//! Space Run - simulation core for a vertical 2D arcade shooter
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (motion, spawning, collisions, game state)
//! - `config`: Construction-time configuration (field geometry, seed)
//! - `error`: Error taxonomy shared by the simulation
//!
//! Rendering, audio and HUD layout live outside this crate. The host feeds
//! pointer events and frame timestamps in, and reads back a [`sim::FrameSnapshot`]
//! plus a queue of [`sim::GameEvent`] notifications.

pub mod config;
pub mod error;
pub mod sim;

pub use config::SimConfig;
pub use error::{SimError, SimResult};

use glam::Vec2;

/// Gameplay constants
pub mod consts {
    /// Frame step of a 60 Hz host (demo binary and tests)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Ship/shield seek speed (units per second)
    pub const SHIP_SPEED: f32 = 300.0;
    /// Seek dead zone: no movement when this close to the target
    pub const SEEK_DEAD_ZONE: f32 = 4.0;

    /// Ship and shield extents
    pub const SHIP_SIZE: f32 = 40.0;
    pub const SHIELD_SIZE: f32 = 60.0;

    /// Health levels
    pub const HEALTH_START: u8 = 2;
    pub const HEALTH_MAX: u8 = 4;

    /// Seconds between shots
    pub const FIRE_INTERVAL_NORMAL: f32 = 0.5;
    pub const FIRE_INTERVAL_BOOSTED: f32 = 0.1;
    /// Length of a weapon power-up window
    pub const POWER_UP_DURATION: f32 = 5.0;

    /// Photon torpedo extent and flight time
    pub const PROJECTILE_WIDTH: f32 = 6.0;
    pub const PROJECTILE_HEIGHT: f32 = 18.0;
    pub const PROJECTILE_FLIGHT_TIME: f32 = 0.5;

    /// Points per obstacle destroyed by a projectile
    pub const OBSTACLE_POINTS: u64 = 10;

    /// Spawn roll: `spawn when draw(0..SPAWN_DENOMINATOR) < SPAWN_NUMERATOR`
    pub const SPAWN_NUMERATOR: u32 = 15;
    pub const SPAWN_DENOMINATOR: u32 = 1000;

    /// Cumulative thresholds on a 0..100 roll
    pub const POWER_UP_THRESHOLD: u32 = 10;
    pub const ENEMY_THRESHOLD: u32 = 25;
    pub const HEALTH_THRESHOLD: u32 = 28;

    /// Spawn extents and path durations
    pub const OBSTACLE_MIN_SIZE: u32 = 15;
    pub const OBSTACLE_MAX_SIZE: u32 = 44;
    pub const OBSTACLE_MIN_DURATION: u32 = 3;
    pub const OBSTACLE_MAX_DURATION: u32 = 6;
    pub const HEALTH_PICKUP_SIZE: f32 = 20.0;
    pub const HEALTH_PICKUP_DURATION: f32 = 5.0;
    pub const ENEMY_SIZE: f32 = 30.0;
    pub const ENEMY_PATH_DURATION: f32 = 7.0;
    pub const POWER_UP_SIZE: f32 = 30.0;
    pub const POWER_UP_PATH_DURATION: f32 = 6.0;

    /// HUD refresh cadence for elapsed time and power-up countdown
    pub const HUD_REFRESH_INTERVAL: f32 = 0.05;

    /// Explosion playback hints (seconds)
    pub const SHIP_EXPLOSION_DURATION: f32 = 0.3;
    pub const OBSTACLE_EXPLOSION_DURATION: f32 = 0.1;
}

/// Axis-aligned rectangle centered on `center`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub center: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.size * 0.5
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.size * 0.5
    }

    /// Rectangle-intersects semantics: touching edges do not count
    pub fn intersects(&self, other: &Rect) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x < b_max.x && b_min.x < a_max.x && a_min.y < b_max.y && b_min.y < a_max.y
    }
}

/// Straight-line bearing from `from` to `to` (radians)
#[inline]
pub fn bearing(from: Vec2, to: Vec2) -> f32 {
    (to.y - from.y).atan2(to.x - from.x)
}
