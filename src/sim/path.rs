//! Path motion: prescribed trajectories with a completion condition
//!
//! Everything except the ship and shield moves along a fixed path and is
//! removed once the path's duration has elapsed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::curve::BezierPath;
use super::registry::{Entity, EntityId, Registry};

/// Straight move from `from` to `to` over `duration` seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearPath {
    pub from: Vec2,
    pub to: Vec2,
    pub duration: f32,
    pub elapsed: f32,
}

impl LinearPath {
    pub fn new(from: Vec2, to: Vec2, duration: f32) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: 0.0,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.from.lerp(self.to, progress(self.elapsed, self.duration))
    }
}

/// Follows the shared enemy curve, offset by the spawn point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePath {
    pub origin: Vec2,
    pub duration: f32,
    pub elapsed: f32,
}

impl CurvePath {
    pub fn new(origin: Vec2, duration: f32) -> Self {
        Self {
            origin,
            duration,
            elapsed: 0.0,
        }
    }

    pub fn position(&self, curve: &BezierPath) -> Vec2 {
        self.origin + curve.point_at(progress(self.elapsed, self.duration))
    }
}

/// How an entity moves each frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Motion {
    /// Driven by seek steering toward an input point (ship, shield)
    Steered,
    Linear(LinearPath),
    Curve(CurvePath),
}

impl Motion {
    /// Fraction of the path covered, `None` for steered entities
    pub fn progress(&self) -> Option<f32> {
        match self {
            Motion::Steered => None,
            Motion::Linear(p) => Some(progress(p.elapsed, p.duration)),
            Motion::Curve(p) => Some(progress(p.elapsed, p.duration)),
        }
    }

    pub fn is_complete(&self) -> bool {
        match self {
            Motion::Steered => false,
            Motion::Linear(p) => p.elapsed >= p.duration,
            Motion::Curve(p) => p.elapsed >= p.duration,
        }
    }
}

#[inline]
fn progress(elapsed: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        1.0
    } else {
        (elapsed / duration).clamp(0.0, 1.0)
    }
}

/// Advance one entity along its path. Returns true when the path is finished.
pub fn advance_entity(entity: &mut Entity, curve: &BezierPath, dt: f32) -> bool {
    match &mut entity.motion {
        Motion::Steered => return false,
        Motion::Linear(path) => {
            path.elapsed += dt;
            entity.pos = path.position();
        }
        Motion::Curve(path) => {
            path.elapsed += dt;
            entity.pos = path.position(curve);
            if entity.look.orient_to_path {
                entity.look.rotation = curve.heading_at(progress(path.elapsed, path.duration));
            }
        }
    }

    entity.look.rotation += entity.look.spin * dt;
    if entity.look.fade_out {
        let t = entity.motion.progress().unwrap_or(0.0);
        entity.look.opacity = 1.0 - t;
        entity.look.scale = 1.0 - 0.5 * t;
    }

    entity.motion.is_complete()
}

/// Advance every path-following entity and remove the finished ones
pub fn advance_all(registry: &mut Registry, curve: &BezierPath, dt: f32) -> Vec<EntityId> {
    let finished: Vec<EntityId> = registry
        .iter_mut()
        .filter_map(|entity| advance_entity(entity, curve, dt).then_some(entity.id))
        .collect();

    for &id in &finished {
        registry.remove(id);
    }
    finished
}
