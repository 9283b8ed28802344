//! Per-frame update loop
//!
//! One call advances the whole world by a single host frame:
//! timers → seek (ship, shield) → shoot → spawn → path motion → collisions.

use glam::Vec2;

use super::collision::{self, CollisionReport};
use super::events::{GameEvent, SoundKind};
use super::path::{self, LinearPath, Motion};
use super::registry::{EntityId, EntityKind, Spawn};
use super::seek::seek_toward;
use super::spawner;
use super::world::World;
use crate::consts::*;

/// What happened during one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutcome {
    /// Clamped delta the frame ran with
    pub dt: f32,
    pub shot: Option<EntityId>,
    pub spawned: Option<EntityId>,
    /// Entities removed because their path finished
    pub expired: Vec<EntityId>,
    pub collisions: CollisionReport,
}

/// Advance from a host timestamp in seconds. The first call runs a zero-length frame.
pub fn tick(world: &mut World, timestamp: f64) -> FrameOutcome {
    let dt = world.clock.tick(timestamp);
    run_frame(world, dt)
}

/// Advance by an explicit delta (fixed-step hosts, tests)
pub fn step(world: &mut World, dt: f32) -> FrameOutcome {
    let dt = world.clock.advance(dt);
    run_frame(world, dt)
}

fn run_frame(world: &mut World, dt: f32) -> FrameOutcome {
    // Play time first so the HUD tick reports this frame's value
    world.state.accrue(dt);
    // Timer intents land before anything reads the state they change
    for key in world.timers.advance(dt) {
        world.apply_timer(key);
    }

    steer(world, dt);
    let shot = shoot(world);

    let spawned = if world.state.is_game_over() {
        None
    } else {
        let now = world.clock.now();
        match spawner::maybe_spawn(&mut world.rng, &mut world.registry, world.field, now) {
            Ok(spawned) => spawned,
            Err(err) => {
                log::warn!("spawn refused: {err}");
                None
            }
        }
    };

    let expired = path::advance_all(&mut world.registry, &world.enemy_path, dt);
    if !expired.is_empty() {
        log::trace!("{} entities left the field", expired.len());
    }
    world.stars.advance(dt);

    let collisions = collision::resolve(world);

    FrameOutcome {
        dt,
        shot,
        spawned,
        expired,
        collisions,
    }
}

/// Ship follows the primary point, shield the secondary
fn steer(world: &mut World, dt: f32) {
    let pairs = [
        (world.registry.ship(), world.input.primary),
        (world.registry.shield(), world.input.secondary),
    ];
    for (id, target) in pairs {
        let (Some(id), Some(target)) = (id, target) else {
            continue;
        };
        if let Ok(entity) = world.registry.get_mut(id) {
            entity.pos = seek_toward(entity.pos, target, SHIP_SPEED, dt);
        }
    }
}

/// Fire a torpedo straight up while the primary pointer is held
fn shoot(world: &mut World) -> Option<EntityId> {
    world.input.primary?;
    let now = world.clock.now();
    if !world.state.ready_to_fire(now) {
        return None;
    }

    let from = match world.registry.ship().map(|id| world.registry.get(id)) {
        Some(Ok(ship)) => ship.pos,
        Some(Err(err)) => {
            log::trace!("shot skipped: {err}");
            return None;
        }
        None => {
            log::trace!("shot skipped: no ship");
            return None;
        }
    };
    let to = from + Vec2::new(0.0, world.field.height + PROJECTILE_HEIGHT);
    let torpedo = Spawn::new(
        EntityKind::Projectile,
        from,
        Vec2::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT),
        Motion::Linear(LinearPath::new(from, to, PROJECTILE_FLIGHT_TIME)),
    );

    match world.registry.insert(torpedo, now) {
        Ok(id) => {
            world.state.last_shot_at = Some(now);
            world.events.push(GameEvent::PlaySound(SoundKind::Shoot));
            Some(id)
        }
        Err(err) => {
            log::warn!("shot refused: {err}");
            None
        }
    }
}

/// Demo-mode pointer: park low in the field under the nearest descending
/// hostile, and go for pickups while nothing threatening is close.
pub fn autopilot_target(world: &World) -> Option<Vec2> {
    let ship = world
        .registry
        .ship()
        .and_then(|id| world.registry.get(id).ok())?;
    let field = world.field;
    let lane = field.height * 0.2;
    let in_x = |x: f32| x.clamp(0.0, field.width);

    let threat = world
        .registry
        .iter()
        .filter(|e| e.kind.is_hostile() && e.pos.y > ship.pos.y)
        .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y));
    let threatened = threat.is_some_and(|t| t.pos.y < field.height * 0.6);

    if !threatened {
        let pickup = world
            .registry
            .iter()
            .filter(|e| {
                matches!(e.kind, EntityKind::WeaponPowerUp | EntityKind::HealthPickup)
                    && e.pos.y > lane
                    && e.pos.y < field.height
            })
            .min_by(|a, b| {
                a.pos
                    .distance_squared(ship.pos)
                    .total_cmp(&b.pos.distance_squared(ship.pos))
            });
        if let Some(pickup) = pickup {
            return Some(Vec2::new(in_x(pickup.pos.x), lane));
        }
    }

    let x = threat.map_or(ship.pos.x, |t| t.pos.x);
    Some(Vec2::new(in_x(x), lane))
}
