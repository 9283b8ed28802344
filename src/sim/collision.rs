//! Collision resolution
//!
//! Pairwise rectangle-overlap checks between entity groups, evaluated in a
//! fixed order. Every removal takes effect immediately, so later checks in the
//! same pass never see an entity that an earlier check consumed:
//!
//! 1. ship × weapon power-ups
//! 2. ship × health pickups
//! 3. ship × hostiles (asteroids and enemy ships), each followed by
//!    projectiles × that hostile, where the first overlapping projectile wins

use super::events::{ExplosionKind, GameEvent, SoundKind};
use super::registry::{EntityId, EntityKind};
use super::state::HullDamage;
use super::world::World;
use crate::Rect;
use crate::consts::*;

/// What one pass did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub power_ups_collected: u32,
    pub health_collected: u32,
    pub ship_hits: u32,
    pub hostiles_destroyed: u32,
    pub ship_destroyed: bool,
}

/// Run one collision pass. Does nothing once the game is over.
pub fn resolve(world: &mut World) -> CollisionReport {
    let mut report = CollisionReport::default();
    if world.state.is_game_over() {
        return report;
    }

    collect_power_ups(world, &mut report);
    collect_health(world, &mut report);
    strike_hostiles(world, &mut report);

    if report != CollisionReport::default() {
        log::debug!("collisions: {report:?}");
    }
    report
}

fn ship_rect(world: &World) -> Option<Rect> {
    let id = world.registry.ship()?;
    world.registry.get(id).ok().map(|ship| ship.rect())
}

/// Live rectangle of `id`, `None` if an earlier check removed it
fn rect_of(world: &World, id: EntityId) -> Option<Rect> {
    world.registry.get(id).ok().map(|e| e.rect())
}

fn collect_power_ups(world: &mut World, report: &mut CollisionReport) {
    for id in world.registry.ids(EntityKind::WeaponPowerUp) {
        let Some(ship) = ship_rect(world) else { return };
        let Some(power_up) = rect_of(world, id) else { continue };
        if ship.intersects(&power_up) {
            world.registry.remove(id);
            world.start_power_up();
            report.power_ups_collected += 1;
        }
    }
}

fn collect_health(world: &mut World, report: &mut CollisionReport) {
    for id in world.registry.ids(EntityKind::HealthPickup) {
        let Some(ship) = ship_rect(world) else { return };
        let Some(pickup) = rect_of(world, id) else { continue };
        if ship.intersects(&pickup) {
            world.registry.remove(id);
            world.state.restore_health(&mut world.events);
            report.health_collected += 1;
        }
    }
}

/// Hostiles in spawn order, asteroids and enemy ships interleaved
fn hostile_ids(world: &World) -> Vec<EntityId> {
    let mut ids = world.registry.ids(EntityKind::Obstacle);
    ids.extend(world.registry.ids(EntityKind::EnemyShip));
    ids.sort_unstable();
    ids
}

fn strike_hostiles(world: &mut World, report: &mut CollisionReport) {
    for id in hostile_ids(world) {
        let Some(hostile) = rect_of(world, id) else { continue };

        if let Some(ship) = ship_rect(world) {
            if ship.intersects(&hostile) {
                world.registry.remove(id);
                report.ship_hits += 1;
                if world.state.take_hit(&mut world.events) == HullDamage::Destroyed {
                    world.destroy_ship();
                    report.ship_destroyed = true;
                    return;
                }
                // The hostile is gone; no projectile can claim it
                continue;
            }
        }

        let shooter = world
            .registry
            .iter_kind(EntityKind::Projectile)
            .find(|p| p.rect().intersects(&hostile))
            .map(|p| p.id);
        if let Some(projectile) = shooter {
            world.registry.remove(projectile);
            world.registry.remove(id);
            world
                .events
                .push(GameEvent::PlaySound(SoundKind::ObstacleExplode));
            world.events.push(GameEvent::SpawnExplosion {
                kind: ExplosionKind::Obstacle,
                at: hostile.center,
                duration_hint: OBSTACLE_EXPLOSION_DURATION,
            });
            world.state.add_points(OBSTACLE_POINTS, &mut world.events);
            report.hostiles_destroyed += 1;
        }
    }
}
