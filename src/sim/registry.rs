//! Entity registry
//!
//! Arena of live entities keyed by a stable, never-reused [`EntityId`], with a
//! per-kind index so systems can walk one group without scanning everything.
//! Removal is immediate: a later check in the same frame sees the entity gone.

use std::collections::BTreeMap;
use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::path::Motion;
use crate::Rect;
use crate::error::{SimError, SimResult};

/// Stable entity handle, allocated monotonically
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What an entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Ship,
    Shield,
    /// Photon torpedo fired by the ship
    Projectile,
    /// Asteroid
    Obstacle,
    EnemyShip,
    WeaponPowerUp,
    HealthPickup,
}

impl EntityKind {
    pub const COUNT: usize = 7;

    pub const ALL: [EntityKind; Self::COUNT] = [
        EntityKind::Ship,
        EntityKind::Shield,
        EntityKind::Projectile,
        EntityKind::Obstacle,
        EntityKind::EnemyShip,
        EntityKind::WeaponPowerUp,
        EntityKind::HealthPickup,
    ];

    #[inline]
    fn index(self) -> usize {
        match self {
            EntityKind::Ship => 0,
            EntityKind::Shield => 1,
            EntityKind::Projectile => 2,
            EntityKind::Obstacle => 3,
            EntityKind::EnemyShip => 4,
            EntityKind::WeaponPowerUp => 5,
            EntityKind::HealthPickup => 6,
        }
    }

    /// Damages the ship on contact and can be shot down
    pub fn is_hostile(self) -> bool {
        matches!(self, EntityKind::Obstacle | EntityKind::EnemyShip)
    }

    /// Only one instance may exist at a time
    fn is_singleton(self) -> bool {
        matches!(self, EntityKind::Ship | EntityKind::Shield)
    }
}

/// Cosmetic state the renderer may use; never affects collisions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Appearance {
    /// Radians
    pub rotation: f32,
    /// Radians per second of continuous spin
    pub spin: f32,
    pub opacity: f32,
    pub scale: f32,
    /// Shrink to half size and fade out over the entity's path
    pub fade_out: bool,
    /// Rotate to face along the path tangent
    pub orient_to_path: bool,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            rotation: 0.0,
            spin: 0.0,
            opacity: 1.0,
            scale: 1.0,
            fade_out: false,
            orient_to_path: false,
        }
    }
}

impl Appearance {
    pub fn spinning(spin: f32) -> Self {
        Self {
            spin,
            ..Self::default()
        }
    }
}

/// A live simulation entity
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    /// Center of the entity's rectangle
    pub pos: Vec2,
    pub size: Vec2,
    pub motion: Motion,
    /// Simulated time at creation
    pub created_at: f64,
    pub look: Appearance,
}

impl Entity {
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// Everything needed to create an entity except its id
#[derive(Debug, Clone)]
pub struct Spawn {
    pub kind: EntityKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub motion: Motion,
    pub look: Appearance,
}

impl Spawn {
    pub fn new(kind: EntityKind, pos: Vec2, size: Vec2, motion: Motion) -> Self {
        Self {
            kind,
            pos,
            size,
            motion,
            look: Appearance::default(),
        }
    }

    pub fn with_look(mut self, look: Appearance) -> Self {
        self.look = look;
        self
    }
}

/// Owner of all live entities
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entities: BTreeMap<EntityId, Entity>,
    /// Ids per kind, ascending (ids are allocated in increasing order)
    groups: [Vec<EntityId>; EntityKind::COUNT],
    next_id: u32,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Self::default()
        }
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id.max(1));
        self.next_id = id.0 + 1;
        id
    }

    /// Insert a new entity. A second Ship or Shield is refused.
    pub fn insert(&mut self, spawn: Spawn, created_at: f64) -> SimResult<EntityId> {
        if spawn.kind.is_singleton() && self.count(spawn.kind) > 0 {
            return Err(SimError::InvariantViolation(format!(
                "a {:?} already exists",
                spawn.kind
            )));
        }

        let id = self.allocate_id();
        self.groups[spawn.kind.index()].push(id);
        self.entities.insert(
            id,
            Entity {
                id,
                kind: spawn.kind,
                pos: spawn.pos,
                size: spawn.size,
                motion: spawn.motion,
                created_at,
                look: spawn.look,
            },
        );
        log::debug!("spawned {:?} {} at {:?}", spawn.kind, id, spawn.pos);
        Ok(id)
    }

    /// Remove an entity immediately; `None` if it was already gone
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let entity = self.entities.remove(&id)?;
        let group = &mut self.groups[entity.kind.index()];
        if let Ok(slot) = group.binary_search(&id) {
            group.remove(slot);
        }
        log::debug!("removed {:?} {}", entity.kind, id);
        Some(entity)
    }

    #[inline]
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn get(&self, id: EntityId) -> SimResult<&Entity> {
        self.entities.get(&id).ok_or(SimError::EntityNotFound(id))
    }

    pub fn get_mut(&mut self, id: EntityId) -> SimResult<&mut Entity> {
        self.entities.get_mut(&id).ok_or(SimError::EntityNotFound(id))
    }

    /// Copy of one group's ids, safe to hold while the registry is mutated
    pub fn ids(&self, kind: EntityKind) -> Vec<EntityId> {
        self.groups[kind.index()].clone()
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.groups[kind.index()].len()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// All entities in id order
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.values_mut()
    }

    pub fn iter_kind(&self, kind: EntityKind) -> impl Iterator<Item = &Entity> {
        self.groups[kind.index()]
            .iter()
            .filter_map(|id| self.entities.get(id))
    }

    /// The single live entity of a singleton kind
    fn singleton(&self, kind: EntityKind) -> Option<EntityId> {
        self.groups[kind.index()].first().copied()
    }

    pub fn ship(&self) -> Option<EntityId> {
        self.singleton(EntityKind::Ship)
    }

    pub fn shield(&self) -> Option<EntityId> {
        self.singleton(EntityKind::Shield)
    }

    /// Internal consistency of the kind index against the arena
    pub(crate) fn check_consistency(&self) -> SimResult<()> {
        let indexed: usize = self.groups.iter().map(Vec::len).sum();
        if indexed != self.entities.len() {
            return Err(SimError::InvariantViolation(format!(
                "kind index holds {indexed} ids for {} entities",
                self.entities.len()
            )));
        }
        for kind in EntityKind::ALL {
            for id in &self.groups[kind.index()] {
                match self.entities.get(id) {
                    Some(entity) if entity.kind == kind => {}
                    _ => {
                        return Err(SimError::InvariantViolation(format!(
                            "{id} indexed as {kind:?} but not live as one"
                        )));
                    }
                }
            }
            if kind.is_singleton() && self.count(kind) > 1 {
                return Err(SimError::InvariantViolation(format!(
                    "{} {kind:?} entities live",
                    self.count(kind)
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obstacle(x: f32) -> Spawn {
        Spawn::new(
            EntityKind::Obstacle,
            Vec2::new(x, 0.0),
            Vec2::splat(20.0),
            Motion::Steered,
        )
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut registry = Registry::new();
        let a = registry.insert(obstacle(0.0), 0.0).unwrap();
        registry.remove(a);
        let b = registry.insert(obstacle(0.0), 0.0).unwrap();
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn test_groups_track_kind() {
        let mut registry = Registry::new();
        let a = registry.insert(obstacle(0.0), 0.0).unwrap();
        let b = registry.insert(obstacle(10.0), 0.0).unwrap();
        let ship = registry
            .insert(
                Spawn::new(EntityKind::Ship, Vec2::ZERO, Vec2::splat(40.0), Motion::Steered),
                0.0,
            )
            .unwrap();

        assert_eq!(registry.ids(EntityKind::Obstacle), vec![a, b]);
        assert_eq!(registry.ship(), Some(ship));
        assert_eq!(registry.len(), 3);

        registry.remove(a);
        assert_eq!(registry.ids(EntityKind::Obstacle), vec![b]);
        assert!(!registry.contains(a));
        assert!(registry.check_consistency().is_ok());
    }

    #[test]
    fn test_double_remove_is_harmless() {
        let mut registry = Registry::new();
        let a = registry.insert(obstacle(0.0), 0.0).unwrap();
        assert!(registry.remove(a).is_some());
        assert!(registry.remove(a).is_none());
        assert_eq!(registry.get(a).unwrap_err(), SimError::EntityNotFound(a));
    }

    #[test]
    fn test_duplicate_ship_refused() {
        let mut registry = Registry::new();
        let ship = || Spawn::new(EntityKind::Ship, Vec2::ZERO, Vec2::splat(40.0), Motion::Steered);
        registry.insert(ship(), 0.0).unwrap();
        let err = registry.insert(ship(), 0.0).unwrap_err();
        assert!(matches!(err, SimError::InvariantViolation(_)));
        assert_eq!(registry.count(EntityKind::Ship), 1);
    }

    #[test]
    fn test_hostile_kinds() {
        assert!(EntityKind::Obstacle.is_hostile());
        assert!(EntityKind::EnemyShip.is_hostile());
        assert!(!EntityKind::WeaponPowerUp.is_hostile());
        assert!(!EntityKind::Projectile.is_hostile());
    }
}
