//! Read-only view of a frame for renderers and HUDs

use glam::Vec2;
use serde::Serialize;

use super::registry::{EntityId, EntityKind};
use super::starfield::Star;
use super::state::{FireRateMode, GamePhase};
use super::world::World;
use crate::consts::HEALTH_MAX;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityView {
    pub id: EntityId,
    pub kind: EntityKind,
    pub position: Vec2,
    pub size: Vec2,
    pub rotation: f32,
    pub opacity: f32,
    pub scale: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    /// Simulated seconds since the run started
    pub time: f64,
    pub score: u64,
    pub elapsed: f64,
    pub health: u8,
    pub fire_rate: FireRateMode,
    pub phase: GamePhase,
    pub power_up_remaining: Option<f32>,
    /// Entities in id order
    pub entities: Vec<EntityView>,
    pub stars: Vec<Star>,
}

impl World {
    pub fn snapshot(&self) -> FrameSnapshot {
        let health = self.state.health;
        let entities = self
            .registry
            .iter()
            .map(|e| EntityView {
                id: e.id,
                kind: e.kind,
                position: e.pos,
                size: e.size,
                rotation: e.look.rotation,
                // Shield strength reads as its opacity
                opacity: if e.kind == EntityKind::Shield {
                    f32::from(health) / f32::from(HEALTH_MAX)
                } else {
                    e.look.opacity
                },
                scale: e.look.scale,
            })
            .collect();

        FrameSnapshot {
            time: self.now(),
            score: self.state.score,
            elapsed: self.state.elapsed,
            health,
            fire_rate: self.state.fire_rate,
            phase: self.state.phase,
            power_up_remaining: self.power_up_remaining(),
            entities,
            stars: self.stars.stars().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::consts::FRAME_DT;
    use crate::sim::tick::step;

    #[test]
    fn test_snapshot_reflects_world() {
        let mut world = World::new(SimConfig::default().seeded(21)).unwrap();
        for _ in 0..30 {
            step(&mut world, FRAME_DT);
        }
        let snap = world.snapshot();
        assert_eq!(snap.health, 2);
        assert_eq!(snap.phase, GamePhase::Running);
        assert_eq!(snap.entities.len(), world.registry().len());
        assert!(snap.entities.windows(2).all(|w| w[0].id < w[1].id));

        let shield = snap
            .entities
            .iter()
            .find(|e| e.kind == EntityKind::Shield)
            .unwrap();
        assert_eq!(shield.opacity, 0.5);
        assert!(!snap.stars.is_empty());
    }

    #[test]
    fn test_snapshot_serializes() {
        let world = World::new(SimConfig::default().seeded(22)).unwrap();
        let json = serde_json::to_value(world.snapshot()).unwrap();
        assert_eq!(json["score"], 0);
        assert_eq!(json["phase"], "Running");
        assert_eq!(json["entities"][0]["kind"], "Ship");
        assert_eq!(json["power_up_remaining"], serde_json::Value::Null);
    }
}
