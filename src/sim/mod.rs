//! Frame-stepped simulation
//!
//! All gameplay logic lives here. The module is deterministic for a given
//! seed and sequence of frame deltas:
//! - Seeded RNG only (gameplay and cosmetic streams kept apart)
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod curve;
pub mod events;
pub mod input;
pub mod path;
pub mod registry;
pub mod seek;
pub mod snapshot;
pub mod spawner;
pub mod starfield;
pub mod state;
pub mod tick;
pub mod timers;
pub mod world;

pub use collision::CollisionReport;
pub use events::{ExplosionKind, GameEvent, SoundKind};
pub use input::{Channel, InputState, PointerEvent};
pub use path::Motion;
pub use registry::{Entity, EntityId, EntityKind, Registry, Spawn};
pub use snapshot::{EntityView, FrameSnapshot};
pub use spawner::PlayField;
pub use state::{FireRateMode, GamePhase, GameState};
pub use tick::{FrameOutcome, autopilot_target, step, tick};
pub use world::{TimerKey, World};
