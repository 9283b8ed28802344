//! The simulation world: owner of every subsystem for one run

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::clock::Clock;
use super::curve::BezierPath;
use super::events::{ExplosionKind, GameEvent, SoundKind};
use super::input::{InputState, PointerEvent};
use super::path::Motion;
use super::registry::{Entity, EntityId, EntityKind, Registry, Spawn};
use super::spawner::PlayField;
use super::starfield::{STAR_LAUNCH_INTERVAL, Starfield};
use super::state::{FireRateMode, GameState};
use super::timers::Timers;
use crate::config::SimConfig;
use crate::consts::*;
use crate::error::{SimError, SimResult};

/// Stream offset so cosmetic draws never perturb gameplay randomness
const COSMETIC_STREAM: u64 = 0x9e37_79b9_7f4a_7c15;

/// Keys for the world's scheduled timers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKey {
    /// Ends the power-up window; the one canonical power-up timer
    FireRateReset,
    /// HUD countdown refresh while a power-up window is open
    PowerUpCountdown,
    /// HUD elapsed-time refresh
    ElapsedTick,
    /// Background star launch attempts
    StarLaunch,
}

pub struct World {
    pub(crate) config: SimConfig,
    pub(crate) field: PlayField,
    pub(crate) clock: Clock,
    pub(crate) registry: Registry,
    pub(crate) state: GameState,
    pub(crate) timers: Timers<TimerKey>,
    pub(crate) input: InputState,
    pub(crate) rng: Pcg32,
    pub(crate) cosmetic_rng: Pcg32,
    pub(crate) enemy_path: BezierPath,
    pub(crate) stars: Starfield,
    pub(crate) events: Vec<GameEvent>,
    seed: u64,
}

impl World {
    /// Validate the config and set up a fresh run: ship and shield at the field
    /// center, health at its starting level, HUD timers running.
    pub fn new(config: SimConfig) -> SimResult<Self> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        let field = PlayField::new(config.field_width, config.field_height);

        let mut world = Self {
            field,
            clock: Clock::new(config.max_frame_dt),
            registry: Registry::new(),
            state: GameState::new(),
            timers: Timers::new(),
            input: InputState::new(),
            rng: Pcg32::seed_from_u64(seed),
            cosmetic_rng: Pcg32::seed_from_u64(seed ^ COSMETIC_STREAM),
            enemy_path: BezierPath::enemy_dive(field.height),
            stars: Starfield::default(),
            events: Vec::new(),
            seed,
            config,
        };

        let center = field.center();
        world.registry.insert(
            Spawn::new(EntityKind::Ship, center, Vec2::splat(SHIP_SIZE), Motion::Steered),
            0.0,
        )?;
        world.registry.insert(
            Spawn::new(EntityKind::Shield, center, Vec2::splat(SHIELD_SIZE), Motion::Steered),
            0.0,
        )?;

        world
            .timers
            .arm_repeating(TimerKey::ElapsedTick, HUD_REFRESH_INTERVAL);
        if world.config.starfield {
            world
                .timers
                .arm_repeating(TimerKey::StarLaunch, STAR_LAUNCH_INTERVAL);
        }
        world.events.push(GameEvent::HealthChanged(world.state.health));

        log::info!(
            "new run: field {}x{}, seed {seed}",
            field.width,
            field.height
        );
        Ok(world)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn field(&self) -> PlayField {
        self.field
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn timers(&self) -> &Timers<TimerKey> {
        &self.timers
    }

    pub fn stars(&self) -> &Starfield {
        &self.stars
    }

    /// Simulated seconds since the run started
    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        self.input.apply(event);
    }

    pub fn entity(&self, id: EntityId) -> SimResult<&Entity> {
        self.registry.get(id)
    }

    /// Insert an entity from outside the spawner (scripted scenarios, tests)
    pub fn spawn(&mut self, spawn: Spawn) -> SimResult<EntityId> {
        self.registry.insert(spawn, self.clock.now())
    }

    /// Teleport an entity (scripted scenarios, tests)
    pub fn place(&mut self, id: EntityId, pos: Vec2) -> SimResult<()> {
        self.registry.get_mut(id)?.pos = pos;
        Ok(())
    }

    /// Seconds left in the power-up window
    pub fn power_up_remaining(&self) -> Option<f32> {
        self.timers.remaining(TimerKey::FireRateReset)
    }

    /// Notifications pushed since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Open (or restart) the power-up window. A re-collision always grants the
    /// full duration; the countdown reads the same timer, so the HUD and the
    /// fire rate can never disagree.
    pub(crate) fn start_power_up(&mut self) {
        self.state.boost_fire_rate();
        self.timers
            .arm_once(TimerKey::FireRateReset, POWER_UP_DURATION);
        self.timers
            .arm_repeating(TimerKey::PowerUpCountdown, HUD_REFRESH_INTERVAL);
        self.events
            .push(GameEvent::PowerUpTimerChanged(Some(POWER_UP_DURATION)));
        log::info!("power-up: fire rate boosted for {POWER_UP_DURATION}s");
    }

    /// Fatal hit: remove ship and shield, silence input, end the run
    pub(crate) fn destroy_ship(&mut self) {
        let ship_pos = self
            .registry
            .ship()
            .and_then(|id| self.registry.remove(id))
            .map(|ship| ship.pos);
        if let Some(shield) = self.registry.shield() {
            self.registry.remove(shield);
        }
        self.input.disconnect();

        self.events.push(GameEvent::PlaySound(SoundKind::ShipExplode));
        if let Some(at) = ship_pos {
            self.events.push(GameEvent::SpawnExplosion {
                kind: ExplosionKind::Ship,
                at,
                duration_hint: SHIP_EXPLOSION_DURATION,
            });
        }

        if self.timers.cancel(TimerKey::FireRateReset) {
            self.events.push(GameEvent::PowerUpTimerChanged(None));
        }
        self.timers.cancel(TimerKey::PowerUpCountdown);
        self.timers.cancel(TimerKey::ElapsedTick);
        // Last HUD time is the frozen one
        self.events
            .push(GameEvent::ElapsedTimeChanged(self.state.elapsed));
        self.state.end_game(&mut self.events);
    }

    /// Turn a fired timer into its state change
    pub(crate) fn apply_timer(&mut self, key: TimerKey) {
        match key {
            TimerKey::FireRateReset => {
                self.state.reset_fire_rate();
                self.timers.cancel(TimerKey::PowerUpCountdown);
                self.events.push(GameEvent::PowerUpTimerChanged(None));
                log::info!("power-up expired");
            }
            TimerKey::PowerUpCountdown => {
                // Fired in the same frame the window closed
                if !self.timers.is_armed(TimerKey::PowerUpCountdown) {
                    return;
                }
                self.events
                    .push(GameEvent::PowerUpTimerChanged(self.power_up_remaining()));
            }
            TimerKey::ElapsedTick => {
                if !self.state.is_game_over() {
                    self.events
                        .push(GameEvent::ElapsedTimeChanged(self.state.elapsed));
                }
            }
            TimerKey::StarLaunch => {
                self.stars.launch(&mut self.cosmetic_rng, self.field);
            }
        }
    }

    /// Check the model's invariants against the live state
    pub fn check_invariants(&self) -> SimResult<()> {
        self.registry.check_consistency()?;

        let violation = |reason: String| Err(SimError::InvariantViolation(reason));
        let state = &self.state;
        if state.health > HEALTH_MAX {
            return violation(format!("health {} above {HEALTH_MAX}", state.health));
        }

        let ship_alive = self.registry.ship().is_some();
        let shield_alive = self.registry.shield().is_some();
        if state.is_game_over() && (ship_alive || shield_alive) {
            return violation("ship or shield alive after game over".into());
        }
        if !state.is_game_over() && !ship_alive {
            return violation("running without a ship".into());
        }

        let window_open = self.timers.is_armed(TimerKey::FireRateReset);
        match state.fire_rate {
            FireRateMode::Boosted if !window_open => {
                violation("boosted fire rate without a power-up timer".into())
            }
            FireRateMode::Normal if window_open => {
                violation("power-up timer pending at normal fire rate".into())
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_world_setup() {
        let world = World::new(SimConfig::default().seeded(1)).unwrap();
        let ship = world.registry().ship().unwrap();
        let shield = world.registry().shield().unwrap();
        let center = world.field().center();
        assert_eq!(world.entity(ship).unwrap().pos, center);
        assert_eq!(world.entity(shield).unwrap().size, Vec2::splat(SHIELD_SIZE));
        assert_eq!(world.state().health, HEALTH_START);
        assert!(world.check_invariants().is_ok());
        assert_eq!(world.seed(), 1);
    }

    #[test]
    fn test_invalid_field_is_rejected() {
        let err = World::new(SimConfig::with_field(-5.0, 100.0)).err();
        assert!(matches!(err, Some(SimError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_power_up_window_restart() {
        let mut world = World::new(SimConfig::default().seeded(2)).unwrap();
        world.start_power_up();
        for key in world.timers.advance(3.0) {
            world.apply_timer(key);
        }
        assert!((world.power_up_remaining().unwrap() - 2.0).abs() < 1e-4);

        world.start_power_up();
        assert_eq!(world.power_up_remaining(), Some(POWER_UP_DURATION));
        assert!(world.check_invariants().is_ok());
    }

    #[test]
    fn test_destroy_ship_ends_run() {
        let mut world = World::new(SimConfig::default().seeded(3)).unwrap();
        world.handle_pointer(PointerEvent::Pressed(Vec2::new(10.0, 10.0)));
        world.start_power_up();
        world.state.accrue(2.5);
        world.destroy_ship();

        assert!(world.state().is_game_over());
        assert!(world.registry().ship().is_none());
        assert!(world.registry().shield().is_none());
        assert!(world.input().is_inert());
        assert!(world.check_invariants().is_ok());

        let events = world.drain_events();
        assert!(events.contains(&GameEvent::PlaySound(SoundKind::ShipExplode)));
        assert!(events.contains(&GameEvent::PowerUpTimerChanged(None)));
        let last_time = events.iter().rev().find_map(|e| match e {
            GameEvent::ElapsedTimeChanged(t) => Some(*t),
            _ => None,
        });
        assert_eq!(last_time, Some(world.state().elapsed));
        assert_eq!(events.last(), Some(&GameEvent::GameOver { final_score: 0 }));
    }
}
