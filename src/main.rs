//! Space Run headless demo
//!
//! Plays one run at 60 Hz with the autopilot holding the pointer and logs how
//! it went.
//!
//! Usage:
//!   cargo run --release -- --seed 7 --max-seconds 60
//!   RUST_LOG=debug cargo run -- -s 7

use clap::Parser;
use space_run::SimConfig;
use space_run::consts::FRAME_DT;
use space_run::sim::{GameEvent, PointerEvent, World, autopilot_target, step};

#[derive(Parser, Debug)]
#[command(name = "space-run")]
#[command(about = "Play one autopiloted Space Run and print a JSON summary")]
struct Args {
    /// RNG seed; drawn from the OS when omitted
    #[arg(short, long)]
    seed: Option<u64>,
    /// Stop after this many simulated seconds if the ship is still alive
    #[arg(short, long, default_value_t = 120)]
    max_seconds: u32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Args { seed, max_seconds } = Args::parse();

    let mut world = World::new(SimConfig {
        seed,
        ..SimConfig::default()
    })?;
    log::info!("Space Run demo starting (seed {})", world.seed());

    let mut shots = 0u32;
    let mut kills = 0u32;
    let mut pickups = 0u32;
    let frames = max_seconds.saturating_mul(60);
    for frame in 1..=frames {
        match autopilot_target(&world) {
            Some(target) => world.handle_pointer(PointerEvent::Pressed(target)),
            None => world.handle_pointer(PointerEvent::Released),
        }

        let outcome = step(&mut world, FRAME_DT);
        shots += u32::from(outcome.shot.is_some());
        kills += outcome.collisions.hostiles_destroyed;
        pickups += outcome.collisions.power_ups_collected + outcome.collisions.health_collected;

        for event in world.drain_events() {
            match event {
                GameEvent::HealthChanged(level) => log::debug!("health {level}"),
                GameEvent::GameOver { final_score } => {
                    log::info!("game over at frame {frame}, final score {final_score}")
                }
                _ => {}
            }
        }
        if frame % 300 == 0 {
            let snap = world.snapshot();
            log::info!(
                "t={:.0}s score={} health={} entities={} fire={:?}",
                snap.elapsed,
                snap.score,
                snap.health,
                snap.entities.len(),
                snap.fire_rate
            );
        }
        if world.state().is_game_over() {
            break;
        }
    }

    if let Err(err) = world.check_invariants() {
        log::error!("run ended in a bad state: {err}");
    }

    let state = world.state();
    let summary = serde_json::json!({
        "seed": world.seed(),
        "score": state.score,
        "elapsed": state.elapsed,
        "health": state.health,
        "game_over": state.is_game_over(),
        "shots": shots,
        "kills": kills,
        "pickups": pickups,
    });
    println!("{summary}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["space-run"]).unwrap();
        assert_eq!(args.seed, None);
        assert_eq!(args.max_seconds, 120);
    }

    #[test]
    fn test_args_named_values() {
        let args = Args::try_parse_from(["space-run", "--seed", "7", "-m", "60"]).unwrap();
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.max_seconds, 60);
    }

    #[test]
    fn test_bad_seed_names_the_argument() {
        let err = Args::try_parse_from(["space-run", "--seed", "notanumber"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        assert!(err.to_string().contains("--seed"));
    }
}
