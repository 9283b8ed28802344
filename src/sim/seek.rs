//! Seek motion for the player-steered entities (ship and shield)

use glam::Vec2;

use crate::bearing;
use crate::consts::SEEK_DEAD_ZONE;

/// Move `pos` toward `target` at `speed` for `dt` seconds.
///
/// Inside the dead zone the position is returned unchanged, which keeps the
/// ship from jittering around a finger that is resting on the screen. The step
/// never carries past the target.
pub fn seek_toward(pos: Vec2, target: Vec2, speed: f32, dt: f32) -> Vec2 {
    let distance = pos.distance(target);
    if distance <= SEEK_DEAD_ZONE {
        return pos;
    }

    let step = (speed * dt.max(0.0)).min(distance);
    if step >= distance {
        return target;
    }
    let angle = bearing(pos, target);
    pos + Vec2::new(angle.cos(), angle.sin()) * step
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SHIP_SPEED;
    use proptest::prelude::*;

    #[test]
    fn test_moves_full_step() {
        let next = seek_toward(Vec2::ZERO, Vec2::new(100.0, 0.0), SHIP_SPEED, 0.1);
        assert!((next.x - 30.0).abs() < 1e-4);
        assert!(next.y.abs() < 1e-4);
    }

    #[test]
    fn test_dead_zone() {
        let pos = Vec2::new(10.0, 10.0);
        let target = Vec2::new(13.0, 10.0);
        assert_eq!(seek_toward(pos, target, SHIP_SPEED, 1.0), pos);

        let exactly_four = Vec2::new(14.0, 10.0);
        assert_eq!(seek_toward(pos, exactly_four, SHIP_SPEED, 1.0), pos);
    }

    #[test]
    fn test_no_overshoot() {
        let next = seek_toward(Vec2::ZERO, Vec2::new(0.0, 10.0), SHIP_SPEED, 1.0);
        assert_eq!(next, Vec2::new(0.0, 10.0));
    }

    #[test]
    fn test_zero_dt_is_stationary() {
        let pos = Vec2::new(50.0, 50.0);
        assert_eq!(seek_toward(pos, Vec2::ZERO, SHIP_SPEED, 0.0), pos);
    }

    proptest! {
        #[test]
        fn prop_distance_shrinks_by_min_of_step_and_distance(
            px in -500.0f32..500.0,
            py in -500.0f32..500.0,
            tx in -500.0f32..500.0,
            ty in -500.0f32..500.0,
            dt in 0.0f32..0.1,
        ) {
            let pos = Vec2::new(px, py);
            let target = Vec2::new(tx, ty);
            let before = pos.distance(target);
            let after = seek_toward(pos, target, SHIP_SPEED, dt).distance(target);

            if before <= SEEK_DEAD_ZONE {
                prop_assert_eq!(after, before);
            } else {
                let expected = before - before.min(SHIP_SPEED * dt);
                prop_assert!((after - expected).abs() < 1e-2, "before={before} after={after} expected={expected}");
            }
        }
    }
}
