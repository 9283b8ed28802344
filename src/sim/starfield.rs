//! Background star streaks (cosmetic, never collide)

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use super::path::LinearPath;
use super::spawner::PlayField;

/// Seconds between launch attempts
pub const STAR_LAUNCH_INTERVAL: f32 = 0.01;
/// Chance that an attempt launches a star
const STAR_LAUNCH_CHANCE: f64 = 0.6;
const STAR_SIZE: Vec2 = Vec2::new(2.0, 10.0);

#[derive(Debug, Clone, Serialize)]
pub struct Star {
    pub pos: Vec2,
    pub size: Vec2,
    pub opacity: f32,
    #[serde(skip)]
    path: LinearPath,
}

#[derive(Debug, Clone, Default)]
pub struct Starfield {
    stars: Vec<Star>,
}

impl Starfield {
    /// One launch attempt; faster stars read as closer (parallax)
    pub fn launch<R: Rng>(&mut self, rng: &mut R, field: PlayField) -> bool {
        if !rng.random_bool(STAR_LAUNCH_CHANCE) {
            return false;
        }
        let x = if field.width > 0.0 {
            rng.random_range(0.0..field.width)
        } else {
            0.0
        };
        let start = Vec2::new(x, field.height);
        let end = start - Vec2::new(0.0, field.height + STAR_SIZE.y);
        let opacity = 0.1 + rng.random_range(0..10u32) as f32 / 10.0;
        let duration = 0.1 + rng.random_range(0..10u32) as f32 / 10.0;
        self.stars.push(Star {
            pos: start,
            size: STAR_SIZE,
            opacity,
            path: LinearPath::new(start, end, duration),
        });
        true
    }

    pub fn advance(&mut self, dt: f32) {
        for star in &mut self.stars {
            star.path.elapsed += dt;
            star.pos = star.path.position();
        }
        self.stars.retain(|s| s.path.elapsed < s.path.duration);
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_stars_fall_and_expire() {
        let mut rng = Pcg32::seed_from_u64(9);
        let field = PlayField::new(300.0, 500.0);
        let mut stars = Starfield::default();
        let launched = (0..1000).filter(|_| stars.launch(&mut rng, field)).count();
        assert_eq!(stars.len(), launched);
        assert!((500..700).contains(&launched), "launched {launched}");

        for star in stars.stars() {
            assert!((0.1..=1.0).contains(&star.opacity));
            assert_eq!(star.pos.y, 500.0);
        }

        stars.advance(0.05);
        assert!(stars.stars().iter().all(|s| s.pos.y < 500.0));

        // Slowest star takes 1.0s
        stars.advance(1.0);
        assert!(stars.is_empty());
    }
}
