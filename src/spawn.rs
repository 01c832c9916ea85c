use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::car_model::{Vec2, Viewport};

// ---------------------------------------------
// SPAWN RESULT
// ---------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPoint {
    pub position: Vec2, // world units
    pub heading: f64,   // rad
}

// ---------------------------------------------
// SPAWN MANAGER
// ---------------------------------------------
// First car goes to the viewport centre. Later cars are scattered around it
// so they do not sit on top of each other. Purely cosmetic: the RNG never
// reaches the integrator.
#[derive(Debug)]
pub struct SpawnManager {
    rng: StdRng,
    spawned: usize,
    pub scatter_radius: f64, // world units
}

impl SpawnManager {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            spawned: 0,
            scatter_radius: 10.0,
        }
    }

    pub fn allocate_spawn(&mut self, viewport: &Viewport) -> SpawnPoint {
        let centre = viewport.center();
        self.spawned += 1;

        if self.spawned == 1 {
            return SpawnPoint {
                position: centre,
                heading: 0.0,
            };
        }

        // keep the scatter inside the play area
        let radius = self
            .scatter_radius
            .min(viewport.width / 2.0)
            .min(viewport.height / 2.0);

        let angle = self.rng.gen_range(0.0..std::f64::consts::TAU);
        let dist = radius * self.rng.gen_range(0.0..=1.0f64).sqrt();

        SpawnPoint {
            position: centre + Vec2::new(angle.cos(), angle.sin()) * dist,
            heading: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_spawn_is_viewport_centre() {
        let vp = Viewport::from_canvas(1280.0, 720.0, 10.0);
        let mut spawns = SpawnManager::new(Some(7));
        let first = spawns.allocate_spawn(&vp);
        assert_eq!(first.position, Vec2::new(64.0, -36.0));
        assert_eq!(first.heading, 0.0);
    }

    #[test]
    fn later_spawns_stay_near_centre_and_inside_viewport() {
        let vp = Viewport::new(40.0, 12.0);
        let mut spawns = SpawnManager::new(Some(42));
        spawns.allocate_spawn(&vp);

        for _ in 0..100 {
            let p = spawns.allocate_spawn(&vp).position;
            assert!((p - vp.center()).magnitude() <= 6.0 + 1e-9);
            assert!(p.x >= 0.0 && p.x <= vp.width);
            assert!(p.y >= -vp.height && p.y <= 0.0);
        }
    }

    #[test]
    fn seeded_spawns_are_reproducible() {
        let vp = Viewport::new(100.0, 100.0);
        let mut a = SpawnManager::new(Some(3));
        let mut b = SpawnManager::new(Some(3));
        for _ in 0..5 {
            assert_eq!(a.allocate_spawn(&vp), b.allocate_spawn(&vp));
        }
    }
}
