use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::*;

/// Pick a grid-snapped point inside `bounds`, inset by half the spawn margin.
///
/// The inset range is snapped inward before sampling, so the result always
/// lands on a multiple of `GRID_SIZE` without leaving the inset box.
pub fn random_position<R: Rng + ?Sized>(rng: &mut R, bounds: &Bounds) -> (f64, f64) {
    let inset = SPAWN_MARGIN / 2.0;
    let x = grid_coordinate(rng, bounds.min_x + inset, bounds.max_x - inset);
    let y = grid_coordinate(rng, bounds.min_y + inset, bounds.max_y - inset);
    (x, y)
}

fn grid_coordinate<R: Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    let first = (lo / GRID_SIZE).ceil() as i64;
    let last = (hi / GRID_SIZE).floor() as i64;
    if first > last {
        // No grid line fits in the inset range; fall back to the middle.
        return ((lo + hi) / 2.0 / GRID_SIZE).floor() * GRID_SIZE;
    }
    rng.gen_range(first..=last) as f64 * GRID_SIZE
}

/// Owns the randomness used for every spawn in a world.
#[derive(Debug)]
pub struct Spawner {
    rng: StdRng,
}

impl Spawner {
    pub fn from_entropy() -> Self {
        Spawner {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Spawner {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn position(&mut self, bounds: &Bounds) -> (f64, f64) {
        random_position(&mut self.rng, bounds)
    }
}
