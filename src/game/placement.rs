//! Random placement of food and obstacles on free cells
//!
//! Sampling is uniform over the whole grid with rejection of excluded cells.
//! Every loop here is bounded; callers decide what a `None` means.

use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

use super::state::Position;

/// Source of random free positions
pub struct Placer {
    rng: StdRng,
}

impl Placer {
    /// Create a placer seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a placer with a fixed seed, for reproducible games and tests
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn random_position(&mut self, width: usize, height: usize) -> Position {
        let x = self.rng.gen_range(0..width) as i32;
        let y = self.rng.gen_range(0..height) as i32;
        Position::new(x, y)
    }

    /// Sample up to `max_attempts` cells, returning the first not in `exclude`
    pub fn random_free_position(
        &mut self,
        width: usize,
        height: usize,
        exclude: &HashSet<Position>,
        max_attempts: usize,
    ) -> Option<Position> {
        (0..max_attempts)
            .map(|_| self.random_position(width, height))
            .find(|pos| !exclude.contains(pos))
    }

    /// Place up to `count` obstacles, none in `exclude` and none overlapping
    ///
    /// An obstacle whose attempts run out is skipped, so a crowded board
    /// yields fewer obstacles than requested.
    pub fn generate_obstacles(
        &mut self,
        width: usize,
        height: usize,
        count: usize,
        exclude: &HashSet<Position>,
        max_attempts: usize,
    ) -> HashSet<Position> {
        let mut taken = exclude.clone();
        let mut obstacles = HashSet::with_capacity(count);

        for _ in 0..count {
            if let Some(pos) = self.random_free_position(width, height, &taken, max_attempts) {
                taken.insert(pos);
                obstacles.insert(pos);
            }
        }

        if obstacles.len() < count {
            log::warn!(
                "placed {} of {} obstacles; board too crowded",
                obstacles.len(),
                count
            );
        }

        obstacles
    }

    /// Pick a cell for food that is not in `exclude`
    ///
    /// Tries rejection sampling first, then falls back to choosing uniformly
    /// among the remaining free cells. `None` means the board is full.
    pub fn spawn_food(
        &mut self,
        width: usize,
        height: usize,
        exclude: &HashSet<Position>,
        max_attempts: usize,
    ) -> Option<Position> {
        if let Some(pos) = self.random_free_position(width, height, exclude, max_attempts) {
            return Some(pos);
        }

        (0..height as i32)
            .flat_map(|y| (0..width as i32).map(move |x| Position::new(x, y)))
            .filter(|pos| !exclude.contains(pos))
            .choose(&mut self.rng)
    }
}

impl Default for Placer {
    fn default() -> Self {
        Self::new()
    }
}
