//! Seeded block attribute generation
//!
//! Every random draw in the simulation goes through here so that a run is
//! reproducible from its seed.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;

#[derive(Debug, Clone)]
pub struct Spawner {
    seed: u64,
    rng: Pcg32,
    /// Width of the spawn column range: field width minus block width
    span: f32,
}

impl Spawner {
    pub fn new(seed: u64, field_width: f32, block_width: f32) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            span: (field_width - block_width).max(0.0),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Whole-pixel column in [0, field_width - block_width)
    pub fn random_x(&mut self) -> f32 {
        (self.rng.random::<f32>() * self.span).floor()
    }

    /// One of 660, 720, 780 or 840 px/s
    pub fn random_speed(&mut self) -> f32 {
        let step = self.rng.random_range(1..=BLOCK_SPEED_STEPS);
        (step + BLOCK_SPEED_BASE) as f32 * BLOCK_SPEED_UNIT
    }
}
