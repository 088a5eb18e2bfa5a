use census::{ConfigError, Grid};
use itertools::Itertools;

/// Small linear congruential generator; reproducible for a given seed.
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed.wrapping_add(1),
        }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }

    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Overwrites every cell, alive with probability `density`.
pub fn fill(grid: &mut Grid, density: f64, seed: u64) -> Result<(), ConfigError> {
    let mut rng = SimpleRng::new(seed);
    for (row, col) in (0..grid.height()).cartesian_product(0..grid.width()) {
        grid.set_cell(row, col, rng.next_f64() < density)?;
    }
    Ok(())
}
