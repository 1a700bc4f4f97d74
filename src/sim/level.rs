//! Level generation
//!
//! A level is a single wide strip: solid ground, floating platforms on every
//! screen but the last, and a castle whose entrance ends the level.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::grid::{TileGrid, TileGridBuilder, TileType};
use crate::consts::*;

/// Produces a fresh tile grid each time a level starts
pub trait LevelGenerator: std::fmt::Debug {
    fn generate(&mut self) -> TileGrid;
}

/// Seeded random platforms ending in a castle
#[derive(Debug, Clone)]
pub struct CastleLevel {
    rng: Pcg32,
}

impl CastleLevel {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl LevelGenerator for CastleLevel {
    fn generate(&mut self) -> TileGrid {
        let mut builder = TileGridBuilder::new(LEVEL_WIDTH, GRID_HEIGHT);
        builder.fill_row(GRID_HEIGHT - 1, 0..LEVEL_WIDTH, TileType::Solid);

        // Platforms: 2-4 per screen, 3-6 tiles wide
        for screen in 0..SCREENS_PER_LEVEL - 1 {
            let screen_start = screen * SCREEN_WIDTH;
            let count = self.rng.random_range(2..=4);
            for _ in 0..count {
                let width = self.rng.random_range(3..=6);
                let x = screen_start + self.rng.random_range(0..SCREEN_WIDTH - width);
                let y = GRID_HEIGHT - 2 - self.rng.random_range(0..GRID_HEIGHT - 4);
                builder.fill_row(y, x..x + width, TileType::Solid);
            }
        }

        // Castle replaces the ground under it
        let castle_start = LEVEL_WIDTH - CASTLE_WIDTH - 1;
        for row in GRID_HEIGHT - CASTLE_HEIGHT..GRID_HEIGHT {
            builder.fill_row(row, castle_start..LEVEL_WIDTH, TileType::CastleWall);
        }
        builder
            .set(LEVEL_WIDTH - 1, GRID_HEIGHT - 2, TileType::Entrance)
            .set(LEVEL_WIDTH - 1, GRID_HEIGHT - 3, TileType::Entrance);

        log::debug!("Generated castle level {}x{}", LEVEL_WIDTH, GRID_HEIGHT);
        builder.build()
    }
}

/// Always hands out the same grid
#[derive(Debug, Clone)]
pub struct FixedLevel(pub TileGrid);

impl LevelGenerator for FixedLevel {
    fn generate(&mut self) -> TileGrid {
        self.0.clone()
    }
}
