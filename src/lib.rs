//! Block Jump Warrior - tile-based platformer physics and melee combat
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tile grid, bodies, collisions, combat, game flow)
//! - `platform`: Presenter interface for effects and sounds
//! - `highscores`: Single best-score store
//! - `tuning`: Data-driven game balance

pub mod highscores;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use highscores::HighScore;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation rate the per-frame constants were tuned for
    pub const FRAMES_PER_SECOND: u32 = 60;

    /// Edge length of a square tile in world units
    pub const TILE_SIZE: f32 = 40.0;
    /// Rows in a level
    pub const GRID_HEIGHT: usize = 10;
    /// Columns visible on one screen
    pub const SCREEN_WIDTH: usize = 20;
    pub const SCREENS_PER_LEVEL: usize = 6;
    /// Columns in a level
    pub const LEVEL_WIDTH: usize = SCREEN_WIDTH * SCREENS_PER_LEVEL;

    /// Castle footprint at the end of each level (tiles)
    pub const CASTLE_WIDTH: usize = 5;
    pub const CASTLE_HEIGHT: usize = 5;

    /// Gap left between a body and the tile edge it was snapped to
    pub const COLLISION_PADDING: f32 = 1.0;

    /// Starting angle of an attack windup (radians)
    pub const WINDUP_START_ANGLE: f32 =
        -std::f32::consts::FRAC_PI_2 + std::f32::consts::PI / 9.0;
    /// Windup angle advance per frame (radians)
    pub const WINDUP_STEP: f32 = 0.3;
}

/// Center point of an axis-aligned box given its top-left corner and size
#[inline]
pub fn box_center(pos: Vec2, size: Vec2) -> Vec2 {
    pos + size * 0.5
}
