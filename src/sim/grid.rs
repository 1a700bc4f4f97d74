//! Tile grid: the static collision map of a level
//!
//! Cells are addressed by (column, row) with row 0 at the top. Anything
//! outside the grid reads as `Solid`, so bodies can never leave the
//! playfield through a missing tile.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::body::Rect;
use crate::consts::TILE_SIZE;

/// Tile type codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TileType {
    #[default]
    Empty = 0,
    Solid = 1,
    CastleWall = 2,
    Entrance = 3,
}

impl TileType {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(TileType::Empty),
            1 => Some(TileType::Solid),
            2 => Some(TileType::CastleWall),
            3 => Some(TileType::Entrance),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    /// Only solid tiles block movement. Castle walls and the entrance are
    /// walk-through scenery.
    #[inline]
    pub fn is_solid(self) -> bool {
        self == TileType::Solid
    }

    fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '.' => Some(TileType::Empty),
            '#' => Some(TileType::Solid),
            'W' => Some(TileType::CastleWall),
            'E' => Some(TileType::Entrance),
            _ => None,
        }
    }
}

/// Errors building a grid from external data
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid must be at least 1x1, got {width}x{height}")]
    Empty { width: usize, height: usize },
    #[error("expected {expected} tiles for the grid, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("unknown tile code {code} at index {index}")]
    UnknownCode { code: u8, index: usize },
    #[error("unknown tile glyph {glyph:?} at row {row}, column {col}")]
    UnknownGlyph { glyph: char, row: usize, col: usize },
    #[error("row {row} has {actual} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

/// Inclusive range of tile indices covered by a rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSpan {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl TileSpan {
    /// Visit every (col, row) pair in row-major order
    pub fn cells(self) -> impl Iterator<Item = (i32, i32)> {
        (self.top..=self.bottom).flat_map(move |row| (self.left..=self.right).map(move |col| (col, row)))
    }
}

/// Convert a world coordinate to a tile index
#[inline]
pub fn world_to_tile(x: f32) -> i32 {
    (x / TILE_SIZE).floor() as i32
}

/// Mutable staging area used by level generators; `build` freezes it
#[derive(Debug, Clone)]
pub struct TileGridBuilder {
    width: usize,
    height: usize,
    tiles: Vec<TileType>,
}

impl TileGridBuilder {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            tiles: vec![TileType::Empty; width * height],
        }
    }

    /// Set one cell; writes outside the grid are dropped
    pub fn set(&mut self, col: usize, row: usize, tile: TileType) -> &mut Self {
        if col < self.width && row < self.height {
            self.tiles[row * self.width + col] = tile;
        }
        self
    }

    /// Fill the half-open column range `cols` on `row`
    pub fn fill_row(&mut self, row: usize, cols: std::ops::Range<usize>, tile: TileType) -> &mut Self {
        for col in cols {
            self.set(col, row, tile);
        }
        self
    }

    pub fn build(self) -> TileGrid {
        TileGrid {
            width: self.width,
            height: self.height,
            tiles: self.tiles,
        }
    }
}

/// Immutable level tile map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    width: usize,
    height: usize,
    /// Row-major cells
    tiles: Vec<TileType>,
}

impl TileGrid {
    /// A grid of empty cells
    pub fn empty(width: usize, height: usize) -> Self {
        TileGridBuilder::new(width, height).build()
    }

    /// Build a grid from row-major tiles
    pub fn from_tiles(width: usize, height: usize, tiles: Vec<TileType>) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::Empty { width, height });
        }
        let expected = width * height;
        if tiles.len() != expected {
            return Err(GridError::SizeMismatch {
                expected,
                actual: tiles.len(),
            });
        }
        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    /// Build a grid from raw row-major tile codes
    pub fn from_codes(width: usize, height: usize, codes: &[u8]) -> Result<Self, GridError> {
        let tiles = codes
            .iter()
            .enumerate()
            .map(|(index, &code)| TileType::from_code(code).ok_or(GridError::UnknownCode { code, index }))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_tiles(width, height, tiles)
    }

    /// Parse a text map: `.` empty, `#` solid, `W` castle wall, `E` entrance.
    /// Blank lines and surrounding whitespace are ignored.
    pub fn parse(text: &str) -> Result<Self, GridError> {
        let rows: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        let mut tiles = Vec::with_capacity(width * rows.len());

        for (row, line) in rows.iter().enumerate() {
            let actual = line.chars().count();
            if actual != width {
                return Err(GridError::RaggedRow {
                    row,
                    expected: width,
                    actual,
                });
            }
            for (col, glyph) in line.chars().enumerate() {
                let tile = TileType::from_glyph(glyph).ok_or(GridError::UnknownGlyph { glyph, row, col })?;
                tiles.push(tile);
            }
        }

        Self::from_tiles(width, rows.len(), tiles)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Level width in world units
    #[inline]
    pub fn pixel_width(&self) -> f32 {
        self.width as f32 * TILE_SIZE
    }

    /// Level height in world units
    #[inline]
    pub fn pixel_height(&self) -> f32 {
        self.height as f32 * TILE_SIZE
    }

    /// Tile at (col, row); out of bounds reads as `Solid`
    pub fn tile_at(&self, col: i32, row: i32) -> TileType {
        if col < 0 || row < 0 || col as usize >= self.width || row as usize >= self.height {
            return TileType::Solid;
        }
        self.tiles[row as usize * self.width + col as usize]
    }

    /// Tile under a world-space point
    pub fn tile_at_world(&self, point: Vec2) -> TileType {
        self.tile_at(world_to_tile(point.x), world_to_tile(point.y))
    }

    /// Broad-phase index box for a rectangle. Right and bottom edges use the
    /// far coordinate directly, so a body flush against a tile boundary
    /// also covers the next tile.
    pub fn span(&self, rect: &Rect) -> TileSpan {
        TileSpan {
            left: world_to_tile(rect.pos.x),
            right: world_to_tile(rect.pos.x + rect.size.x),
            top: world_to_tile(rect.pos.y),
            bottom: world_to_tile(rect.pos.y + rect.size.y),
        }
    }

    /// Whether the tile directly below the one containing `point` is non-empty
    pub fn is_on_ground(&self, point: Vec2) -> bool {
        self.tile_at(world_to_tile(point.x), world_to_tile(point.y) + 1) != TileType::Empty
    }

    /// Top edge of the first solid tile at or below `y` in the column of `x`,
    /// or the bottom of the level when the column is open
    pub fn nearest_floor(&self, x: f32, y: f32) -> f32 {
        let col = world_to_tile(x);
        let start = world_to_tile(y).max(0);
        (start..self.height as i32)
            .find(|&row| self.tile_at(col, row).is_solid())
            .map(|row| row as f32 * TILE_SIZE)
            .unwrap_or_else(|| self.pixel_height())
    }

    /// Row-major iterator over (col, row, tile)
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, TileType)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, &tile)| (i % self.width, i / self.width, tile))
    }
}
