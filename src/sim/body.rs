//! Kinematic bodies shared by the player and enemies

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::combat::CombatState;
use crate::box_center;

/// Axis-aligned rectangle, top-left origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        box_center(self.pos, self.size)
    }

    /// Strict overlap test; rectangles that only share an edge do not touch
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Inclusive point containment
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.left() && point.x <= self.right() && point.y >= self.top() && point.y <= self.bottom()
    }
}

/// Position, size and velocity of a moving entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Units per frame
    pub vel: Vec2,
    pub facing_right: bool,
    /// Cleared only on the frame the body lands on a tile
    pub airborne: bool,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            vel: Vec2::ZERO,
            facing_right: true,
            airborne: false,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        box_center(self.pos, self.size)
    }

    /// Point on the facing edge, halfway down the body
    pub fn leading_edge(&self) -> Vec2 {
        let x = if self.facing_right {
            self.pos.x + self.size.x
        } else {
            self.pos.x
        };
        Vec2::new(x, self.pos.y + self.size.y / 2.0)
    }
}

/// How a body reacts when it runs into a wall tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileResponse {
    /// Stop flush against the tile edge
    Snap,
    /// Keep position, reverse horizontal velocity and facing
    Bounce,
}

/// Anything the collision resolver can move through the level
pub trait Kinematic {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;
    fn tile_response(&self) -> TileResponse;
}

/// A kinematic entity that can deal and receive melee damage
pub trait Combatant: Kinematic {
    fn combat(&self) -> &CombatState;
    fn combat_mut(&mut self) -> &mut CombatState;
    /// Frames of invulnerability granted after taking a hit
    fn invulnerability_window(&self) -> u32;
}
