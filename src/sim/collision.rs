//! Collision detection and response for axis-aligned bodies
//!
//! Bodies move with one explicit Euler step per frame, then get pushed back
//! out of any solid tile they crossed into. There is no sub-stepping: a body
//! that moves more than a tile per frame can skip over thin walls.

use glam::Vec2;

use super::body::{Body, Kinematic, Rect, TileResponse};
use super::grid::TileGrid;
use crate::consts::{COLLISION_PADDING, TILE_SIZE};

/// What happened to a body during one physics step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Came down onto a tile top
    pub landed: bool,
    /// Jumped into a tile bottom
    pub hit_head: bool,
    /// Ran into a tile side
    pub hit_wall: bool,
    /// Dropped below the bottom of the level
    pub fell_off: bool,
}

/// Apply gravity and velocity. Returns the position before the move.
pub fn integrate(body: &mut Body, gravity: f32) -> Vec2 {
    let prev = body.pos;
    body.vel.y += gravity;
    body.pos += body.vel;
    prev
}

/// World-space rectangle of the tile at (col, row)
#[inline]
pub fn tile_rect(col: i32, row: i32) -> Rect {
    Rect::new(
        Vec2::new(col as f32 * TILE_SIZE, row as f32 * TILE_SIZE),
        Vec2::splat(TILE_SIZE),
    )
}

/// Push a body out of the solid tiles it moved into since `prev`.
///
/// Tiles are visited in row-major order and each one corrects at most one
/// axis, vertical first. Every test runs against the position as already
/// corrected by earlier tiles, so a later tile can overwrite an earlier
/// correction.
pub fn resolve_tiles(body: &mut Body, prev: Vec2, grid: &TileGrid, response: TileResponse) -> StepReport {
    let mut report = StepReport::default();
    let size = body.size;
    body.airborne = true;

    for (col, row) in grid.span(&body.rect()).cells() {
        if !grid.tile_at(col, row).is_solid() {
            continue;
        }
        let tile = tile_rect(col, row);

        // Landing
        if body.vel.y > 0.0 && prev.y + size.y <= tile.top() && body.pos.y + size.y > tile.top() {
            body.pos.y = tile.top() - size.y - COLLISION_PADDING;
            body.vel.y = 0.0;
            body.airborne = false;
            report.landed = true;
            continue;
        }

        // Head hit
        if body.vel.y < 0.0 && prev.y >= tile.bottom() && body.pos.y < tile.bottom() {
            body.pos.y = tile.bottom() + COLLISION_PADDING;
            body.vel.y = 0.0;
            report.hit_head = true;
            continue;
        }

        // Sides only count while the body still overlaps the tile's rows
        if body.pos.y + size.y <= tile.top() || body.pos.y >= tile.bottom() {
            continue;
        }

        let into_right_edge = body.vel.x < 0.0 && prev.x >= tile.right() && body.pos.x < tile.right();
        let into_left_edge = body.vel.x > 0.0 && prev.x + size.x <= tile.left() && body.pos.x + size.x > tile.left();
        if !into_right_edge && !into_left_edge {
            continue;
        }

        report.hit_wall = true;
        match response {
            TileResponse::Snap if into_right_edge => body.pos.x = tile.right() + COLLISION_PADDING,
            TileResponse::Snap => body.pos.x = tile.left() - size.x - COLLISION_PADDING,
            TileResponse::Bounce => {
                body.vel.x = -body.vel.x;
                body.facing_right = !body.facing_right;
            }
        }
    }

    report
}

/// Keep a body horizontally inside the level
pub fn clamp_to_level(body: &mut Body, grid: &TileGrid) {
    let max_x = grid.pixel_width() - body.size.x;
    body.pos.x = body.pos.x.min(max_x).max(0.0);
}

/// Integrate, resolve against the grid, clamp, and check for fall-off
pub fn step<K: Kinematic + ?Sized>(entity: &mut K, grid: &TileGrid, gravity: f32) -> StepReport {
    let response = entity.tile_response();
    let body = entity.body_mut();

    let prev = integrate(body, gravity);
    let mut report = resolve_tiles(body, prev, grid, response);
    clamp_to_level(body, grid);
    report.fell_off = body.pos.y > grid.pixel_height();
    report
}

/// Overlap test between two bodies
#[inline]
pub fn bodies_overlap(a: &Body, b: &Body) -> bool {
    a.rect().intersects(&b.rect())
}

/// Shove two overlapping bodies apart along the line between their centres.
/// Coincident centres push `a` toward +x.
pub fn push_apart(a: &mut Body, b: &mut Body, force: f32) {
    let mut dir = (a.center() - b.center()).normalize_or_zero();
    if dir == Vec2::ZERO {
        dir = Vec2::X;
    }
    a.pos += dir * force;
    b.pos -= dir * force;
}
