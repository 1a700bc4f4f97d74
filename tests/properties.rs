//! Property tests for grid, collision and combat invariants

use block_jump_warrior::Tuning;
use block_jump_warrior::consts::COLLISION_PADDING;
use block_jump_warrior::sim::{
    Body, CombatState, DamageOutcome, Kinematic, TileGrid, TileGridBuilder, TileResponse, TileType, step,
};
use glam::Vec2;
use proptest::prelude::*;

const GRAVITY: f32 = 0.8;
const FLOOR_TOP: f32 = 360.0;

fn flat_grid() -> TileGrid {
    let mut builder = TileGridBuilder::new(40, 10);
    builder.fill_row(9, 0..40, TileType::Solid);
    builder.build()
}

struct Mover(Body, TileResponse);

impl Kinematic for Mover {
    fn body(&self) -> &Body {
        &self.0
    }
    fn body_mut(&mut self) -> &mut Body {
        &mut self.0
    }
    fn tile_response(&self) -> TileResponse {
        self.1
    }
}

fn response() -> impl Strategy<Value = TileResponse> {
    prop_oneof![Just(TileResponse::Snap), Just(TileResponse::Bounce)]
}

proptest! {
    #[test]
    fn out_of_bounds_reads_solid(
        width in 1usize..20,
        height in 1usize..20,
        col in -40i32..40,
        row in -40i32..40,
    ) {
        let grid = TileGrid::empty(width, height);
        let inside = col >= 0 && row >= 0 && (col as usize) < width && (row as usize) < height;
        let expected = if inside { TileType::Empty } else { TileType::Solid };
        prop_assert_eq!(grid.tile_at(col, row), expected);
    }

    #[test]
    fn step_keeps_body_inside_level_width(
        x in -500.0f32..2500.0,
        y in 0.0f32..300.0,
        vx in -80.0f32..80.0,
        vy in -30.0f32..30.0,
        width in 10.0f32..60.0,
        response in response(),
    ) {
        let grid = flat_grid();
        let mut body = Body::new(Vec2::new(x, y), Vec2::new(width, 50.0));
        body.vel = Vec2::new(vx, vy);
        let mut mover = Mover(body, response);

        step(&mut mover, &grid, GRAVITY);

        prop_assert!(mover.0.pos.x >= 0.0);
        prop_assert!(mover.0.pos.x <= grid.pixel_width() - width);
    }

    #[test]
    fn body_touching_floor_lands_flush(
        x in 20u32..1500,
        width in 10u32..60,
        height in 10u32..80,
        vx in -10.0f32..10.0,
        vy in 0.0f32..30.0,
        response in response(),
    ) {
        let grid = flat_grid();
        let (width, height) = (width as f32, height as f32);
        let mut body = Body::new(Vec2::new(x as f32, FLOOR_TOP - height), Vec2::new(width, height));
        body.vel = Vec2::new(vx, vy);
        let mut mover = Mover(body, response);

        let report = step(&mut mover, &grid, GRAVITY);

        prop_assert!(report.landed);
        prop_assert!(!report.hit_wall);
        prop_assert_eq!(mover.0.pos.x, x as f32 + vx);
        prop_assert_eq!(mover.0.vel.x, vx);
        prop_assert_eq!(mover.0.vel.y, 0.0);
        prop_assert_eq!(mover.0.pos.y, FLOOR_TOP - height - COLLISION_PADDING);
        prop_assert!(!mover.0.airborne);
    }

    #[test]
    fn invulnerable_defender_keeps_health(
        health in 1i32..200,
        frames in 1u32..120,
        amount in 0i32..500,
    ) {
        let mut state = CombatState::new(health, Tuning::default().player.attack);
        state.invulnerability = frames;

        prop_assert_eq!(state.apply_damage(amount, 60), DamageOutcome::Ignored);
        prop_assert_eq!(state.health, health);
    }

    #[test]
    fn hit_box_only_while_attacking(ticks in 0usize..80, press_at in 0usize..40) {
        let body = Body::new(Vec2::new(100.0, 100.0), Vec2::new(30.0, 50.0));
        let mut state = CombatState::new(100, Tuning::default().player.attack);

        for frame in 0..ticks {
            state.tick();
            if frame == press_at {
                state.try_start_attack();
            }
            if state.attack_box(&body).is_some() {
                prop_assert!(state.is_attacking());
            }
        }
    }
}
