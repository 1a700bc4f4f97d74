//! Fixed-step frame update
//!
//! Core game loop that advances the world one frame at a time. Every timer
//! counts frames; there is no delta time.

use std::panic::{self, AssertUnwindSafe};

use glam::Vec2;
use thiserror::Error;

use super::collision::{clamp_to_level, step};
use super::combat::resolve_melee;
use super::grid::TileType;
use super::state::{FlowState, FrameResult, GameEvent, GameWorld, SoundCue};
use crate::consts::TILE_SIZE;

/// Input intents for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
    pub attack: bool,
    /// Pause toggle
    pub pause: bool,
    /// Start over after a level ends
    pub restart: bool,
    /// Demo mode - an autopilot plays the game
    pub idle_mode: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    #[error("frame {frame} aborted: {message}")]
    Aborted { frame: u64, message: String },
}

/// Advance the world by one frame
pub fn update(world: &mut GameWorld, input: &FrameInput) -> FrameResult {
    let mut events = Vec::new();

    if input.restart && world.flow.is_terminal() {
        let keep_score = world.flow == FlowState::LevelComplete;
        world.reset(keep_score);
        events.push(GameEvent::Restarted);
        return FrameResult {
            flow: world.flow,
            events,
        };
    }

    if input.pause {
        match world.flow {
            FlowState::Playing => {
                world.flow = FlowState::Paused;
                log::debug!("Paused at frame {}", world.frame);
            }
            FlowState::Paused => world.flow = FlowState::Playing,
            _ => {}
        }
    }

    // Paused and terminal states skip simulation
    if world.flow != FlowState::Playing {
        return FrameResult {
            flow: world.flow,
            events,
        };
    }

    let input = if input.idle_mode {
        idle_intents(world, input)
    } else {
        *input
    };

    world.frame += 1;

    // Intents
    world
        .player
        .apply_intents(&input, &world.tuning.player, &mut events);
    let player_x = world.player.body.pos.x;
    for enemy in &mut world.enemies {
        enemy.think(player_x, &world.tuning.enemy_ai, &mut events);
    }

    // Physics
    let gravity = world.tuning.gravity;
    if step(&mut world.player, &world.grid, gravity).fell_off && world.player.combat.kill() {
        log::info!("Player fell out of the level at frame {}", world.frame);
        events.push(GameEvent::PlayerFell);
    }
    for enemy in &mut world.enemies {
        if step(enemy, &world.grid, gravity).fell_off {
            enemy.combat.kill();
        }
    }

    // Combat; push-back can shove bodies past the level edges
    resolve_melee(&mut world.player, &mut world.enemies, &world.tuning, &mut events);
    clamp_to_level(&mut world.player.body, &world.grid);
    for enemy in &mut world.enemies {
        clamp_to_level(&mut enemy.body, &world.grid);
    }

    world.prune_dead(&mut events);

    // Spawning
    if world.frame - world.last_spawn_frame >= world.tuning.spawn_interval_frames {
        world.last_spawn_frame = world.frame;
        if let Some(enemy) = world.spawn_enemy() {
            events.push(GameEvent::EnemySpawned {
                id: enemy.id,
                kind: enemy.kind,
            });
        }
    }

    // Flow transitions; death wins over reaching the castle
    if !world.player.combat.is_alive() {
        world.flow = FlowState::GameOver;
        log::info!("Game over with score {}", world.score);
        events.push(GameEvent::GameOver { score: world.score });
        events.push(GameEvent::Sound(SoundCue::GameOver));
    } else {
        let (col, row) = world.player.tile_position();
        if world.grid.tile_at(col, row) == TileType::Entrance {
            world.flow = FlowState::LevelComplete;
            log::info!("Level complete at frame {} with score {}", world.frame, world.score);
            events.push(GameEvent::LevelComplete);
            events.push(GameEvent::Sound(SoundCue::LevelComplete));
        }
    }

    FrameResult {
        flow: world.flow,
        events,
    }
}

/// Run [`update`], turning a panic into an aborted frame.
///
/// The world may be left partially updated by the aborted frame; the caller
/// can keep calling this on the next frame.
pub fn update_guarded(world: &mut GameWorld, input: &FrameInput) -> Result<FrameResult, FrameError> {
    let frame = world.frame;
    panic::catch_unwind(AssertUnwindSafe(|| update(world, input))).map_err(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        log::error!("Frame {} aborted: {}", frame, message);
        FrameError::Aborted { frame, message }
    })
}

/// Autopilot: walk toward the castle, jump over walls and swing at
/// anything close
pub fn idle_intents(world: &GameWorld, input: &FrameInput) -> FrameInput {
    let body = &world.player.body;
    let ahead = body.pos.x + body.size.x + TILE_SIZE / 2.0;
    let wall_ahead = [body.pos.y + 1.0, body.pos.y + body.size.y / 2.0, body.pos.y + body.size.y - 1.0]
        .iter()
        .any(|&y| world.grid.tile_at_world(Vec2::new(ahead, y)).is_solid());

    let reach = world.player.combat.attack.reach + body.size.x;
    let enemy_near = world
        .enemies
        .iter()
        .any(|e| (e.body.center().x - body.center().x).abs() <= reach);

    FrameInput {
        move_left: false,
        move_right: true,
        jump: wall_ahead,
        attack: enemy_near,
        ..*input
    }
}
