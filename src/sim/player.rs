//! The player-controlled warrior

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, Combatant, Kinematic, TileResponse};
use super::combat::CombatState;
use super::grid::world_to_tile;
use super::state::{GameEvent, SoundCue};
use super::tick::FrameInput;
use crate::tuning::PlayerTuning;

/// What the player is doing, for renderers picking a sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Pose {
    #[default]
    Idle,
    Running,
    Jumping,
    Attacking,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub combat: CombatState,
    pub pose: Pose,
    /// Frames lived since spawn
    pub frame_count: u64,
    pub invulnerability_window: u32,
}

impl Player {
    pub fn new(tuning: &PlayerTuning) -> Self {
        let mut body = Body::new(tuning.spawn, tuning.size);
        // Spawns in mid-air and must land before the first jump
        body.airborne = true;
        Self {
            body,
            combat: CombatState::new(tuning.max_health, tuning.attack),
            pose: Pose::Idle,
            frame_count: 0,
            invulnerability_window: tuning.invulnerability_frames,
        }
    }

    /// Turn this frame's input into velocity, jumps and attacks.
    ///
    /// Also advances the combat timers and applies health regeneration, so
    /// it must run exactly once per simulated frame.
    pub fn apply_intents(&mut self, input: &FrameInput, tuning: &PlayerTuning, events: &mut Vec<GameEvent>) {
        self.frame_count += 1;
        self.combat.tick();

        self.body.vel.x = 0.0;
        if input.move_left {
            self.body.vel.x = -tuning.speed;
            self.body.facing_right = false;
        } else if input.move_right {
            self.body.vel.x = tuning.speed;
            self.body.facing_right = true;
        }

        if input.jump && !self.body.airborne {
            self.body.vel.y = tuning.jump_force;
            self.body.airborne = true;
            events.push(GameEvent::Sound(SoundCue::Jump));
        }

        if input.attack && self.combat.try_start_attack() {
            events.push(GameEvent::AttackEffect {
                pos: self.body.leading_edge(),
            });
            events.push(GameEvent::Sound(SoundCue::Attack));
        }

        self.pose = if self.combat.is_attacking() {
            Pose::Attacking
        } else if self.body.airborne && self.body.vel.y < 0.0 {
            Pose::Jumping
        } else if self.body.vel.x != 0.0 {
            Pose::Running
        } else {
            Pose::Idle
        };

        if tuning.regen_interval_frames > 0
            && self.frame_count % tuning.regen_interval_frames == 0
            && self.combat.health < self.combat.max_health
        {
            self.combat.heal(tuning.regen_amount);
        }
    }

    /// Tile containing the top-left corner
    pub fn tile_position(&self) -> (i32, i32) {
        (world_to_tile(self.body.pos.x), world_to_tile(self.body.pos.y))
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.body.center()
    }
}

impl Kinematic for Player {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn tile_response(&self) -> TileResponse {
        TileResponse::Snap
    }
}

impl Combatant for Player {
    fn combat(&self) -> &CombatState {
        &self.combat
    }

    fn combat_mut(&mut self) -> &mut CombatState {
        &mut self.combat
    }

    fn invulnerability_window(&self) -> u32 {
        self.invulnerability_window
    }
}
