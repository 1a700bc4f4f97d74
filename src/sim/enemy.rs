//! Enemy kinds and their chase/patrol behaviour

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::body::{Body, Combatant, Kinematic, TileResponse};
use super::combat::CombatState;
use super::state::{GameEvent, SoundCue};
use crate::tuning::{EnemyAiTuning, EnemyTable, Tuning};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Normal,
    Fast,
    Heavy,
}

impl EnemyKind {
    /// Pick a kind using the table's spawn mix
    pub fn roll<R: Rng + ?Sized>(rng: &mut R, table: &EnemyTable) -> Self {
        if rng.random::<f32>() < table.normal_chance {
            EnemyKind::Normal
        } else if rng.random::<f32>() < table.fast_share {
            EnemyKind::Fast
        } else {
            EnemyKind::Heavy
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnemyMode {
    #[default]
    Patrolling,
    Chasing,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub body: Body,
    pub combat: CombatState,
    pub mode: EnemyMode,
    pub frame_count: u64,
    pub speed: f32,
    /// Score awarded on death
    pub points: u64,
    pub invulnerability_window: u32,
}

impl Enemy {
    /// New enemy walking left
    pub fn new(id: u32, kind: EnemyKind, pos: Vec2, tuning: &Tuning) -> Self {
        let stats = tuning.enemies.stats(kind);
        let mut body = Body::new(pos, stats.size);
        body.vel.x = -stats.speed;
        body.facing_right = false;
        Self {
            id,
            kind,
            body,
            combat: CombatState::new(stats.health, tuning.enemy_attack(kind)),
            mode: EnemyMode::Patrolling,
            frame_count: 0,
            speed: stats.speed,
            points: stats.points,
            invulnerability_window: tuning.enemy_ai.invulnerability_frames,
        }
    }

    /// Decide this frame's movement and attack given the player's x.
    ///
    /// Advances combat timers, so it runs once per frame.
    pub fn think(&mut self, player_x: f32, ai: &EnemyAiTuning, events: &mut Vec<GameEvent>) {
        self.frame_count += 1;
        self.combat.tick();

        let distance = (self.body.pos.x - player_x).abs();
        if distance <= ai.detection_range {
            self.mode = EnemyMode::Chasing;
            self.body.vel.x = if player_x < self.body.pos.x {
                -self.speed
            } else {
                self.speed
            };
            self.body.facing_right = self.body.vel.x > 0.0;

            if distance <= ai.attack_range && self.combat.try_start_attack() {
                events.push(GameEvent::AttackEffect {
                    pos: self.body.leading_edge(),
                });
                events.push(GameEvent::Sound(SoundCue::EnemyAttack));
            }
        } else {
            self.mode = EnemyMode::Patrolling;
            if ai.patrol_turn_frames > 0 && self.frame_count % ai.patrol_turn_frames == 0 {
                self.body.vel.x = -self.body.vel.x;
                self.body.facing_right = self.body.vel.x > 0.0;
            }
        }
    }
}

impl Kinematic for Enemy {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn tile_response(&self) -> TileResponse {
        TileResponse::Bounce
    }
}

impl Combatant for Enemy {
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
