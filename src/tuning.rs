//! Data-driven game balance
//!
//! Defaults are tuned for 60 frames per second. Any field may be omitted
//! from a JSON tuning file; missing values fall back to the defaults.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::FRAMES_PER_SECOND;
use crate::sim::combat::AttackProfile;
use crate::sim::enemy::EnemyKind;

/// Errors loading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid tuning JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Player movement and combat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub spawn: Vec2,
    pub size: Vec2,
    /// Horizontal speed (units per frame)
    pub speed: f32,
    /// Initial vertical velocity of a jump (negative is up)
    pub jump_force: f32,
    pub max_health: i32,
    pub attack: AttackProfile,
    pub invulnerability_frames: u32,
    /// Regenerate `regen_amount` health every this many frames (0 disables)
    pub regen_interval_frames: u64,
    pub regen_amount: i32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            spawn: Vec2::new(50.0, 200.0),
            size: Vec2::new(30.0, 50.0),
            speed: 5.0,
            jump_force: -15.0,
            max_health: 100,
            attack: AttackProfile::new(40.0, 20, 30, 10),
            invulnerability_frames: FRAMES_PER_SECOND,
            regen_interval_frames: FRAMES_PER_SECOND as u64,
            regen_amount: 1,
        }
    }
}

/// Per-kind enemy stats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyStats {
    pub speed: f32,
    pub health: i32,
    pub damage: i32,
    pub size: Vec2,
    /// Score awarded on death
    pub points: u64,
}

/// Stats table keyed by enemy kind, plus the spawn mix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTable {
    pub normal: EnemyStats,
    pub fast: EnemyStats,
    pub heavy: EnemyStats,
    /// Chance a spawn is `Normal`
    pub normal_chance: f32,
    /// Share of the remaining spawns that are `Fast` (the rest are `Heavy`)
    pub fast_share: f32,
}

impl Default for EnemyTable {
    fn default() -> Self {
        Self {
            normal: EnemyStats {
                speed: 2.0,
                health: 60,
                damage: 10,
                size: Vec2::new(30.0, 50.0),
                points: 10,
            },
            fast: EnemyStats {
                speed: 3.0,
                health: 40,
                damage: 5,
                size: Vec2::new(30.0, 50.0),
                points: 10,
            },
            heavy: EnemyStats {
                speed: 1.0,
                health: 100,
                damage: 20,
                size: Vec2::new(40.0, 60.0),
                points: 20,
            },
            normal_chance: 0.7,
            fast_share: 0.5,
        }
    }
}

impl EnemyTable {
    pub fn stats(&self, kind: EnemyKind) -> &EnemyStats {
        match kind {
            EnemyKind::Normal => &self.normal,
            EnemyKind::Fast => &self.fast,
            EnemyKind::Heavy => &self.heavy,
        }
    }
}

/// Enemy behaviour shared by every kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyAiTuning {
    /// Horizontal distance at which an enemy starts chasing
    pub detection_range: f32,
    /// Horizontal distance at which a chasing enemy swings
    pub attack_range: f32,
    /// Patrolling enemies turn around this often
    pub patrol_turn_frames: u64,
    /// Damage comes from the kind's stats; the rest of the swing from here
    pub attack: AttackProfile,
    pub invulnerability_frames: u32,
}

impl Default for EnemyAiTuning {
    fn default() -> Self {
        Self {
            detection_range: 200.0,
            attack_range: 50.0,
            patrol_turn_frames: 2 * FRAMES_PER_SECOND as u64,
            attack: AttackProfile::new(20.0, 0, 60, 20),
            invulnerability_frames: 12,
        }
    }
}

/// Complete balance configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Added to vertical velocity every frame
    pub gravity: f32,
    pub player: PlayerTuning,
    pub enemy_ai: EnemyAiTuning,
    pub enemies: EnemyTable,
    /// Damage from touching an enemy outside of a swing
    pub contact_damage: i32,
    /// Distance bodies are shoved apart on contact
    pub push_force: f32,
    pub max_enemies: usize,
    pub spawn_interval_frames: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.8,
            player: PlayerTuning::default(),
            enemy_ai: EnemyAiTuning::default(),
            enemies: EnemyTable::default(),
            contact_damage: 10,
            push_force: 5.0,
            max_enemies: 3,
            spawn_interval_frames: 5 * FRAMES_PER_SECOND as u64,
        }
    }
}

impl Tuning {
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a tuning file from disk
    pub fn load(path: &Path) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Attack profile for an enemy of the given kind
    pub fn enemy_attack(&self, kind: EnemyKind) -> AttackProfile {
        AttackProfile {
            damage: self.enemies.stats(kind).damage,
            ..self.enemy_ai.attack
        }
    }
}
