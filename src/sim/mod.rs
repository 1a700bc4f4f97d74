//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed frame step only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod combat;
pub mod enemy;
pub mod grid;
pub mod level;
pub mod player;
pub mod state;
pub mod tick;

pub use body::{Body, Combatant, Kinematic, Rect, TileResponse};
pub use collision::{StepReport, bodies_overlap, push_apart, step};
pub use combat::{AttackPhase, AttackProfile, CombatState, DamageOutcome, resolve_melee, strike};
pub use enemy::{Enemy, EnemyKind, EnemyMode};
pub use grid::{GridError, TileGrid, TileGridBuilder, TileType, world_to_tile};
pub use level::{CastleLevel, FixedLevel, LevelGenerator};
pub use player::{Player, Pose};
pub use state::{FlowState, FrameResult, GameEvent, GameWorld, SoundCue};
pub use tick::{FrameError, FrameInput, idle_intents, update, update_guarded};
