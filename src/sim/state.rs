//! Game world and flow state
//!
//! Everything a frame reads or writes lives in [`GameWorld`]. There is no
//! global state, so several worlds can run side by side.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::enemy::{Enemy, EnemyKind};
use super::grid::TileGrid;
use super::level::{CastleLevel, LevelGenerator};
use super::player::Player;
use crate::consts::COLLISION_PADDING;
use crate::tuning::Tuning;

/// Top-level game flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FlowState {
    #[default]
    Playing,
    Paused,
    /// Player reached the castle entrance
    LevelComplete,
    /// Player died
    GameOver,
}

impl FlowState {
    /// Only a restart leaves these states
    pub fn is_terminal(self) -> bool {
        matches!(self, FlowState::LevelComplete | FlowState::GameOver)
    }
}

/// Sounds the game asks a presenter to play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    Jump,
    Attack,
    Hurt,
    EnemyAttack,
    EnemyHurt,
    EnemyDeath,
    LevelComplete,
    GameOver,
}

/// Things that happened during a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    AttackEffect { pos: Vec2 },
    DamageEffect { pos: Vec2 },
    DeathEffect { pos: Vec2 },
    Sound(SoundCue),
    PlayerDamaged { amount: i32, health: i32 },
    EnemyDamaged { id: u32, amount: i32, health: i32 },
    EnemyDied { id: u32, kind: EnemyKind, points: u64, pos: Vec2 },
    EnemySpawned { id: u32, kind: EnemyKind },
    PlayerFell,
    LevelComplete,
    GameOver { score: u64 },
    Restarted,
}

/// Outcome of one call to `update`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameResult {
    pub flow: FlowState,
    pub events: Vec<GameEvent>,
}

#[derive(Debug)]
pub struct GameWorld {
    pub tuning: Tuning,
    pub grid: TileGrid,
    pub player: Player,
    /// Sorted by id
    pub enemies: Vec<Enemy>,
    pub flow: FlowState,
    pub score: u64,
    /// Frames simulated since the level started
    pub frame: u64,
    pub last_spawn_frame: u64,
    rng: Pcg32,
    generator: Box<dyn LevelGenerator>,
    next_id: u32,
}

impl GameWorld {
    /// New world on a seeded castle level
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self::with_generator(seed, tuning, Box::new(CastleLevel::new(seed)))
    }

    /// New world whose levels come from `generator`
    pub fn with_generator(seed: u64, tuning: Tuning, mut generator: Box<dyn LevelGenerator>) -> Self {
        let grid = generator.generate();
        let player = Player::new(&tuning.player);
        let mut world = Self {
            tuning,
            grid,
            player,
            enemies: Vec::new(),
            flow: FlowState::Playing,
            score: 0,
            frame: 0,
            last_spawn_frame: 0,
            rng: Pcg32::seed_from_u64(seed),
            generator,
            next_id: 1,
        };
        world.spawn_enemy();
        log::info!("World created with seed {}", seed);
        world
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn a random enemy standing on the first solid surface of a random
    /// column. Returns `None` when the enemy cap is reached.
    pub fn spawn_enemy(&mut self) -> Option<&Enemy> {
        if self.enemies.len() >= self.tuning.max_enemies {
            return None;
        }
        let kind = EnemyKind::roll(&mut self.rng, &self.tuning.enemies);
        let size = self.tuning.enemies.stats(kind).size;

        let max_x = (self.grid.pixel_width() - size.x).max(0.0);
        let x = if max_x > 0.0 {
            self.rng.random_range(0.0..max_x)
        } else {
            0.0
        };
        // Rest on the higher floor under either edge so the body starts clear
        let floor = self
            .grid
            .nearest_floor(x, 0.0)
            .min(self.grid.nearest_floor(x + size.x, 0.0));
        let y = floor - size.y - COLLISION_PADDING;

        Some(self.spawn_enemy_at(kind, Vec2::new(x, y)))
    }

    /// Spawn an enemy of `kind` with its top-left corner at `pos`
    pub fn spawn_enemy_at(&mut self, kind: EnemyKind, pos: Vec2) -> &Enemy {
        let id = self.next_entity_id();
        log::debug!("Spawning {:?} enemy {} at ({:.0}, {:.0})", kind, id, pos.x, pos.y);
        self.enemies.push(Enemy::new(id, kind, pos, &self.tuning));
        &self.enemies[self.enemies.len() - 1]
    }

    /// Remove dead enemies, scoring each one once. Returns how many died.
    pub fn prune_dead(&mut self, events: &mut Vec<GameEvent>) -> usize {
        let before = self.enemies.len();
        let mut gained = 0;
        self.enemies.retain(|enemy| {
            if enemy.combat.is_alive() {
                return true;
            }
            let pos = enemy.body.center();
            gained += enemy.points;
            events.push(GameEvent::EnemyDied {
                id: enemy.id,
                kind: enemy.kind,
                points: enemy.points,
                pos,
            });
            events.push(GameEvent::DeathEffect { pos });
            events.push(GameEvent::Sound(SoundCue::EnemyDeath));
            false
        });
        self.score += gained;
        before - self.enemies.len()
    }

    /// Start the level over with a freshly generated grid.
    ///
    /// The grid is generated before anything else changes, so a failing
    /// generator leaves the world as it was.
    pub fn reset(&mut self, keep_score: bool) {
        let grid = self.generator.generate();
        self.grid = grid;
        self.player = Player::new(&self.tuning.player);
        self.enemies.clear();
        self.flow = FlowState::Playing;
        self.frame = 0;
        self.last_spawn_frame = 0;
        if !keep_score {
            self.score = 0;
        }
        self.spawn_enemy();
        log::info!("Level reset (score {})", self.score);
    }

    /// Left edge of a `view_width` wide camera following the player
    pub fn camera_x(&self, view_width: f32) -> f32 {
        let max = self.grid.pixel_width() - view_width;
        (self.player.body.pos.x - view_width / 2.0).min(max).max(0.0)
    }

    /// Enemy with the given id
    pub fn enemy(&self, id: u32) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::TileGridBuilder;
    use crate::sim::grid::TileType;
    use crate::sim::level::FixedLevel;

    fn flat_world(max_enemies: usize) -> GameWorld {
        let mut builder = TileGridBuilder::new(40, 10);
        builder.fill_row(9, 0..40, TileType::Solid);
        let tuning = Tuning {
            max_enemies,
            ..Tuning::default()
        };
        GameWorld::with_generator(1, tuning, Box::new(FixedLevel(builder.build())))
    }

    #[test]
    fn test_new_world_spawns_one_enemy() {
        let world = flat_world(3);
        assert_eq!(world.enemies.len(), 1);
        assert_eq!(world.flow, FlowState::Playing);
        assert_eq!(world.score, 0);
    }

    #[test]
    fn test_spawn_rests_on_floor_and_respects_cap() {
        let mut world = flat_world(3);
        while world.spawn_enemy().is_some() {}
        assert_eq!(world.enemies.len(), 3);
        for enemy in &world.enemies {
            assert_eq!(enemy.body.rect().bottom(), 360.0 - COLLISION_PADDING);
        }
        let ids: Vec<_> = world.enemies.iter().map(|e| e.id).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_prune_scores_each_death_once() {
        let mut world = flat_world(3);
        let id = world.enemies[0].id;
        let points = world.enemies[0].points;
        world.enemies[0].combat.kill();

        let mut events = Vec::new();
        assert_eq!(world.prune_dead(&mut events), 1);
        assert_eq!(world.score, points);
        assert!(world.enemy(id).is_none());
        assert!(events.contains(&GameEvent::Sound(SoundCue::EnemyDeath)));

        assert_eq!(world.prune_dead(&mut events), 0);
        assert_eq!(world.score, points);
    }

    #[test]
    fn test_reset_score_handling() {
        let mut world = flat_world(3);
        world.score = 40;
        world.flow = FlowState::LevelComplete;
        world.reset(true);
        assert_eq!(world.score, 40);
        assert_eq!(world.flow, FlowState::Playing);
        assert_eq!(world.enemies.len(), 1);

        world.reset(false);
        assert_eq!(world.score, 0);
    }

    #[test]
    fn test_camera_clamps_to_level() {
        let mut world = flat_world(0);
        world.player.body.pos.x = 10.0;
        assert_eq!(world.camera_x(800.0), 0.0);
        world.player.body.pos.x = 1000.0;
        assert_eq!(world.camera_x(800.0), 600.0);
        world.player.body.pos.x = 1590.0;
        assert_eq!(world.camera_x(800.0), 800.0);
    }
}
