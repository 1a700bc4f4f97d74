//! Melee combat: attack timing, hit boxes, damage and invulnerability
//!
//! Every combatant runs the same small state machine:
//! `Idle -> Windup -> Active -> Idle`. The hit box only exists while the
//! attack is `Active`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, Combatant, Rect};
use super::collision::{bodies_overlap, push_apart};
use super::enemy::Enemy;
use super::player::Player;
use super::state::{GameEvent, SoundCue};
use crate::consts::{WINDUP_START_ANGLE, WINDUP_STEP};
use crate::tuning::Tuning;

/// Timing and reach of one kind of attack
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackProfile {
    /// Hit box width, measured out from the leading edge
    pub reach: f32,
    pub damage: i32,
    /// Frames before another attack may start
    pub cooldown_frames: u32,
    /// Frames the hit box stays live once the windup finishes
    pub active_frames: u32,
    pub windup_start: f32,
    pub windup_step: f32,
}

impl AttackProfile {
    pub const fn new(reach: f32, damage: i32, cooldown_frames: u32, active_frames: u32) -> Self {
        Self {
            reach,
            damage,
            cooldown_frames,
            active_frames,
            windup_start: WINDUP_START_ANGLE,
            windup_step: WINDUP_STEP,
        }
    }
}

/// Where an attack is in its swing
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum AttackPhase {
    #[default]
    Idle,
    /// Swinging up; the angle climbs toward zero
    Windup { angle: f32 },
    /// Hit box live for the remaining frames
    Active { frames_left: u32 },
}

/// Result of trying to hurt a combatant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Already dead or still invulnerable
    Ignored,
    Wounded,
    Killed,
}

impl DamageOutcome {
    #[inline]
    pub fn landed(self) -> bool {
        self != DamageOutcome::Ignored
    }
}

/// Health and attack state carried by every combatant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatState {
    pub health: i32,
    pub max_health: i32,
    pub phase: AttackPhase,
    /// Frames until another attack may start
    pub cooldown: u32,
    /// While non-zero, incoming damage is ignored
    pub invulnerability: u32,
    pub attack: AttackProfile,
}

impl CombatState {
    pub fn new(max_health: i32, attack: AttackProfile) -> Self {
        Self {
            health: max_health,
            max_health,
            phase: AttackPhase::Idle,
            cooldown: 0,
            invulnerability: 0,
            attack,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    #[inline]
    pub fn is_attacking(&self) -> bool {
        self.phase != AttackPhase::Idle
    }

    #[inline]
    pub fn hit_box_active(&self) -> bool {
        matches!(self.phase, AttackPhase::Active { .. })
    }

    /// Begin a swing if the previous one is over and the cooldown has run out
    pub fn try_start_attack(&mut self) -> bool {
        if self.cooldown > 0 || self.is_attacking() {
            return false;
        }
        self.phase = AttackPhase::Windup {
            angle: self.attack.windup_start,
        };
        self.cooldown = self.attack.cooldown_frames;
        true
    }

    /// Advance timers by one frame
    pub fn tick(&mut self) {
        self.cooldown = self.cooldown.saturating_sub(1);
        self.invulnerability = self.invulnerability.saturating_sub(1);

        self.phase = match self.phase {
            AttackPhase::Idle => AttackPhase::Idle,
            AttackPhase::Windup { angle } => {
                let angle = angle + self.attack.windup_step;
                if angle < 0.0 {
                    AttackPhase::Windup { angle }
                } else if self.attack.active_frames == 0 {
                    AttackPhase::Idle
                } else {
                    AttackPhase::Active {
                        frames_left: self.attack.active_frames,
                    }
                }
            }
            AttackPhase::Active { frames_left } if frames_left > 1 => AttackPhase::Active {
                frames_left: frames_left - 1,
            },
            AttackPhase::Active { .. } => AttackPhase::Idle,
        };
    }

    /// Damage region in front of `body`, present only while the swing is live
    pub fn attack_box(&self, body: &Body) -> Option<Rect> {
        if !self.hit_box_active() {
            return None;
        }
        let reach = self.attack.reach;
        let x = if body.facing_right {
            body.pos.x + body.size.x
        } else {
            body.pos.x - reach
        };
        Some(Rect::new(Vec2::new(x, body.pos.y), Vec2::new(reach, body.size.y)))
    }

    /// Take `amount` damage unless dead or invulnerable. A landed hit opens an
    /// invulnerability window of `window` frames.
    pub fn apply_damage(&mut self, amount: i32, window: u32) -> DamageOutcome {
        if !self.is_alive() || self.invulnerability > 0 {
            return DamageOutcome::Ignored;
        }
        self.health = (self.health - amount).max(0);
        self.invulnerability = window;
        if self.is_alive() {
            DamageOutcome::Wounded
        } else {
            DamageOutcome::Killed
        }
    }

    /// Drop health to zero regardless of invulnerability. Returns false if
    /// already dead.
    pub fn kill(&mut self) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.health = 0;
        true
    }

    /// Restore health up to the maximum. Returns the amount restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        if !self.is_alive() {
            return 0;
        }
        let before = self.health;
        self.health = (self.health + amount.max(0)).min(self.max_health);
        self.health - before
    }
}

/// Apply the attacker's live hit box to the defender, if they overlap
pub fn strike<A, D>(attacker: &A, defender: &mut D) -> Option<DamageOutcome>
where
    A: Combatant + ?Sized,
    D: Combatant + ?Sized,
{
    let hit_box = attacker.combat().attack_box(attacker.body())?;
    if !hit_box.intersects(&defender.body().rect()) {
        return None;
    }
    let window = defender.invulnerability_window();
    let damage = attacker.combat().attack.damage;
    Some(defender.combat_mut().apply_damage(damage, window))
}

fn player_hurt(player: &Player, amount: i32, events: &mut Vec<GameEvent>) {
    events.push(GameEvent::PlayerDamaged {
        amount,
        health: player.combat.health,
    });
    events.push(GameEvent::DamageEffect {
        pos: player.body.center(),
    });
    events.push(GameEvent::Sound(SoundCue::Hurt));
}

/// Resolve all melee exchanges for this frame.
///
/// Order: the player's swing against each enemy, body contact against each
/// enemy, then every enemy swing against the player.
pub fn resolve_melee(player: &mut Player, enemies: &mut [Enemy], tuning: &Tuning, events: &mut Vec<GameEvent>) {
    for enemy in enemies.iter_mut().filter(|e| e.combat.is_alive()) {
        if strike(&*player, enemy).is_some_and(DamageOutcome::landed) {
            log::debug!("Enemy {} hit, health {}", enemy.id, enemy.combat.health);
            events.push(GameEvent::EnemyDamaged {
                id: enemy.id,
                amount: player.combat.attack.damage,
                health: enemy.combat.health,
            });
            events.push(GameEvent::DamageEffect {
                pos: enemy.body.center(),
            });
            events.push(GameEvent::Sound(SoundCue::EnemyHurt));
        }

        if !player.combat.is_attacking() && bodies_overlap(&player.body, &enemy.body) {
            let window = player.invulnerability_window;
            if player.combat.apply_damage(tuning.contact_damage, window).landed() {
                player_hurt(player, tuning.contact_damage, events);
            }
            push_apart(&mut player.body, &mut enemy.body, tuning.push_force);
        }
    }

    for enemy in enemies.iter().filter(|e| e.combat.is_alive()) {
        if strike(enemy, player).is_some_and(DamageOutcome::landed) {
            player_hurt(player, enemy.combat.attack.damage, events);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sword() -> AttackProfile {
        AttackProfile::new(40.0, 20, 30, 10)
    }

    fn swing_to_active(state: &mut CombatState) -> u32 {
        assert!(state.try_start_attack());
        let mut frames = 0;
        while !state.hit_box_active() {
            state.tick();
            frames += 1;
            assert!(frames < 100, "windup never finished");
        }
        frames
    }

    #[test]
    fn test_attack_requires_cooldown_and_idle() {
        let mut state = CombatState::new(100, sword());
        assert!(state.try_start_attack());
        assert_eq!(state.cooldown, 30);
        // Already swinging
        assert!(!state.try_start_attack());
    }

    #[test]
    fn test_windup_then_active_then_idle() {
        let mut state = CombatState::new(100, sword());
        let windup = swing_to_active(&mut state);
        // -7π/18 climbing by 0.3 per frame crosses zero on the fifth frame
        assert_eq!(windup, 5);

        let mut active = 0;
        while state.hit_box_active() {
            active += 1;
            state.tick();
        }
        assert_eq!(active, 10);
        assert_eq!(state.phase, AttackPhase::Idle);
        assert!(!state.is_attacking());
    }

    #[test]
    fn test_cooldown_blocks_until_elapsed() {
        let mut state = CombatState::new(100, sword());
        assert!(state.try_start_attack());
        for _ in 0..29 {
            state.tick();
            assert!(!state.try_start_attack());
        }
        state.tick();
        assert!(state.try_start_attack());
    }

    #[test]
    fn test_attack_box_only_while_active() {
        let body = Body::new(Vec2::new(100.0, 50.0), Vec2::new(30.0, 50.0));
        let mut state = CombatState::new(100, sword());
        assert!(state.attack_box(&body).is_none());

        assert!(state.try_start_attack());
        assert!(state.is_attacking());
        assert!(state.attack_box(&body).is_none());

        while !state.hit_box_active() {
            state.tick();
        }
        let hit_box = state.attack_box(&body).unwrap();
        assert_eq!(hit_box, Rect::new(Vec2::new(130.0, 50.0), Vec2::new(40.0, 50.0)));
    }

    #[test]
    fn test_attack_box_faces_left() {
        let mut body = Body::new(Vec2::new(100.0, 50.0), Vec2::new(30.0, 50.0));
        body.facing_right = false;
        let mut state = CombatState::new(100, sword());
        swing_to_active(&mut state);
        let hit_box = state.attack_box(&body).unwrap();
        assert_eq!(hit_box.pos, Vec2::new(60.0, 50.0));
    }

    #[test]
    fn test_invulnerability_blocks_damage() {
        let mut state = CombatState::new(100, sword());
        assert_eq!(state.apply_damage(10, 60), DamageOutcome::Wounded);
        assert_eq!(state.health, 90);
        assert_eq!(state.apply_damage(10, 60), DamageOutcome::Ignored);
        assert_eq!(state.health, 90);

        for _ in 0..60 {
            state.tick();
        }
        assert_eq!(state.apply_damage(10, 60), DamageOutcome::Wounded);
        assert_eq!(state.health, 80);
    }

    #[test]
    fn test_health_clamps_at_zero_and_death_is_final() {
        let mut state = CombatState::new(15, sword());
        assert_eq!(state.apply_damage(20, 0), DamageOutcome::Killed);
        assert_eq!(state.health, 0);
        assert_eq!(state.apply_damage(20, 0), DamageOutcome::Ignored);
        assert!(!state.kill());
        assert_eq!(state.heal(10), 0);
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut state = CombatState::new(100, sword());
        state.apply_damage(5, 0);
        assert_eq!(state.heal(10), 5);
        assert_eq!(state.health, 100);
    }
}
