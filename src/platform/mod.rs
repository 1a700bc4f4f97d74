//! Platform abstraction layer
//!
//! The simulation never draws or plays audio itself. It reports what
//! happened as [`GameEvent`]s and a [`Presenter`] turns the cosmetic ones
//! into particles and sounds. Delivery is fire-and-forget.

use glam::Vec2;

use crate::sim::{GameEvent, SoundCue};

/// Receiver for cosmetic effects. Every method defaults to a no-op.
pub trait Presenter {
    fn attack_effect(&mut self, _pos: Vec2) {}
    fn damage_effect(&mut self, _pos: Vec2) {}
    fn death_effect(&mut self, _pos: Vec2) {}
    fn play_sound(&mut self, _cue: SoundCue) {}
}

/// Forward the cosmetic events of a frame to `presenter`
pub fn dispatch<P: Presenter + ?Sized>(presenter: &mut P, events: &[GameEvent]) {
    for event in events {
        match *event {
            GameEvent::AttackEffect { pos } => presenter.attack_effect(pos),
            GameEvent::DamageEffect { pos } => presenter.damage_effect(pos),
            GameEvent::DeathEffect { pos } => presenter.death_effect(pos),
            GameEvent::Sound(cue) => presenter.play_sound(cue),
            _ => {}
        }
    }
}

/// Presenter for headless runs: writes effects to the log
#[derive(Debug, Default)]
pub struct LogPresenter;

impl Presenter for LogPresenter {
    fn attack_effect(&mut self, pos: Vec2) {
        log::trace!("attack effect at ({:.0}, {:.0})", pos.x, pos.y);
    }

    fn damage_effect(&mut self, pos: Vec2) {
        log::trace!("damage effect at ({:.0}, {:.0})", pos.x, pos.y);
    }

    fn death_effect(&mut self, pos: Vec2) {
        log::debug!("death effect at ({:.0}, {:.0})", pos.x, pos.y);
    }

    fn play_sound(&mut self, cue: SoundCue) {
        log::trace!("sound {:?}", cue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        sounds: Vec<SoundCue>,
        deaths: usize,
    }

    impl Presenter for Recorder {
        fn death_effect(&mut self, _pos: Vec2) {
            self.deaths += 1;
        }

        fn play_sound(&mut self, cue: SoundCue) {
            self.sounds.push(cue);
        }
    }

    #[test]
    fn test_dispatch_routes_cosmetic_events() {
        let events = vec![
            GameEvent::Sound(SoundCue::Jump),
            GameEvent::PlayerFell,
            GameEvent::DeathEffect { pos: Vec2::ZERO },
            GameEvent::AttackEffect { pos: Vec2::ONE },
            GameEvent::Sound(SoundCue::EnemyDeath),
        ];
        let mut recorder = Recorder::default();

        dispatch(&mut recorder, &events);

        assert_eq!(recorder.sounds, vec![SoundCue::Jump, SoundCue::EnemyDeath]);
        assert_eq!(recorder.deaths, 1);
    }
}
