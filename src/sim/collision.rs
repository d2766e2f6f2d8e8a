//! Collision detection and combat resolution
//!
//! Every live asteroid is tested against the player and then against every
//! live shot. Destroyed entities are tombstoned (`alive = false`) and swept by
//! the caller, so one pass can kill several asteroids without disturbing the
//! iteration. Split children are appended only after the pass.

use glam::Vec2;

use super::asteroid::Asteroid;
use super::state::{GameEvent, GameState};
use crate::Vec2Ext;

/// Outcome of one collision pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Asteroids destroyed by shots
    pub destroyed: usize,
    pub credits_awarded: u64,
    /// Asteroids that rammed the player
    pub player_hits: u32,
    /// Children added by splits
    pub spawned: usize,
}

/// Direction from the target's center to the point of impact, degrees [0, 360)
#[inline]
pub fn attack_angle(target: Vec2, impact: Vec2) -> f32 {
    (impact - target).angle_deg()
}

/// Resolve all player/asteroid and shot/asteroid overlaps for this tick
pub fn resolve_collisions(state: &mut GameState) -> CollisionReport {
    let GameState {
        config,
        rng,
        ids,
        asteroids,
        shots,
        player,
        credits,
        events,
        ..
    } = state;

    let mut report = CollisionReport::default();
    let mut children: Vec<Asteroid> = Vec::new();

    for asteroid in asteroids.iter_mut() {
        if !asteroid.alive {
            continue;
        }

        // Rammed: asteroid is gone, no credits
        if player.body.overlaps(&asteroid.body) {
            asteroid.alive = false;
            let hp = player.take_hit();
            report.player_hits += 1;
            events.push(GameEvent::PlayerHit { hp });
            log::debug!("Asteroid {} hit the player, hp now {}", asteroid.id, hp);
            continue;
        }

        for shot in shots.iter_mut() {
            if !shot.alive || !shot.body.overlaps(&asteroid.body) {
                continue;
            }

            let angle = attack_angle(asteroid.body.pos, shot.body.pos);
            shot.register_hit();

            if !asteroid.is_vulnerable_to_attack(angle) {
                events.push(GameEvent::ShotBlocked {
                    asteroid: asteroid.id,
                });
            }

            if asteroid.take_damage(angle, rng) {
                asteroid.alive = false;
                *credits += asteroid.credits_value as u64;
                report.credits_awarded += asteroid.credits_value as u64;
                report.destroyed += 1;

                let split = asteroid.split(config.asteroid_min_radius, rng, ids);
                log::debug!(
                    "Asteroid {} ({:?}) destroyed for {} credits, {} children",
                    asteroid.id,
                    asteroid.kind,
                    asteroid.credits_value,
                    split.len()
                );
                events.push(GameEvent::AsteroidDestroyed {
                    id: asteroid.id,
                    credits: asteroid.credits_value,
                    children: split.len(),
                });
                report.spawned += split.len();
                children.extend(split);
                break;
            }
        }
    }

    asteroids.extend(children);
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::asteroid::{AsteroidKind, EliteType};
    use crate::sim::shot::Shot;

    fn state() -> GameState {
        let mut state = GameState::new(GameConfig::default(), 21);
        // Park the player in a corner away from the action
        state.player.body.pos = Vec2::new(5.0, 5.0);
        state
    }

    fn add_plain(state: &mut GameState, pos: Vec2, radius: f32) -> u32 {
        let id = state.next_entity_id();
        state.asteroids.push(Asteroid::plain(id, pos, Vec2::new(10.0, 0.0), radius));
        id
    }

    fn add_shot(state: &mut GameState, pos: Vec2, pierce: u32) -> u32 {
        let id = state.next_entity_id();
        state.shots.push(Shot::new(id, pos, Vec2::ZERO, 5.0, pierce, 2.0));
        id
    }

    #[test]
    fn test_attack_angle() {
        let target = Vec2::new(100.0, 100.0);
        assert!((attack_angle(target, Vec2::new(110.0, 100.0)) - 0.0).abs() < 1e-4);
        assert!((attack_angle(target, Vec2::new(100.0, 110.0)) - 90.0).abs() < 1e-4);
        assert!((attack_angle(target, Vec2::new(90.0, 100.0)) - 180.0).abs() < 1e-4);
    }

    #[test]
    fn test_shot_destroys_min_asteroid() {
        let mut s = state();
        add_plain(&mut s, Vec2::new(300.0, 300.0), 20.0);
        add_shot(&mut s, Vec2::new(310.0, 300.0), 0);

        let report = resolve_collisions(&mut s);
        assert_eq!(report.destroyed, 1);
        assert_eq!(report.spawned, 0);
        assert_eq!(s.credits, 1);
        assert!(!s.asteroids[0].alive);
        assert!(!s.shots[0].alive);
    }

    #[test]
    fn test_destroyed_asteroid_splits() {
        let mut s = state();
        add_plain(&mut s, Vec2::new(300.0, 300.0), 60.0);
        add_shot(&mut s, Vec2::new(300.0, 300.0), 0);

        resolve_collisions(&mut s);
        s.sweep_dead();
        assert_eq!(s.asteroids.len(), 2);
        assert!(s.asteroids.iter().all(|a| a.body.radius == 40.0 && a.alive));
    }

    #[test]
    fn test_miss_changes_nothing() {
        let mut s = state();
        add_plain(&mut s, Vec2::new(300.0, 300.0), 20.0);
        // Exactly touching is not a hit
        add_shot(&mut s, Vec2::new(325.0, 300.0), 0);
        let report = resolve_collisions(&mut s);
        assert_eq!(report, CollisionReport::default());
        assert!(s.asteroids[0].alive && s.shots[0].alive);
    }

    #[test]
    fn test_pierce_survives_two_hits_in_one_pass() {
        let mut s = state();
        for x in [300.0, 340.0, 380.0] {
            add_plain(&mut s, Vec2::new(x, 300.0), 20.0);
        }
        // Shot overlapping all three at once
        let id = s.next_entity_id();
        s.shots.push(Shot::new(id, Vec2::new(340.0, 300.0), Vec2::ZERO, 45.0, 2, 2.0));

        let report = resolve_collisions(&mut s);
        assert_eq!(report.destroyed, 3);
        assert!(!s.shots[0].alive);
        assert_eq!(s.shots[0].pierce, 0);
    }

    #[test]
    fn test_pierce_across_frames() {
        let mut s = state();
        add_shot(&mut s, Vec2::new(300.0, 300.0), 2);

        for (i, x) in [300.0, 600.0, 900.0].into_iter().enumerate() {
            add_plain(&mut s, Vec2::new(x, 300.0), 20.0);
            s.shots[0].body.pos = Vec2::new(x, 300.0);
            resolve_collisions(&mut s);
            s.sweep_dead();
            if i < 2 {
                assert_eq!(s.shots.len(), 1, "shot should survive hit {}", i + 1);
                assert_eq!(s.shots[0].pierce, 1 - i as u32);
            }
        }
        assert!(s.shots.is_empty());
        assert_eq!(s.credits, 3);
    }

    #[test]
    fn test_credits_for_plain_and_elite_in_one_tick() {
        let mut s = state();
        add_plain(&mut s, Vec2::new(300.0, 300.0), 20.0);
        let id = s.next_entity_id();
        let mut elite = Asteroid::elite(id, EliteType::SwarmLeader, Vec2::new(600.0, 300.0), Vec2::ZERO, 20.0);
        elite.health = 1.0;
        elite.credits_value = 3;
        s.asteroids.push(elite);

        add_shot(&mut s, Vec2::new(300.0, 300.0), 0);
        add_shot(&mut s, Vec2::new(600.0, 300.0), 0);

        let report = resolve_collisions(&mut s);
        assert_eq!(report.credits_awarded, 4);
        assert_eq!(s.credits, 4);
    }

    #[test]
    fn test_shield_halves_damage_from_covered_side() {
        let mut s = state();
        let id = s.next_entity_id();
        let shielded = Asteroid::elite(id, EliteType::Shielded, Vec2::new(300.0, 300.0), Vec2::ZERO, 40.0);
        s.asteroids.push(shielded);

        // Shield centered on 0 degrees, shot lands at 90 (covered edge)
        add_shot(&mut s, Vec2::new(300.0, 330.0), 0);
        resolve_collisions(&mut s);
        assert_eq!(s.asteroids[0].health, 3.5);
        assert!(s.events.contains(&GameEvent::ShotBlocked { asteroid: id }));

        // From behind: full damage
        add_shot(&mut s, Vec2::new(270.0, 300.0), 0);
        resolve_collisions(&mut s);
        assert_eq!(s.asteroids[0].health, 2.5);
    }

    #[test]
    fn test_dead_asteroid_not_processed_twice() {
        let mut s = state();
        add_plain(&mut s, Vec2::new(300.0, 300.0), 20.0);
        add_shot(&mut s, Vec2::new(300.0, 300.0), 0);
        add_shot(&mut s, Vec2::new(301.0, 300.0), 0);

        let report = resolve_collisions(&mut s);
        assert_eq!(report.destroyed, 1);
        assert_eq!(s.credits, 1);
        // Second shot was not spent on the corpse
        assert!(s.shots[1].alive);
    }

    #[test]
    fn test_player_ram_costs_hp_without_credits() {
        let mut s = state();
        s.player.body.pos = Vec2::new(500.0, 500.0);
        let id = s.next_entity_id();
        s.asteroids.push(Asteroid::elite(id, EliteType::Exploder, Vec2::new(520.0, 500.0), Vec2::ZERO, 60.0));

        let report = resolve_collisions(&mut s);
        assert_eq!(report.player_hits, 1);
        assert_eq!(report.spawned, 0);
        assert_eq!(s.player.hp, 2);
        assert_eq!(s.credits, 0);
        assert!(!s.asteroids[0].alive);
        assert!(matches!(s.asteroids[0].kind, AsteroidKind::Exploder { .. }));
    }
}
