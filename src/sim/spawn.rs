//! Procedural wave composition

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::asteroid::Asteroid;
use super::state::GameState;
use crate::Vec2Ext;

/// Base speed range for a fresh asteroid
const SPAWN_SPEED_MIN: f32 = 40.0;
const SPAWN_SPEED_MAX: f32 = 100.0;
/// Extra speed per wave after the first
const SPAWN_SPEED_PER_WAVE: f32 = 10.0;
/// Max deviation from the edge's inward normal (degrees)
const SPAWN_SPREAD: f32 = 30.0;

/// Screen edge an asteroid enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];

    /// Unit vector pointing into the screen (screen y grows downward)
    pub fn inward_normal(self) -> Vec2 {
        match self {
            Edge::Top => Vec2::Y,
            Edge::Bottom => Vec2::NEG_Y,
            Edge::Left => Vec2::X,
            Edge::Right => Vec2::NEG_X,
        }
    }

    /// Point at fraction `t` in [0, 1] along the edge
    pub fn point(self, t: f32, width: f32, height: f32) -> Vec2 {
        match self {
            Edge::Top => Vec2::new(t * width, 0.0),
            Edge::Bottom => Vec2::new(t * width, height),
            Edge::Left => Vec2::new(0.0, t * height),
            Edge::Right => Vec2::new(width, t * height),
        }
    }
}

/// Populate `state.asteroids` with wave `wave`. Returns how many were spawned.
pub fn spawn_wave(state: &mut GameState, wave: u32) -> usize {
    let GameState {
        config,
        rng,
        ids,
        asteroids,
        ..
    } = state;

    let count = (wave * config.asteroid_kinds) as usize;
    let (width, height) = (config.screen_width, config.screen_height);
    let elites_allowed = wave >= config.elite_min_wave;
    // `random_bool` panics outside [0, 1]
    let elite_chance = if config.elite_spawn_chance.is_finite() {
        config.elite_spawn_chance.clamp(0.0, 1.0) as f64
    } else {
        0.0
    };
    let mut elites = 0;

    for _ in 0..count {
        let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
        let speed = rng.random_range(SPAWN_SPEED_MIN..=SPAWN_SPEED_MAX)
            + wave.saturating_sub(1) as f32 * SPAWN_SPEED_PER_WAVE;
        let vel = edge
            .inward_normal()
            .rotate_deg(rng.random_range(-SPAWN_SPREAD..=SPAWN_SPREAD))
            * speed;
        let pos = edge.point(rng.random::<f32>(), width, height).wrap_toroidal(width, height);
        let size_class = rng.random_range(1..=config.asteroid_kinds);
        let radius = config.asteroid_min_radius * size_class as f32;

        let elite_name = if elites_allowed && rng.random_bool(elite_chance) {
            config.elite_types.choose(rng)
        } else {
            None
        };

        let asteroid = match elite_name {
            Some(name) => {
                elites += 1;
                Asteroid::elite_named(ids.next_id(), name, pos, vel, radius)
            }
            None => Asteroid::plain(ids.next_id(), pos, vel, radius),
        };
        asteroids.push(asteroid);
    }

    log::info!("Wave {}: spawned {} asteroids ({} elite)", wave, count, elites);
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    #[test]
    fn test_wave_size_scales_with_wave() {
        let mut state = GameState::new(GameConfig::default(), 11);
        assert_eq!(spawn_wave(&mut state, 1), 3);
        assert_eq!(state.asteroids.len(), 3);

        state.asteroids.clear();
        assert_eq!(spawn_wave(&mut state, 4), 12);
    }

    #[test]
    fn test_spawned_asteroids_are_on_screen_and_sized() {
        let mut state = GameState::new(GameConfig::default(), 12);
        spawn_wave(&mut state, 5);
        let min = state.config.asteroid_min_radius;
        for a in &state.asteroids {
            assert!(a.body.pos.x >= 0.0 && a.body.pos.x < 1280.0);
            assert!(a.body.pos.y >= 0.0 && a.body.pos.y < 720.0);
            assert!([min, 2.0 * min, 3.0 * min].contains(&a.body.radius));
            // 40..=100 plus 40 for wave 5
            let speed = a.body.vel.length();
            assert!((79.9..=140.1).contains(&speed), "speed {speed}");
        }
    }

    #[test]
    fn test_no_elites_before_min_wave() {
        let config = GameConfig {
            elite_spawn_chance: 1.0,
            ..Default::default()
        };
        let mut state = GameState::new(config, 13);
        spawn_wave(&mut state, 2);
        assert!(state.asteroids.iter().all(|a| !a.is_elite()));

        state.asteroids.clear();
        spawn_wave(&mut state, 3);
        assert!(state.asteroids.iter().all(|a| a.is_elite()));
    }

    #[test]
    fn test_out_of_range_elite_chance_is_clamped() {
        let config = GameConfig {
            elite_spawn_chance: 5.0,
            ..Default::default()
        };
        let mut state = GameState::new(config, 15);
        spawn_wave(&mut state, 3);
        assert!(state.asteroids.iter().all(|a| a.is_elite()));

        state.config.elite_spawn_chance = f32::NAN;
        state.asteroids.clear();
        spawn_wave(&mut state, 3);
        assert!(state.asteroids.iter().all(|a| !a.is_elite()));
    }

    #[test]
    fn test_unknown_elite_names_spawn_basic_elites() {
        let config = GameConfig {
            elite_spawn_chance: 1.0,
            elite_min_wave: 1,
            elite_types: vec!["mystery".into()],
            ..Default::default()
        };
        let mut state = GameState::new(config, 14);
        spawn_wave(&mut state, 1);
        assert!(
            state
                .asteroids
                .iter()
                .all(|a| a.kind == crate::sim::AsteroidKind::Basic)
        );
    }

    #[test]
    fn test_spawn_velocity_points_inward() {
        for edge in Edge::ALL {
            let n = edge.inward_normal();
            let p = edge.point(0.5, 1280.0, 720.0);
            let center = Vec2::new(640.0, 360.0);
            assert!(n.dot(center - p) > 0.0);
        }
    }
}
