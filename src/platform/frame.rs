//! Render snapshot handed to a [`Renderer`](super::Renderer) once per tick

use glam::Vec2;
use serde::Serialize;

use crate::sim::{AsteroidKind, GamePhase, GameState, Perk};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AsteroidView {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub health: f32,
    /// Includes kind-specific visual state (primed flag, shield angle)
    pub kind: AsteroidKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShotView {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub pierce: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub rotation: f32,
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AbilityView {
    pub name: String,
    pub active: bool,
    pub cooldown: f32,
}

/// Heads-up display values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub credits: u64,
    pub wave: u32,
    pub hp: u32,
    pub max_hp: u32,
    pub speed_multiplier: f32,
    pub fire_rate_multiplier: f32,
    pub bullet_pierce: u32,
    pub perks: Vec<String>,
    pub abilities: Vec<AbilityView>,
}

/// Full-screen UI layered over the playfield
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "overlay", rename_all = "snake_case")]
pub enum Overlay {
    None,
    /// Whole seconds left, rounded up
    WaveCountdown { wave: u32, seconds: u32 },
    PerkCards { perks: Vec<Perk> },
    GameOver { credits: u64, wave: u32 },
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub tick: u64,
    pub phase: GamePhase,
    pub player: PlayerView,
    pub asteroids: Vec<AsteroidView>,
    pub shots: Vec<ShotView>,
    pub hud: Hud,
    pub overlay: Overlay,
}

impl Frame {
    /// Snapshot the live entities and UI state
    pub fn capture(state: &GameState) -> Self {
        let player = &state.player;

        let asteroids = state
            .asteroids
            .iter()
            .filter(|a| a.alive)
            .map(|a| AsteroidView {
                id: a.id,
                pos: a.body.pos,
                radius: a.body.radius,
                health: a.health,
                kind: a.kind,
            })
            .collect();

        let shots = state
            .shots
            .iter()
            .filter(|s| s.alive)
            .map(|s| ShotView {
                id: s.id,
                pos: s.body.pos,
                radius: s.body.radius,
                pierce: s.pierce,
            })
            .collect();

        let hud = Hud {
            credits: state.credits,
            wave: state.wave,
            hp: player.hp,
            max_hp: player.max_hp,
            speed_multiplier: player.speed_multiplier,
            fire_rate_multiplier: player.fire_rate_multiplier,
            bullet_pierce: player.bullet_pierce,
            perks: player.perks.iter().map(|p| p.name.clone()).collect(),
            abilities: player
                .active_abilities
                .iter()
                .map(|a| AbilityView {
                    name: a.perk.name.clone(),
                    active: a.active,
                    cooldown: a.cooldown,
                })
                .collect(),
        };

        let overlay = match state.phase {
            GamePhase::Playing => Overlay::None,
            GamePhase::WaveTransition => Overlay::WaveCountdown {
                wave: state.wave,
                seconds: state.countdown.max(0.0).ceil() as u32,
            },
            GamePhase::PerkSelection => Overlay::PerkCards {
                perks: state.perk_offers.clone(),
            },
            GamePhase::GameOver => Overlay::GameOver {
                credits: state.credits,
                wave: state.wave,
            },
        };

        Self {
            tick: state.time_ticks,
            phase: state.phase,
            player: PlayerView {
                pos: player.body.pos,
                rotation: player.rotation,
                radius: player.body.radius,
            },
            asteroids,
            shots,
            hud,
            overlay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::{Asteroid, EliteType};

    #[test]
    fn test_new_game_shows_countdown() {
        let state = GameState::new(GameConfig::default(), 1);
        let frame = Frame::capture(&state);
        assert_eq!(frame.overlay, Overlay::WaveCountdown { wave: 1, seconds: 3 });
        assert_eq!(frame.hud.hp, 3);
        assert!(frame.asteroids.is_empty());
    }

    #[test]
    fn test_dead_entities_are_not_drawn() {
        let mut state = GameState::new(GameConfig::default(), 2);
        state.phase = GamePhase::Playing;
        let id = state.next_entity_id();
        state.asteroids.push(Asteroid::elite(
            id,
            EliteType::Shielded,
            Vec2::new(100.0, 100.0),
            Vec2::ZERO,
            40.0,
        ));
        let id = state.next_entity_id();
        let mut dead = Asteroid::plain(id, Vec2::new(200.0, 100.0), Vec2::ZERO, 20.0);
        dead.alive = false;
        state.asteroids.push(dead);

        let frame = Frame::capture(&state);
        assert_eq!(frame.overlay, Overlay::None);
        assert_eq!(frame.asteroids.len(), 1);
        assert!(matches!(frame.asteroids[0].kind, AsteroidKind::Shielded { .. }));
    }

    #[test]
    fn test_frame_serializes_kind_state() {
        let mut state = GameState::new(GameConfig::default(), 3);
        let id = state.next_entity_id();
        state.asteroids.push(Asteroid::elite(
            id,
            EliteType::Exploder,
            Vec2::new(100.0, 100.0),
            Vec2::ZERO,
            40.0,
        ));
        let json = serde_json::to_string(&Frame::capture(&state)).unwrap();
        assert!(json.contains("\"explosion_primed\":false"));
        assert!(json.contains("\"overlay\":\"wave_countdown\""));
    }

    #[test]
    fn test_game_over_overlay() {
        let mut state = GameState::new(GameConfig::default(), 4);
        state.phase = GamePhase::GameOver;
        state.credits = 42;
        state.wave = 5;
        assert_eq!(
            Frame::capture(&state).overlay,
            Overlay::GameOver { credits: 42, wave: 5 }
        );
    }
}
