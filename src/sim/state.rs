//! Game state and core simulation types
//!
//! Everything one run needs lives in [`GameState`]; there is no global state.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::asteroid::Asteroid;
use super::perk::{Perk, PerkCatalog};
use super::player::Player;
use super::shot::Shot;
use crate::config::GameConfig;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Countdown before the next wave spawns
    WaveTransition,
    /// Waiting for the player to pick a perk card
    PerkSelection,
    /// Run ended (terminal until restart)
    GameOver,
}

/// Things that happened during a tick, for HUD, audio and logging frontends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    WaveStarted { wave: u32, asteroids: usize },
    WaveCleared { wave: u32 },
    AsteroidDestroyed { id: u32, credits: u32, children: usize },
    /// A shot landed on a shield arc
    ShotBlocked { asteroid: u32 },
    PlayerHit { hp: u32 },
    PerkOffered { count: usize },
    PerkSelected { name: String },
    AbilityUsed { name: String },
    GameOver { credits: u64, wave: u32 },
    Restarted,
}

/// Monotonic entity ID allocator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityIds {
    next: u32,
}

impl Default for EntityIds {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl EntityIds {
    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Immutable for the whole run
    pub config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    /// The only source of randomness in the sim
    pub rng: Pcg32,
    /// Current wave (1-based)
    pub wave: u32,
    pub credits: u64,
    pub phase: GamePhase,
    /// Seconds left in the wave transition
    pub countdown: f32,
    pub player: Player,
    /// Live asteroids (dead ones are swept at the end of each tick)
    pub asteroids: Vec<Asteroid>,
    /// Live shots (dead ones are swept at the end of each tick)
    pub shots: Vec<Shot>,
    pub perk_catalog: PerkCatalog,
    /// Cards shown during perk selection
    pub perk_offers: Vec<Perk>,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    /// Set by the quit input; the frontend should stop the loop
    pub quit_requested: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub(crate) ids: EntityIds,
}

impl GameState {
    /// Create a new game with the given seed, counting down to wave 1.
    /// `config` is expected to have passed [`GameConfig::validate`].
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let player = Player::new(
            Vec2::new(config.screen_width / 2.0, config.screen_height / 2.0),
            &config,
        );
        let countdown = config.wave_countdown;
        Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            wave: 1,
            credits: 0,
            phase: GamePhase::WaveTransition,
            countdown,
            player,
            asteroids: Vec::new(),
            shots: Vec::new(),
            perk_catalog: PerkCatalog::default(),
            perk_offers: Vec::new(),
            events: Vec::new(),
            quit_requested: false,
            time_ticks: 0,
            ids: EntityIds::default(),
        }
    }

    /// Re-initialize everything with the same config and a fresh seed
    pub fn restart(&mut self) {
        let seed = self.rng.random::<u64>();
        let catalog = std::mem::take(&mut self.perk_catalog);
        *self = GameState::new(self.config.clone(), seed);
        self.perk_catalog = catalog;
        self.events.push(GameEvent::Restarted);
        log::info!("Restarted with seed {}", seed);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        self.ids.next_id()
    }

    /// Take all events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Drop destroyed entities and keep iteration order stable by ID
    pub fn sweep_dead(&mut self) {
        self.asteroids.retain(|a| a.alive);
        self.shots.retain(|s| s.alive);
        self.asteroids.sort_by_key(|a| a.id);
        self.shots.sort_by_key(|s| s.id);
    }

    /// Number of asteroids still alive
    pub fn live_asteroids(&self) -> usize {
        self.asteroids.iter().filter(|a| a.alive).count()
    }
}
