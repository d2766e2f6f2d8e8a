//! Runtime game configuration
//!
//! Mirrors every constant in [`crate::consts`]. Loaded once at startup from an
//! optional JSON file; missing keys fall back to the compiled defaults, so a
//! file can override just the values you care about.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Game balance and screen settings, immutable for the duration of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Asteroids ===
    /// Smallest radius; asteroids at or below it never split
    pub asteroid_min_radius: f32,
    /// Size classes per asteroid, also the spawn count per wave number
    pub asteroid_kinds: u32,

    // === Player ===
    pub player_radius: f32,
    pub player_turn_speed: f32,
    pub player_speed: f32,
    pub player_shoot_speed: f32,
    pub player_shoot_cooldown: f32,
    pub player_max_hp: u32,

    // === Shots ===
    pub shot_radius: f32,
    pub shot_lifetime: f32,

    // === Elites ===
    pub elite_spawn_chance: f32,
    pub elite_min_wave: u32,
    /// Elite type names; unknown names spawn the basic elite
    pub elite_types: Vec<String>,

    // === Waves ===
    pub wave_countdown: f32,
    pub perk_selection_after_wave: bool,
    pub perk_choices: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            asteroid_min_radius: ASTEROID_MIN_RADIUS,
            asteroid_kinds: ASTEROID_KINDS,

            player_radius: PLAYER_RADIUS,
            player_turn_speed: PLAYER_TURN_SPEED,
            player_speed: PLAYER_SPEED,
            player_shoot_speed: PLAYER_SHOOT_SPEED,
            player_shoot_cooldown: PLAYER_SHOOT_COOLDOWN,
            player_max_hp: PLAYER_MAX_HP,

            shot_radius: SHOT_RADIUS,
            shot_lifetime: SHOT_LIFETIME,

            elite_spawn_chance: ELITE_SPAWN_CHANCE,
            elite_min_wave: ELITE_MIN_WAVE,
            elite_types: ELITE_TYPES.iter().map(|s| s.to_string()).collect(),

            wave_countdown: WAVE_COUNTDOWN,
            perk_selection_after_wave: PERK_SELECTION_AFTER_WAVE,
            perk_choices: PERK_CHOICES,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Load from `path`, falling back to defaults on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No config at {}; using compiled defaults", path.display());
            return Self::default();
        }

        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("{e}; using compiled defaults");
                Self::default()
            }
        }
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be a positive finite number",
                })
            }
        }

        positive("screen_width", self.screen_width)?;
        positive("screen_height", self.screen_height)?;
        positive("asteroid_min_radius", self.asteroid_min_radius)?;
        positive("player_radius", self.player_radius)?;
        positive("player_speed", self.player_speed)?;
        positive("player_turn_speed", self.player_turn_speed)?;
        positive("player_shoot_speed", self.player_shoot_speed)?;
        positive("shot_radius", self.shot_radius)?;
        positive("shot_lifetime", self.shot_lifetime)?;

        if self.asteroid_kinds == 0 {
            return Err(ConfigError::Invalid {
                field: "asteroid_kinds",
                reason: "must be at least 1",
            });
        }
        if self.perk_choices == 0 {
            return Err(ConfigError::Invalid {
                field: "perk_choices",
                reason: "must be at least 1",
            });
        }
        if self.player_max_hp == 0 {
            return Err(ConfigError::Invalid {
                field: "player_max_hp",
                reason: "must be at least 1",
            });
        }
        if !(0.0..=1.0).contains(&self.elite_spawn_chance) {
            return Err(ConfigError::Invalid {
                field: "elite_spawn_chance",
                reason: "must be within [0, 1]",
            });
        }
        if self.wave_countdown < 0.0 || !self.wave_countdown.is_finite() {
            return Err(ConfigError::Invalid {
                field: "wave_countdown",
                reason: "must be a non-negative finite number",
            });
        }
        if self.player_shoot_cooldown < 0.0 {
            return Err(ConfigError::Invalid {
                field: "player_shoot_cooldown",
                reason: "must not be negative",
            });
        }

        Ok(())
    }
}
