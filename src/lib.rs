//! Beaker's Revenge - A wave-based asteroid shooter
//!
//! Core modules:
//! - `sim`: Seeded simulation (motion, collisions, combat, wave flow)
//! - `platform`: Input/renderer collaborator traits and headless implementations
//! - `config`: Runtime-tunable game constants

pub mod config;
pub mod error;
pub mod platform;
pub mod sim;

pub use config::GameConfig;
pub use error::ConfigError;

use glam::Vec2;

/// Game configuration constants (defaults for [`GameConfig`])
pub mod consts {
    /// Fixed frame delta used by the headless runner (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Largest measured frame delta fed to the sim
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Screen dimensions
    pub const SCREEN_WIDTH: f32 = 1280.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;

    /// Asteroid sizing: radii are multiples of the minimum
    pub const ASTEROID_MIN_RADIUS: f32 = 20.0;
    pub const ASTEROID_KINDS: u32 = 3;
    pub const ASTEROID_MAX_RADIUS: f32 = ASTEROID_MIN_RADIUS * ASTEROID_KINDS as f32;

    /// Player ship
    pub const PLAYER_RADIUS: f32 = 20.0;
    /// Degrees per second
    pub const PLAYER_TURN_SPEED: f32 = 300.0;
    pub const PLAYER_SPEED: f32 = 20.0;
    pub const PLAYER_SHOOT_SPEED: f32 = 500.0;
    pub const PLAYER_SHOOT_COOLDOWN: f32 = 2.0;
    pub const PLAYER_MAX_HP: u32 = 3;

    /// Shots
    pub const SHOT_RADIUS: f32 = 5.0;
    pub const SHOT_LIFETIME: f32 = 2.0;

    /// Elites start appearing from this wave
    pub const ELITE_MIN_WAVE: u32 = 3;
    pub const ELITE_SPAWN_CHANCE: f32 = 0.15;
    pub const ELITE_TYPES: [&str; 3] = ["exploder", "shielded", "swarm_leader"];

    /// Seconds between a cleared wave and the next spawn
    pub const WAVE_COUNTDOWN: f32 = 3.0;
    pub const PERK_SELECTION_AFTER_WAVE: bool = true;
    pub const PERK_CHOICES: usize = 3;
}

/// Vector helpers on top of glam, angles in degrees
pub trait Vec2Ext {
    /// Rotate counter-clockwise by `degrees`
    fn rotate_deg(self, degrees: f32) -> Vec2;
    /// Wrap onto the `[0, width) x [0, height)` torus
    fn wrap_toroidal(self, width: f32, height: f32) -> Vec2;
    /// Direction of this vector in degrees, in `[0, 360)`
    fn angle_deg(self) -> f32;
}

impl Vec2Ext for Vec2 {
    #[inline]
    fn rotate_deg(self, degrees: f32) -> Vec2 {
        Vec2::from_angle(degrees.to_radians()).rotate(self)
    }

    #[inline]
    fn wrap_toroidal(self, width: f32, height: f32) -> Vec2 {
        Vec2::new(wrap_coord(self.x, width), wrap_coord(self.y, height))
    }

    #[inline]
    fn angle_deg(self) -> f32 {
        normalize_degrees(self.y.atan2(self.x).to_degrees())
    }
}

/// Non-negative modulo that never lands on `extent` itself.
///
/// `rem_euclid` can round a tiny negative value up to exactly `extent`.
#[inline]
fn wrap_coord(value: f32, extent: f32) -> f32 {
    let wrapped = value.rem_euclid(extent);
    if wrapped >= extent { 0.0 } else { wrapped }
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    wrap_coord(angle, 360.0)
}

/// Signed shortest difference `to - from` in degrees, in [-180, 180)
#[inline]
pub fn angle_delta_deg(from: f32, to: f32) -> f32 {
    (to - from + 180.0).rem_euclid(360.0) - 180.0
}
