//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only (owned by `GameState`)
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod asteroid;
pub mod body;
pub mod collision;
pub mod perk;
pub mod player;
pub mod shot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use asteroid::{Asteroid, AsteroidKind, EliteType, Shield};
pub use body::Body;
pub use collision::{CollisionReport, attack_angle, resolve_collisions};
pub use perk::{ActiveAbility, Perk, PerkCatalog, PerkEffect, PerkModifier};
pub use player::{ABILITY_SLOTS, Player};
pub use shot::Shot;
pub use spawn::{Edge, spawn_wave};
pub use state::{EntityIds, GameEvent, GamePhase, GameState};
pub use tick::{TickInput, select_perk, tick};
