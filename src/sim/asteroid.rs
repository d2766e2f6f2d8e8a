//! Asteroids and their elite variants
//!
//! Every asteroid is one struct with a tagged [`AsteroidKind`]. Per-kind
//! behavior (special movement, damage, splitting) is a `match` on that tag.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::state::EntityIds;
use crate::{Vec2Ext, angle_delta_deg, normalize_degrees};

/// Plain asteroid stats
pub const PLAIN_HEALTH: f32 = 1.0;
pub const PLAIN_CREDITS: u32 = 1;

/// Elite stats
pub const ELITE_HEALTH: f32 = 3.0;
pub const SHIELDED_HEALTH: f32 = 4.0;
pub const ELITE_CREDITS: u32 = 5;
/// Health floor for children of a split elite
pub const ELITE_CHILD_MIN_HEALTH: f32 = 2.0;

/// Splitting: children diverge by a random angle in this range (degrees)
const SPLIT_ANGLE_MIN: f32 = 20.0;
const SPLIT_ANGLE_MAX: f32 = 50.0;
/// First child gets a speed boost
const SPLIT_FAST_CHILD_SCALE: f32 = 1.2;

/// Exploder tuning
const EXPLODER_FRAGMENTS: usize = 5;
const EXPLODER_PRIMED_FRAGMENTS: usize = 8;
const EXPLODER_FRAGMENT_SPEED: f32 = 1.5;
const EXPLODER_PRIMED_FRAGMENT_SPEED: f32 = 2.0;
/// Per-frame chance to self-prime once weakened
const EXPLODER_IDLE_PRIME_CHANCE: f64 = 0.005;
/// Chance to prime when a hit leaves it weakened
const EXPLODER_HIT_PRIME_CHANCE: f64 = 0.3;
/// Priming only happens at or below this health
const EXPLODER_PRIME_HEALTH: f32 = 2.0;

/// Swarm leader tuning
const SWARM_TURN_CHANCE: f64 = 0.01;
const SWARM_TURN_ANGLE: f32 = 45.0;
const SWARM_INFLUENCE_SCALE: f32 = 5.0;

/// Elite variants that can be requested by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EliteType {
    Exploder,
    Shielded,
    SwarmLeader,
}

impl EliteType {
    pub const ALL: [EliteType; 3] = [EliteType::Exploder, EliteType::Shielded, EliteType::SwarmLeader];

    pub fn name(&self) -> &'static str {
        match self {
            EliteType::Exploder => "exploder",
            EliteType::Shielded => "shielded",
            EliteType::SwarmLeader => "swarm_leader",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "exploder" => Some(EliteType::Exploder),
            "shielded" => Some(EliteType::Shielded),
            "swarm_leader" | "swarmleader" => Some(EliteType::SwarmLeader),
            _ => None,
        }
    }
}

/// Rotating directional shield
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shield {
    /// Center of the arc (degrees, [0, 360))
    pub angle: f32,
    /// Full width of the arc (degrees)
    pub arc_width: f32,
    /// Degrees per second
    pub rotation_speed: f32,
    /// Fraction of a hit absorbed when it lands on the arc
    pub damage_reduction: f32,
}

impl Default for Shield {
    fn default() -> Self {
        Self {
            angle: 0.0,
            arc_width: 180.0,
            rotation_speed: 45.0,
            damage_reduction: 0.5,
        }
    }
}

impl Shield {
    pub fn rotate(&mut self, dt: f32) {
        self.angle = normalize_degrees(self.angle + self.rotation_speed * dt);
    }

    /// True if `attack_angle` lies on the arc (edges included)
    pub fn covers(&self, attack_angle: f32) -> bool {
        angle_delta_deg(self.angle, attack_angle).abs() <= self.arc_width / 2.0
    }
}

/// Asteroid variant with its kind-specific state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AsteroidKind {
    Plain,
    /// Elite with no special behavior, used when an elite name is unknown
    Basic,
    Exploder { explosion_primed: bool },
    Shielded { shield: Shield },
    /// `influence_radius` is carried for rendering; it does not steer neighbors
    SwarmLeader { influence_radius: f32 },
}

impl AsteroidKind {
    pub fn is_elite(&self) -> bool {
        !matches!(self, AsteroidKind::Plain)
    }

    fn for_elite(elite: EliteType, radius: f32) -> Self {
        match elite {
            EliteType::Exploder => AsteroidKind::Exploder {
                explosion_primed: false,
            },
            EliteType::Shielded => AsteroidKind::Shielded {
                shield: Shield::default(),
            },
            EliteType::SwarmLeader => AsteroidKind::SwarmLeader {
                influence_radius: radius * SWARM_INFLUENCE_SCALE,
            },
        }
    }
}

/// An asteroid entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: u32,
    pub body: Body,
    /// Fractional for shielded asteroids (shield hits deal half damage)
    pub health: f32,
    pub credits_value: u32,
    pub kind: AsteroidKind,
    /// Seconds since spawn, only advanced for elites
    pub time_alive: f32,
    /// Cleared when destroyed; dead asteroids are skipped until swept
    pub alive: bool,
}

impl Asteroid {
    fn with_kind(id: u32, pos: Vec2, vel: Vec2, radius: f32, kind: AsteroidKind) -> Self {
        let (health, credits_value) = match kind {
            AsteroidKind::Plain => (PLAIN_HEALTH, PLAIN_CREDITS),
            AsteroidKind::Shielded { .. } => (SHIELDED_HEALTH, ELITE_CREDITS),
            _ => (ELITE_HEALTH, ELITE_CREDITS),
        };
        Self {
            id,
            body: Body::new(pos, vel, radius),
            health,
            credits_value,
            kind,
            time_alive: 0.0,
            alive: true,
        }
    }

    pub fn plain(id: u32, pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self::with_kind(id, pos, vel, radius, AsteroidKind::Plain)
    }

    pub fn elite(id: u32, elite: EliteType, pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self::with_kind(id, pos, vel, radius, AsteroidKind::for_elite(elite, radius))
    }

    /// Build an elite from a configured type name, falling back to a basic elite
    pub fn elite_named(id: u32, name: &str, pos: Vec2, vel: Vec2, radius: f32) -> Self {
        match EliteType::from_name(name) {
            Some(elite) => Self::elite(id, elite, pos, vel, radius),
            None => {
                log::warn!("Unknown elite type '{}', spawning basic elite", name);
                Self::with_kind(id, pos, vel, radius, AsteroidKind::Basic)
            }
        }
    }

    pub fn is_elite(&self) -> bool {
        self.kind.is_elite()
    }

    /// Move, wrap and run the elite special behavior
    pub fn update<R: Rng + ?Sized>(&mut self, dt: f32, width: f32, height: f32, rng: &mut R) {
        if !self.alive {
            return;
        }
        self.body.advance(dt);
        self.body.wrap(width, height);

        if self.is_elite() {
            self.time_alive += dt;
            self.special_behavior(dt, rng);
        }
    }

    fn special_behavior<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) {
        let health = self.health;
        match &mut self.kind {
            AsteroidKind::Exploder { explosion_primed } => {
                if health <= EXPLODER_PRIME_HEALTH
                    && !*explosion_primed
                    && rng.random_bool(EXPLODER_IDLE_PRIME_CHANCE)
                {
                    *explosion_primed = true;
                }
            }
            AsteroidKind::Shielded { shield } => shield.rotate(dt),
            AsteroidKind::SwarmLeader { .. } => {
                if rng.random_bool(SWARM_TURN_CHANCE) {
                    let turn = if rng.random_bool(0.5) {
                        SWARM_TURN_ANGLE
                    } else {
                        -SWARM_TURN_ANGLE
                    };
                    self.body.vel = self.body.vel.rotate_deg(turn);
                }
            }
            AsteroidKind::Plain | AsteroidKind::Basic => {}
        }
    }

    /// Only shielded asteroids can block; everything else is always vulnerable
    pub fn is_vulnerable_to_attack(&self, attack_angle: f32) -> bool {
        match &self.kind {
            AsteroidKind::Shielded { shield } => !shield.covers(attack_angle),
            _ => true,
        }
    }

    /// Apply one hit arriving from `attack_angle`. Returns true if destroyed.
    pub fn take_damage<R: Rng + ?Sized>(&mut self, attack_angle: f32, rng: &mut R) -> bool {
        match &mut self.kind {
            AsteroidKind::Shielded { shield } => {
                if shield.covers(attack_angle) {
                    self.health -= 1.0 - shield.damage_reduction;
                } else {
                    self.health -= 1.0;
                }
            }
            AsteroidKind::Exploder { explosion_primed } => {
                self.health -= 1.0;
                if !*explosion_primed
                    && self.health <= EXPLODER_PRIME_HEALTH
                    && rng.random_bool(EXPLODER_HIT_PRIME_CHANCE)
                {
                    *explosion_primed = true;
                }
            }
            AsteroidKind::Plain | AsteroidKind::Basic | AsteroidKind::SwarmLeader { .. } => {
                self.health -= 1.0;
            }
        }
        self.health <= 0.0
    }

    /// Children that replace this asteroid when it is destroyed
    pub fn split<R: Rng + ?Sized>(
        &self,
        min_radius: f32,
        rng: &mut R,
        ids: &mut EntityIds,
    ) -> Vec<Asteroid> {
        if self.body.radius <= min_radius {
            return Vec::new();
        }

        match self.kind {
            AsteroidKind::Plain | AsteroidKind::Basic => {
                let child_radius = self.body.radius - min_radius;
                self.split_velocities(rng)
                    .into_iter()
                    .map(|vel| Asteroid::plain(ids.next_id(), self.body.pos, vel, child_radius))
                    .collect()
            }
            AsteroidKind::Exploder { explosion_primed } => {
                let (count, speed_scale) = if explosion_primed {
                    (EXPLODER_PRIMED_FRAGMENTS, EXPLODER_PRIMED_FRAGMENT_SPEED)
                } else {
                    (EXPLODER_FRAGMENTS, EXPLODER_FRAGMENT_SPEED)
                };
                let fragment_radius = (self.body.radius / 3.0).max(min_radius);

                (0..count)
                    .map(|_| {
                        let angle = rng.random_range(0.0..360.0);
                        let vel = self.body.vel.rotate_deg(angle) * speed_scale;
                        Asteroid::plain(ids.next_id(), self.body.pos, vel, fragment_radius)
                    })
                    .collect()
            }
            AsteroidKind::Shielded { .. } | AsteroidKind::SwarmLeader { .. } => {
                let child_radius = self.body.radius - min_radius;
                if child_radius < min_radius {
                    return Vec::new();
                }
                let elite = match self.kind {
                    AsteroidKind::Shielded { .. } => EliteType::Shielded,
                    _ => EliteType::SwarmLeader,
                };
                let child_health = (self.health - 1.0).max(ELITE_CHILD_MIN_HEALTH);

                self.split_velocities(rng)
                    .into_iter()
                    .map(|vel| {
                        let mut child =
                            Asteroid::elite(ids.next_id(), elite, self.body.pos, vel, child_radius);
                        child.health = child_health;
                        child
                    })
                    .collect()
            }
        }
    }

    /// Parent velocity rotated by +/- a random angle, the first one faster
    fn split_velocities<R: Rng + ?Sized>(&self, rng: &mut R) -> [Vec2; 2] {
        let angle = rng.random_range(SPLIT_ANGLE_MIN..=SPLIT_ANGLE_MAX);
        [
            self.body.vel.rotate_deg(angle) * SPLIT_FAST_CHILD_SCALE,
            self.body.vel.rotate_deg(-angle),
        ]
    }
}
