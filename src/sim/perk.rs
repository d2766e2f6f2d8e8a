//! Perks offered between waves

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

/// Player stat a passive perk changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerkModifier {
    Speed,
    Hp,
    FireRate,
    Pierce,
}

/// What acquiring a perk does
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PerkEffect {
    /// Added to the matching player stat once per acquisition
    Passive { modifier: PerkModifier, value: f32 },
    /// Toggleable ability with its own cooldown
    Active { max_cooldown: f32 },
}

/// A catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Perk {
    pub name: String,
    pub description: String,
    pub effect: PerkEffect,
}

impl Perk {
    pub fn passive(name: &str, description: &str, modifier: PerkModifier, value: f32) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            effect: PerkEffect::Passive { modifier, value },
        }
    }

    pub fn active(name: &str, description: &str, max_cooldown: f32) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            effect: PerkEffect::Active { max_cooldown },
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.effect, PerkEffect::Active { .. })
    }
}

/// Runtime state of an acquired active perk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveAbility {
    pub perk: Perk,
    pub active: bool,
    /// Seconds until it can be switched on again
    pub cooldown: f32,
    pub max_cooldown: f32,
}

impl ActiveAbility {
    /// `None` for passive perks
    pub fn from_perk(perk: &Perk) -> Option<Self> {
        match perk.effect {
            PerkEffect::Active { max_cooldown } => Some(Self {
                perk: perk.clone(),
                active: false,
                cooldown: 0.0,
                max_cooldown,
            }),
            PerkEffect::Passive { .. } => None,
        }
    }

    pub fn ready(&self) -> bool {
        !self.active && self.cooldown <= 0.0
    }

    /// Switch on if ready, switch off if running. Returns true if it turned on.
    pub fn toggle(&mut self) -> bool {
        if self.active {
            self.active = false;
            false
        } else if self.ready() {
            self.active = true;
            self.cooldown = self.max_cooldown;
            true
        } else {
            false
        }
    }

    pub fn tick(&mut self, dt: f32) {
        if self.cooldown > 0.0 {
            self.cooldown = (self.cooldown - dt).max(0.0);
        }
    }
}

/// Fixed list of perks the player can be offered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerkCatalog {
    pub perks: Vec<Perk>,
}

impl Default for PerkCatalog {
    fn default() -> Self {
        use PerkModifier::*;
        Self {
            perks: vec![
                Perk::passive("Speed Boost", "Increase movement speed by 15%", Speed, 0.15),
                Perk::passive("Reinforced Hull", "+1 Max HP", Hp, 1.0),
                Perk::passive("Rapid Fire", "Decrease shoot cooldown by 25%", FireRate, 0.25),
                Perk::passive("Piercing Shot", "Bullets pierce through 1 asteroid", Pierce, 1.0),
                Perk::passive("Turbo Thrust", "Increase movement speed by 30%", Speed, 0.3),
                Perk::passive("Twin Cannons", "Decrease shoot cooldown by 40%", FireRate, 0.4),
            ],
        }
    }
}

impl PerkCatalog {
    pub fn new(perks: Vec<Perk>) -> Self {
        Self { perks }
    }

    /// Up to `count` distinct perks, or the whole catalog if it is smaller
    pub fn random_perks<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<Perk> {
        if self.perks.len() <= count {
            return self.perks.clone();
        }
        self.perks.choose_multiple(rng, count).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_random_perks_are_distinct() {
        let catalog = PerkCatalog::default();
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..50 {
            let picks = catalog.random_perks(3, &mut rng);
            assert_eq!(picks.len(), 3);
            for (i, a) in picks.iter().enumerate() {
                for b in &picks[i + 1..] {
                    assert_ne!(a.name, b.name);
                }
            }
        }
    }

    #[test]
    fn test_small_catalog_returned_whole() {
        let catalog = PerkCatalog::new(vec![Perk::passive("Only", "", PerkModifier::Hp, 1.0)]);
        let picks = catalog.random_perks(3, &mut Pcg32::seed_from_u64(0));
        assert_eq!(picks, catalog.perks);
    }

    #[test]
    fn test_ability_toggle_and_cooldown() {
        let perk = Perk::active("Overdrive", "Go faster for a bit", 5.0);
        let mut ability = ActiveAbility::from_perk(&perk).unwrap();
        assert!(ability.toggle());
        assert!(ability.active);
        assert_eq!(ability.cooldown, 5.0);

        // Switching off does not reset the cooldown
        assert!(!ability.toggle());
        assert!(!ability.active);
        assert!(!ability.toggle());

        ability.tick(5.0);
        assert!(ability.ready());
        assert!(ability.toggle());
    }

    #[test]
    fn test_passive_perk_has_no_ability() {
        let perk = Perk::passive("Speed Boost", "", PerkModifier::Speed, 0.15);
        assert!(ActiveAbility::from_perk(&perk).is_none());
    }
}
