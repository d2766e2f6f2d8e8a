//! The player's ship

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::perk::{ActiveAbility, Perk, PerkEffect, PerkModifier};
use super::shot::Shot;
use super::state::EntityIds;
use super::tick::TickInput;
use crate::Vec2Ext;
use crate::config::GameConfig;

/// Number of numbered ability slots
pub const ABILITY_SLOTS: usize = 5;

/// The player ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Velocity stays zero: thrust moves the ship directly
    pub body: Body,
    /// Heading in degrees (0 = facing +y)
    pub rotation: f32,
    pub hp: u32,
    pub max_hp: u32,
    /// Shoot cooldown remaining (seconds)
    pub timer: f32,
    pub speed_multiplier: f32,
    pub fire_rate_multiplier: f32,
    pub bullet_pierce: u32,
    /// Every perk acquired, in order
    pub perks: Vec<Perk>,
    pub active_abilities: Vec<ActiveAbility>,
}

impl Player {
    pub fn new(pos: Vec2, config: &GameConfig) -> Self {
        Self {
            body: Body::new(pos, Vec2::ZERO, config.player_radius),
            rotation: 0.0,
            hp: config.player_max_hp,
            max_hp: config.player_max_hp,
            timer: 0.0,
            speed_multiplier: 1.0,
            fire_rate_multiplier: 1.0,
            bullet_pierce: 0,
            perks: Vec::new(),
            active_abilities: Vec::new(),
        }
    }

    /// Unit vector the ship is facing
    pub fn forward(&self) -> Vec2 {
        Vec2::Y.rotate_deg(self.rotation)
    }

    /// Apply one frame of input. Returns a new shot if one was fired.
    pub fn update(
        &mut self,
        input: &TickInput,
        dt: f32,
        config: &GameConfig,
        ids: &mut EntityIds,
    ) -> Option<Shot> {
        if input.rotate_left {
            self.rotation -= config.player_turn_speed * dt;
        }
        if input.rotate_right {
            self.rotation += config.player_turn_speed * dt;
        }
        if input.thrust_forward {
            self.thrust(dt, config);
        }
        if input.thrust_back {
            self.thrust(-dt, config);
        }

        let shot = if input.fire_held || input.fire_pressed {
            self.shoot(config, ids)
        } else {
            None
        };

        if self.timer > 0.0 {
            self.timer -= dt * (1.0 + self.fire_rate_multiplier);
        }
        for ability in &mut self.active_abilities {
            ability.tick(dt);
        }

        self.body.wrap(config.screen_width, config.screen_height);
        shot
    }

    fn thrust(&mut self, dt: f32, config: &GameConfig) {
        self.body.pos += self.forward() * config.player_speed * dt * self.speed_multiplier;
    }

    /// Fire if the cooldown has elapsed
    pub fn shoot(&mut self, config: &GameConfig, ids: &mut EntityIds) -> Option<Shot> {
        if self.timer > 0.0 {
            return None;
        }
        self.timer = config.player_shoot_cooldown / (1.0 + self.fire_rate_multiplier);
        Some(Shot::new(
            ids.next_id(),
            self.body.pos,
            self.forward() * config.player_shoot_speed,
            config.shot_radius,
            self.bullet_pierce,
            config.shot_lifetime,
        ))
    }

    /// Record a perk and apply its effect once
    pub fn add_perk(&mut self, perk: Perk) {
        match perk.effect {
            PerkEffect::Passive { modifier, value } => match modifier {
                PerkModifier::Speed => self.speed_multiplier += value,
                PerkModifier::FireRate => self.fire_rate_multiplier += value,
                PerkModifier::Hp => {
                    let extra = value.max(0.0).round() as u32;
                    self.max_hp += extra;
                    self.hp += extra;
                }
                PerkModifier::Pierce => self.bullet_pierce += value.max(0.0).round() as u32,
            },
            PerkEffect::Active { .. } => {
                if let Some(ability) = ActiveAbility::from_perk(&perk) {
                    self.active_abilities.push(ability);
                }
            }
        }
        self.perks.push(perk);
    }

    /// Toggle the ability in `slot`. Returns its name if it switched on.
    pub fn use_ability(&mut self, slot: usize) -> Option<&str> {
        let ability = self.active_abilities.get_mut(slot)?;
        if ability.toggle() {
            Some(ability.perk.name.as_str())
        } else {
            None
        }
    }

    /// Lose one HP (never below zero). Returns the remaining HP.
    pub fn take_hit(&mut self) -> u32 {
        self.hp = self.hp.saturating_sub(1);
        self.hp
    }

    pub fn is_dead(&self) -> bool {
        self.hp == 0
    }
}
