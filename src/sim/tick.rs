//! Per-frame simulation tick
//!
//! Order within a Playing tick: player intent, entity motion, collision
//! resolution, then wave/game-over transitions.

use super::collision::resolve_collisions;
use super::player::ABILITY_SLOTS;
use super::spawn::spawn_wave;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust_forward: bool,
    pub thrust_back: bool,
    /// Fire button held down
    pub fire_held: bool,
    /// Fire button pressed this tick (click)
    pub fire_pressed: bool,
    /// Numbered ability keys pressed this tick
    pub abilities: [bool; ABILITY_SLOTS],
    /// Perk card picked during perk selection
    pub select_perk: Option<usize>,
    pub restart: bool,
    pub quit: bool,
}

/// Advance the game state by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.quit {
        state.quit_requested = true;
        return;
    }

    state.time_ticks += 1;

    match state.phase {
        GamePhase::WaveTransition => {
            state.countdown -= dt;
            if state.countdown <= 0.0 {
                start_wave(state);
            }
        }

        GamePhase::PerkSelection => {
            if let Some(index) = input.select_perk {
                select_perk(state, index);
            }
        }

        GamePhase::Playing => update_playing(state, input, dt),

        // Terminal: only restart (or quit, above) does anything
        GamePhase::GameOver => {
            if input.restart {
                state.restart();
            }
        }
    }
}

/// Apply offer `index` and move on to the countdown. Returns false if the
/// index is not a current offer or no selection is pending.
pub fn select_perk(state: &mut GameState, index: usize) -> bool {
    if state.phase != GamePhase::PerkSelection || index >= state.perk_offers.len() {
        log::debug!("Ignoring perk choice {}", index);
        return false;
    }

    let perk = state.perk_offers.swap_remove(index);
    state.perk_offers.clear();
    log::info!("Selected perk: {}", perk.name);
    state.events.push(GameEvent::PerkSelected {
        name: perk.name.clone(),
    });
    state.player.add_perk(perk);
    enter_wave_transition(state);
    true
}

fn update_playing(state: &mut GameState, input: &TickInput, dt: f32) {
    // Player intent
    if let Some(shot) = state.player.update(input, dt, &state.config, &mut state.ids) {
        state.shots.push(shot);
    }
    for (slot, _) in input.abilities.iter().enumerate().filter(|(_, pressed)| **pressed) {
        if let Some(name) = state.player.use_ability(slot) {
            let name = name.to_string();
            log::info!("Used ability: {}", name);
            state.events.push(GameEvent::AbilityUsed { name });
        }
    }

    // Motion
    let (width, height) = (state.config.screen_width, state.config.screen_height);
    for asteroid in &mut state.asteroids {
        asteroid.update(dt, width, height, &mut state.rng);
    }
    for shot in &mut state.shots {
        shot.update(dt, width, height);
    }

    // Combat
    resolve_collisions(state);
    state.sweep_dead();

    // Transitions; losing beats clearing the wave on the same tick
    if state.player.is_dead() {
        state.phase = GamePhase::GameOver;
        log::info!("Game over! Final credits: {}", state.credits);
        state.events.push(GameEvent::GameOver {
            credits: state.credits,
            wave: state.wave,
        });
    } else if state.asteroids.is_empty() {
        wave_cleared(state);
    }
}

fn start_wave(state: &mut GameState) {
    state.countdown = 0.0;
    let wave = state.wave;
    let asteroids = spawn_wave(state, wave);
    state.phase = GamePhase::Playing;
    state.events.push(GameEvent::WaveStarted { wave, asteroids });
}

fn wave_cleared(state: &mut GameState) {
    let cleared = state.wave;
    state.wave += 1;
    log::info!("Wave {} cleared", cleared);
    state.events.push(GameEvent::WaveCleared { wave: cleared });

    if state.config.perk_selection_after_wave {
        state.perk_offers = state
            .perk_catalog
            .random_perks(state.config.perk_choices, &mut state.rng);
    }

    // No cards to pick from means nothing to wait for
    if !state.perk_offers.is_empty() {
        state.phase = GamePhase::PerkSelection;
        state.events.push(GameEvent::PerkOffered {
            count: state.perk_offers.len(),
        });
    } else {
        enter_wave_transition(state);
    }
}

fn enter_wave_transition(state: &mut GameState) {
    state.countdown = state.config.wave_countdown;
    state.phase = GamePhase::WaveTransition;
    log::info!("Wave {} in {:.1}s", state.wave, state.countdown);
}
