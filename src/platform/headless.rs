//! Headless collaborators: a scripted pilot and a logging renderer

use crate::sim::{ABILITY_SLOTS, GamePhase, GameState, TickInput};
use crate::{Vec2Ext, angle_delta_deg};

use super::frame::{Frame, Overlay};
use super::{InputSource, Renderer};

/// Degrees off target within which the autopilot holds fire
const AIM_TOLERANCE: f32 = 8.0;

/// Plays the game unattended: turns toward the nearest asteroid and fires
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    /// Also switch on abilities as soon as they are ready
    pub use_abilities: bool,
}

impl Autopilot {
    pub fn new(use_abilities: bool) -> Self {
        Self { use_abilities }
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, state: &GameState) -> TickInput {
        let mut input = TickInput::default();

        match state.phase {
            GamePhase::PerkSelection => {
                input.select_perk = Some(0);
                return input;
            }
            GamePhase::GameOver => {
                input.quit = true;
                return input;
            }
            GamePhase::WaveTransition => return input,
            GamePhase::Playing => {}
        }

        let player = &state.player;
        let target = state
            .asteroids
            .iter()
            .filter(|a| a.alive)
            .min_by(|a, b| {
                a.body
                    .pos
                    .distance_squared(player.body.pos)
                    .partial_cmp(&b.body.pos.distance_squared(player.body.pos))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

        if let Some(target) = target {
            let heading = player.forward().angle_deg();
            let bearing = (target.body.pos - player.body.pos).angle_deg();
            let delta = angle_delta_deg(heading, bearing);

            // Positive rotation turns counter-clockwise
            if delta > AIM_TOLERANCE {
                input.rotate_right = true;
            } else if delta < -AIM_TOLERANCE {
                input.rotate_left = true;
            } else {
                input.fire_held = true;
            }
        }

        if self.use_abilities {
            for (slot, ability) in player.active_abilities.iter().take(ABILITY_SLOTS).enumerate() {
                input.abilities[slot] = ability.ready();
            }
        }

        input
    }
}

/// Renderer that reports frames through the log facade
#[derive(Debug, Default)]
pub struct LogRenderer {
    pub frames_rendered: u64,
    /// Most recent frame, kept for dumping
    pub last_frame: Option<Frame>,
}

impl LogRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for LogRenderer {
    fn render(&mut self, frame: &Frame) {
        let overlay_changed = self
            .last_frame
            .as_ref()
            .is_none_or(|last| std::mem::discriminant(&last.overlay) != std::mem::discriminant(&frame.overlay));

        if overlay_changed {
            match &frame.overlay {
                Overlay::None => log::info!("Wave {} in play", frame.hud.wave),
                Overlay::WaveCountdown { wave, seconds } => {
                    log::info!("Wave {} starting in {}s", wave, seconds)
                }
                Overlay::PerkCards { perks } => {
                    let names: Vec<&str> = perks.iter().map(|p| p.name.as_str()).collect();
                    log::info!("Choose a perk: {}", names.join(", "));
                }
                Overlay::GameOver { credits, wave } => {
                    log::info!("GAME OVER at wave {} with {} credits", wave, credits)
                }
            }
        }

        log::trace!(
            "tick {} asteroids={} shots={} credits={} hp={}/{}",
            frame.tick,
            frame.asteroids.len(),
            frame.shots.len(),
            frame.hud.credits,
            frame.hud.hp,
            frame.hud.max_hp
        );

        self.frames_rendered += 1;
        self.last_frame = Some(frame.clone());
    }
}
