//! Platform abstraction layer
//!
//! The simulation never polls devices or draws. A frontend supplies:
//! - an [`InputSource`] that turns device state into a [`TickInput`]
//! - a [`Renderer`] that draws a [`Frame`] snapshot
//!
//! Headless implementations of both live in [`headless`].

pub mod frame;
pub mod headless;

pub use frame::{Frame, Hud, Overlay};
pub use headless::{Autopilot, LogRenderer};

use crate::sim::{GameState, TickInput, tick};

/// Source of per-tick player commands
pub trait InputSource {
    /// Sample input for the next tick. One-shot presses must be reported once.
    fn poll(&mut self, state: &GameState) -> TickInput;
}

/// Draws one frame. Never feeds state back into the simulation.
pub trait Renderer {
    fn render(&mut self, frame: &Frame);
}

/// Run one frame: poll, tick, render
pub fn step<I, R>(state: &mut GameState, input: &mut I, renderer: &mut R, dt: f32)
where
    I: InputSource + ?Sized,
    R: Renderer + ?Sized,
{
    let commands = input.poll(state);
    tick(state, &commands, dt);
    renderer.render(&Frame::capture(state));
}

/// Run fixed-`dt` frames until quit is requested or `max_frames` is reached.
/// Returns the number of frames run.
pub fn run_fixed<I, R>(
    state: &mut GameState,
    input: &mut I,
    renderer: &mut R,
    dt: f32,
    max_frames: u64,
) -> u64
where
    I: InputSource + ?Sized,
    R: Renderer + ?Sized,
{
    let mut frames = 0;
    while frames < max_frames && !state.quit_requested {
        step(state, input, renderer, dt);
        frames += 1;
    }
    frames
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::consts::FRAME_DT;
    use crate::sim::GamePhase;

    /// Replays a fixed list of inputs, then idles
    struct Scripted(Vec<TickInput>);

    impl InputSource for Scripted {
        fn poll(&mut self, _state: &GameState) -> TickInput {
            if self.0.is_empty() {
                TickInput::default()
            } else {
                self.0.remove(0)
            }
        }
    }

    #[test]
    fn test_run_stops_at_frame_limit() {
        let mut state = GameState::new(GameConfig::default(), 1);
        let mut renderer = LogRenderer::new();
        let frames = run_fixed(&mut state, &mut Scripted(Vec::new()), &mut renderer, FRAME_DT, 240);
        assert_eq!(frames, 240);
        assert_eq!(renderer.frames_rendered, 240);
        assert_eq!(state.time_ticks, 240);
        // Countdown of 3s elapsed at 60 Hz
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_run_stops_on_quit() {
        let mut state = GameState::new(GameConfig::default(), 2);
        let quit = TickInput {
            quit: true,
            ..Default::default()
        };
        let mut input = Scripted(vec![TickInput::default(), quit]);
        let frames = run_fixed(&mut state, &mut input, &mut LogRenderer::new(), FRAME_DT, 100);
        assert_eq!(frames, 2);
        assert!(state.quit_requested);
    }

    #[test]
    fn test_autopilot_session_is_reproducible() {
        let play = || {
            let mut state = GameState::new(GameConfig::default(), 77);
            let mut renderer = LogRenderer::new();
            run_fixed(&mut state, &mut Autopilot::new(true), &mut renderer, FRAME_DT, 3000);
            renderer.last_frame
        };
        let a = play();
        assert!(a.is_some());
        assert_eq!(a, play());
    }
}
