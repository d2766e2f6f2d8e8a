//! Beaker's Revenge headless runner
//!
//! Plays the simulation with the autopilot and logs what happens. A graphical
//! frontend plugs in through `platform::{InputSource, Renderer}` instead.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

    use clap::Parser;

    use beakers_revenge::GameConfig;
    use beakers_revenge::consts::{FRAME_DT, MAX_FRAME_DT};
    use beakers_revenge::platform::{self, Autopilot, LogRenderer};
    use beakers_revenge::sim::GameState;

    /// Wave-based asteroid shooter, played by the autopilot
    #[derive(Parser, Debug)]
    #[command(author, version, about, long_about = None)]
    struct Args {
        /// JSON file overriding any subset of the game constants
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// RNG seed (defaults to the current time)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Stop after this many frames
        #[arg(short = 'n', long, default_value_t = 36_000)]
        max_frames: u64,

        /// Measure frame time with a wall clock instead of a fixed 60 Hz step
        #[arg(long)]
        realtime: bool,

        /// Switch on perk abilities whenever they are ready
        #[arg(long)]
        abilities: bool,

        /// Print the final frame as JSON
        #[arg(long)]
        dump_frame: bool,
    }

    pub fn main() {
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .format_timestamp_millis()
            .try_init();

        let args = Args::parse();

        let config = match &args.config {
            Some(path) => GameConfig::load_or_default(path),
            None => GameConfig::default(),
        };
        let seed = args.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        });
        log::info!("Beaker's Revenge starting (seed {})", seed);

        let mut state = GameState::new(config, seed);
        let mut input = Autopilot::new(args.abilities);
        let mut renderer = LogRenderer::new();

        let frames = if args.realtime {
            run_realtime(&mut state, &mut input, &mut renderer, args.max_frames)
        } else {
            platform::run_fixed(&mut state, &mut input, &mut renderer, FRAME_DT, args.max_frames)
        };

        log::info!(
            "Stopped after {} frames: wave {}, {} credits, hp {}/{}",
            frames,
            state.wave,
            state.credits,
            state.player.hp,
            state.player.max_hp
        );

        if args.dump_frame {
            match renderer.last_frame.as_ref().map(serde_json::to_string_pretty) {
                Some(Ok(json)) => println!("{}", json),
                Some(Err(e)) => log::error!("Failed to serialize frame: {}", e),
                None => log::warn!("No frame rendered"),
            }
        }
    }

    /// Wall-clock loop paced to roughly 60 Hz
    fn run_realtime(
        state: &mut GameState,
        input: &mut Autopilot,
        renderer: &mut LogRenderer,
        max_frames: u64,
    ) -> u64 {
        let target = Duration::from_secs_f32(FRAME_DT);
        let mut last = Instant::now();
        let mut frames = 0;

        while frames < max_frames && !state.quit_requested {
            let now = Instant::now();
            let dt = now.duration_since(last).as_secs_f32().min(MAX_FRAME_DT);
            last = now;

            platform::step(state, input, renderer, dt);
            frames += 1;

            let spent = now.elapsed();
            if spent < target {
                std::thread::sleep(target - spent);
            }
        }
        frames
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::main();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser frontends drive `platform::step` themselves
}
