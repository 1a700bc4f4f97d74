//! Headless runner
//!
//! Plays the game with the autopilot for a fixed number of frames,
//! restarting whenever a level ends, and keeps the best score on disk.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use block_jump_warrior::platform::{LogPresenter, dispatch};
    use block_jump_warrior::sim::{FrameInput, GameEvent, GameWorld, update_guarded};
    use block_jump_warrior::{HighScore, Tuning};
    use clap::Parser;

    #[derive(Parser, Debug)]
    #[command(name = "block-jump-warrior")]
    #[command(about = "Run the platformer simulation headless with the autopilot")]
    struct Cli {
        /// Level and spawn seed (random when omitted)
        #[arg(long)]
        seed: Option<u64>,
        /// Frames to simulate (60 per second of game time)
        #[arg(long, default_value_t = 36_000)]
        frames: u64,
        /// JSON tuning file overriding the default balance
        #[arg(long)]
        tuning: Option<PathBuf>,
        /// JSON file holding the best score
        #[arg(long)]
        scores: Option<PathBuf>,
    }

    #[derive(Debug, Default)]
    struct RunStats {
        levels_completed: u32,
        deaths: u32,
        kills: u32,
        aborted_frames: u32,
    }

    pub fn run() -> Result<()> {
        env_logger::init();
        let cli = Cli::parse();

        let tuning = match &cli.tuning {
            Some(path) => Tuning::load(path).with_context(|| format!("loading tuning from {}", path.display()))?,
            None => Tuning::default(),
        };
        let mut best = match &cli.scores {
            Some(path) => HighScore::load_from(path).with_context(|| format!("loading scores from {}", path.display()))?,
            None => HighScore::new(),
        };

        let seed = cli.seed.unwrap_or_else(rand::random);
        log::info!("Block Jump Warrior (headless) starting with seed {}", seed);

        let mut world = GameWorld::new(seed, tuning);
        let mut presenter = LogPresenter;
        let mut stats = RunStats::default();

        for _ in 0..cli.frames {
            let input = FrameInput {
                idle_mode: true,
                restart: world.flow.is_terminal(),
                ..Default::default()
            };
            let result = match update_guarded(&mut world, &input) {
                Ok(result) => result,
                Err(e) => {
                    log::warn!("{}", e);
                    stats.aborted_frames += 1;
                    continue;
                }
            };
            dispatch(&mut presenter, &result.events);

            for event in &result.events {
                match event {
                    GameEvent::EnemyDied { .. } => stats.kills += 1,
                    GameEvent::LevelComplete => stats.levels_completed += 1,
                    GameEvent::GameOver { .. } => stats.deaths += 1,
                    _ => {}
                }
            }
            if result.flow.is_terminal() && best.record(world.score) {
                log::info!("New high score: {}", world.score);
            }
        }
        best.record(world.score);

        if let Some(path) = &cli.scores {
            best.save_to(path)
                .with_context(|| format!("saving scores to {}", path.display()))?;
        }

        println!(
            "{} frames: {} levels completed, {} deaths, {} kills, score {}, best {}",
            cli.frames,
            stats.levels_completed,
            stats.deaths,
            stats.kills,
            world.score,
            best.best()
        );
        if stats.aborted_frames > 0 {
            println!("{} frames aborted", stats.aborted_frames);
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the host page on the web
}
