//! Sprint Race entry point
//!
//! Headless host: runs the start lights and race on a virtual frame clock and
//! reports lights, winner and celebration through the log.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use anyhow::{Context, Result, bail};
    use clap::Parser;

    use sprint_race::Settings;
    use sprint_race::sim::{RaceEvent, RaceState, TickInput, default_roster, run_to_completion, tick};

    #[derive(Debug, Parser)]
    #[command(name = "sprint-race", version)]
    #[command(about = "Run a headless multi-lane sprint race", long_about = None)]
    struct Cli {
        /// Team to back (e.g. "ferrari")
        #[arg(short, long)]
        team: Option<String>,

        /// Pacing seed (random when omitted)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Settings JSON file
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Write the effective settings to this path and exit
        #[arg(long)]
        write_settings: Option<PathBuf>,

        /// Viewport width reported by the layout (pixels)
        #[arg(long, default_value_t = 800.0)]
        view_width: f64,

        /// Frame interval (ms)
        #[arg(long, default_value_t = 16.0)]
        frame_ms: f64,

        /// Print a JSON snapshot per frame
        #[arg(long)]
        json: bool,

        /// Run this many seeded races and print win counts
        #[arg(long)]
        trials: Option<u32>,
    }

    pub fn run() -> Result<()> {
        env_logger::init();
        let cli = Cli::parse();

        let settings = Settings::load_or_default(cli.settings.as_deref())
            .context("Failed to load settings")?;

        if let Some(path) = &cli.write_settings {
            settings
                .save(path)
                .with_context(|| format!("Failed to write settings to {}", path.display()))?;
            return Ok(());
        }

        let seed = cli.seed.unwrap_or_else(rand::random);
        log::info!("Sprint Race starting with seed {}", seed);

        match cli.trials {
            Some(trials) => run_trials(&cli, settings, seed, trials),
            None => run_single(&cli, settings, seed),
        }
    }

    fn new_race(cli: &Cli, settings: Settings, seed: u64) -> Result<RaceState> {
        let mut state = RaceState::new(settings, default_roster(), seed)
            .context("Invalid race settings")?;
        let input = TickInput {
            select: cli.team.clone(),
            view_width: Some(cli.view_width),
            ..Default::default()
        };
        tick(&mut state, &input, 0.0);

        if let Some(team) = &cli.team
            && state.selected.is_none()
        {
            let known: Vec<&str> = state.roster.iter().map(|t| t.id.as_str()).collect();
            bail!("Unknown team `{}` (expected one of: {})", team, known.join(", "));
        }
        Ok(state)
    }

    fn run_single(cli: &Cli, settings: Settings, seed: u64) -> Result<()> {
        let mut state = new_race(cli, settings, seed)?;
        let json = cli.json;

        let outcome = run_to_completion(&mut state, 0.0, cli.frame_ms, |state, events| {
            for event in events {
                match event {
                    RaceEvent::Lights { lit } => log::info!("Lights: {}", lit),
                    RaceEvent::Celebrate { .. } => log::info!("Confetti!"),
                    _ => log::debug!("{:?}", event),
                }
            }
            if json {
                match serde_json::to_string(&state.snapshot()) {
                    Ok(line) => println!("{}", line),
                    Err(e) => log::warn!("Snapshot serialization failed: {}", e),
                }
            }
        });

        let Some(outcome) = outcome else {
            bail!("Race did not run: pick a team with --team");
        };

        if !json {
            println!("{} wins the sprint!", outcome.winner_name);
            if outcome.player_won {
                println!("Congratulations! Claim your reward: {}", outcome.link);
            } else {
                println!("So close! Try again.");
            }
        }
        Ok(())
    }

    fn run_trials(cli: &Cli, settings: Settings, seed: u64, trials: u32) -> Result<()> {
        let roster = default_roster();
        let mut wins = vec![0u32; roster.len()];
        let mut fastest_wins = 0u32;

        for trial in 0..trials {
            let mut state = new_race(cli, settings.clone(), seed.wrapping_add(trial as u64))?;
            if state.selected.is_none() {
                // Trials only need a start; back the first lane
                state.select(&roster[0].id);
            }
            run_to_completion(&mut state, 0.0, cli.frame_ms, |_, _| {})
                .context("Trial race did not finish")?;

            if let (Some(winner), Some(run)) = (state.winner, state.run.as_ref()) {
                wins[winner] += 1;
                if winner == run.fastest {
                    fastest_wins += 1;
                }
            }
        }

        println!("{:<10} {:>6}", "team", "wins");
        for (team, count) in roster.iter().zip(&wins) {
            println!("{:<10} {:>6}", team.id, count);
        }
        println!(
            "designated fastest won {}/{} ({:.1}%)",
            fastest_wins,
            trials,
            100.0 * fastest_wins as f64 / trials.max(1) as f64
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The engine is driven by the host page on wasm
}
