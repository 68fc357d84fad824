//! ASCII Maze demo runner
//!
//! Prints the maze map and the first-person view for a seed, optionally
//! letting the autopilot walk to the exit and printing the victory frame.
//!
//! Usage: ascii-maze [--seed N] [--level N] [--width W] [--height H]
//!                   [--settings PATH] [--autopilot]

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use anyhow::{Context, Result, bail};

    use ascii_maze::consts::LEVEL_COUNT;
    use ascii_maze::engine::random_seed;
    use ascii_maze::records::format_time;
    use ascii_maze::sim::{self, Autopilot, TickOutcome};
    use ascii_maze::{Engine, RunRecords, Settings};

    /// Simulation step the autopilot uses
    const AUTOPILOT_DT: f64 = 1.0 / 30.0;
    /// Give up after this many autopilot ticks
    const AUTOPILOT_TICK_LIMIT: u64 = 100_000;

    struct Args {
        seed: Option<u64>,
        level: u32,
        width: i64,
        height: i64,
        settings: Option<std::path::PathBuf>,
        autopilot: bool,
    }

    fn parse_args() -> Result<Args> {
        let mut args = Args {
            seed: None,
            level: 1,
            width: 80,
            height: 24,
            settings: None,
            autopilot: false,
        };

        let mut iter = std::env::args().skip(1);
        while let Some(arg) = iter.next() {
            let mut value = |name: &str| iter.next().with_context(|| format!("{} needs a value", name));
            match arg.as_str() {
                "--seed" => args.seed = Some(value("--seed")?.parse().context("--seed must be an integer")?),
                "--level" => args.level = value("--level")?.parse().context("--level must be an integer")?,
                "--width" => args.width = value("--width")?.parse().context("--width must be an integer")?,
                "--height" => args.height = value("--height")?.parse().context("--height must be an integer")?,
                "--settings" => args.settings = Some(value("--settings")?.into()),
                "--autopilot" => args.autopilot = true,
                other => bail!("unknown argument {:?}", other),
            }
        }

        if !(1..=LEVEL_COUNT).contains(&args.level) {
            bail!("--level must be between 1 and {}", LEVEL_COUNT);
        }
        Ok(args)
    }

    pub fn run() -> Result<()> {
        let args = parse_args()?;
        let settings = match &args.settings {
            Some(path) => Settings::load(path).with_context(|| format!("loading {}", path.display()))?,
            None => Settings::default(),
        };
        let engine = Engine::new(settings);
        let seed = args.seed.unwrap_or_else(random_seed);

        let mut state = if args.level == 1 {
            engine.init_with_seed(seed)
        } else {
            sim::start_level(args.level, seed, RunRecords::new(), engine.settings())
        };
        log::info!(
            "Seed {} level {}, exit {} steps away",
            state.seed,
            state.level,
            state.steps_to_goal().unwrap_or(0)
        );

        println!("{}", state.maze.to_map());
        print!("{}", engine.render(&mut state, args.width, args.height));

        if !args.autopilot {
            return Ok(());
        }

        let mut pilot = Autopilot::new(&state.maze);
        let mut ticks = 0;
        loop {
            let input = pilot.steer(&state, engine.settings(), AUTOPILOT_DT);
            if engine.tick(&mut state, &input)? == TickOutcome::Won {
                break;
            }
            ticks += 1;
            if ticks >= AUTOPILOT_TICK_LIMIT {
                bail!("autopilot gave up after {} ticks", ticks);
            }
        }

        println!();
        print!("{}", engine.render(&mut state, args.width, args.height));
        println!(
            "Level {} solved in {} ({} ticks)",
            state.level,
            format_time(state.records.run_time(state.level)),
            state.time_ticks
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser entry point is `platform::wasm::start`
}
