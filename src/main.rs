use anyhow::Context;
use asteroid_arcade::config::GameConfig;
use asteroid_arcade::constants::TARGET_FPS;
use asteroid_arcade::game::Game;
use asteroid_arcade::highscores::HighscoreTable;
use asteroid_arcade::rendering::{self, GameGrid, OutputTarget, ScreenBuffer};
use asteroid_arcade::score::{FlatFileStore, KeyValueStore, MemoryStore};
use asteroid_arcade::terminal_io::{InputSource, SimulatedInput};
use clap::Parser;
use crossterm::cursor::{Hide, Show};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, size};
use log::{LevelFilter, error, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(name = "asteroid-arcade", about = "Asteroids in the terminal")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run headless against a ScreenBuffer with scripted input
    #[arg(long)]
    debug: bool,

    /// Screen width in debug mode
    #[arg(long, default_value_t = 80)]
    width: u16,

    /// Screen height in debug mode
    #[arg(long, default_value_t = 24)]
    height: u16,

    /// Stop after this many frames
    #[arg(long)]
    frames: Option<u64>,

    /// Seed for the random generator; debug runs default to 0
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (config, config_error) = match &cli.config {
        Some(path) => GameConfig::load_or_default(path),
        None => (GameConfig::default(), None),
    };
    let level = config.logging.level_filter();
    let filter = level.as_ref().copied().unwrap_or(LevelFilter::Info);
    simple_logging::log_to_file(&config.logging.file, filter)
        .with_context(|| format!("cannot open log file {}", config.logging.file.display()))?;
    info!("Starting asteroid-arcade.");
    if let Err(e) = level {
        warn!("Log level {:?}: {e}, using info", config.logging.level);
    }
    if let Some(e) = config_error {
        warn!("Using default configuration: {e}");
    }
    for warning in config.validate() {
        warn!("Config: {warning}");
    }

    let rng = match (cli.seed, cli.debug) {
        (Some(seed), _) => StdRng::seed_from_u64(seed),
        (None, true) => StdRng::seed_from_u64(0),
        (None, false) => StdRng::from_entropy(),
    };

    if cli.debug {
        info!("Debug mode enabled, {}x{}", cli.width, cli.height);
        let mut game = Game::new(config, MemoryStore::default(), HighscoreTable::default(), rng);
        let mut out = OutputTarget::ScreenBuffer(ScreenBuffer::new(cli.width, cli.height));
        let mut grid = GameGrid::new(cli.width, cli.height);
        let mut input = InputSource::Simulated(SimulatedInput::demo());
        let result = run(&mut game, &mut grid, &mut out, &mut input, cli.frames, true);
        if let Some(sb) = out.screen_buffer() {
            sb.print_to_log();
        }
        game.shutdown();
        return result;
    }

    let store = FlatFileStore::new(&config.storage.data_dir);
    let table_path = config.storage.data_dir.join(&config.storage.highscore_table);
    let highscores = HighscoreTable::load(table_path);
    let mut game = Game::new(config, store, highscores, rng);

    enable_raw_mode().context("failed to enable raw mode")?;
    let result = run_terminal(&mut game, cli.frames);
    game.shutdown();
    if let Err(e) = disable_raw_mode() {
        error!("Failed to disable raw mode on exit: {}", e);
    }
    if let Err(e) = &result {
        error!("Game loop failed: {e:#}");
    }
    info!("Exiting application.");
    result
}

fn run_terminal<S: KeyValueStore>(game: &mut Game<S>, frames: Option<u64>) -> anyhow::Result<()> {
    let (width, height) = size().context("failed to get terminal size")?;
    info!("Terminal size: {}x{}", width, height);
    let mut out = OutputTarget::Stdout(io::stdout());
    let mut grid = GameGrid::new(width, height);
    grid.clear_screen_manual(&mut out)?;
    out.execute_other_command(Hide)?;

    let result = run(game, &mut grid, &mut out, &mut InputSource::Terminal, frames, false);

    grid.clear_screen_manual(&mut out)?;
    out.execute_other_command(Show)?;
    result
}

/// Debug runs use a fixed step; the terminal uses wall-clock time and
/// sleeps off the rest of each frame.
fn run<S: KeyValueStore>(
    game: &mut Game<S>,
    grid: &mut GameGrid,
    out: &mut OutputTarget,
    input: &mut InputSource,
    max_frames: Option<u64>,
    fixed_step: bool,
) -> anyhow::Result<()> {
    let frame_budget = Duration::from_micros(1_000_000 / TARGET_FPS);
    let mut frame_count: u64 = 0;
    let mut last_frame = Instant::now();

    while game.is_running() && max_frames.is_none_or(|max| frame_count < max) {
        let frame_start = Instant::now();
        let dt = if fixed_step {
            frame_budget.as_secs_f64()
        } else {
            frame_start.duration_since(last_frame).as_secs_f64()
        };
        last_frame = frame_start;

        let poll = input.poll(frame_count)?;
        if let Some((width, height)) = poll.resized {
            info!("Terminal resized to {}x{}", width, height);
            grid.resize(width, height);
            grid.clear_screen_manual(out)?;
        }

        game.update(dt, &poll.input);
        rendering::draw(grid, game);
        grid.render(out)?;

        frame_count += 1;
        if fixed_step {
            if frame_count % TARGET_FPS == 0 {
                if let Some(sb) = out.screen_buffer() {
                    sb.print_to_log();
                }
            }
        } else if let Some(rest) = frame_budget.checked_sub(frame_start.elapsed()) {
            std::thread::sleep(rest);
        }
    }

    info!("Game loop ended after {} frames.", frame_count);
    Ok(())
}
