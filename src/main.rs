use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::terminal::supports_keyboard_enhancement;

use alien_invasion::app::App;
use alien_invasion::assets::Assets;
use alien_invasion::event::{Event, EventHandler, KeyTracker};
use alien_invasion::settings::Settings;
use alien_invasion::terminal::{self, Tui};
use alien_invasion::ui;

#[derive(Parser, Debug)]
#[command(name = "alien-invasion")]
#[command(about = "Shoot down a descending alien fleet, in your terminal")]
struct Args {
    /// JSON file overriding the default settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding ship.txt and alien.txt sprites
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Log file (the terminal itself is busy drawing the game)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Start using the whole terminal
    #[arg(long)]
    fullscreen: bool,

    /// Milliseconds per frame
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("failed to initialise logging")?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_path = args
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("alien-invasion.log"));
    init_logging(&log_path)?;

    // Everything that can fail on bad input happens before raw mode
    let settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let assets = match &args.assets {
        Some(dir) => Assets::load(dir)?,
        None => Assets::builtin()?,
    };

    // Setup terminal
    let reports_release = matches!(supports_keyboard_enhancement(), Ok(true));
    terminal::install_panic_hook(reports_release);
    let mut tui = terminal::init(reports_release)?;

    let result = play(&mut tui, settings, assets, &args, reports_release);

    // Restore terminal
    let restored = terminal::restore(reports_release).context("failed to restore terminal");
    if let Err(e) = &result {
        log::error!("Game loop failed: {e:#}");
    }
    result.and(restored)
}

fn play(
    tui: &mut Tui,
    settings: Settings,
    assets: Assets,
    args: &Args,
    reports_release: bool,
) -> Result<()> {
    let size = tui.size()?;
    log::info!(
        "Terminal {}x{}, key release events {}",
        size.width,
        size.height,
        if reports_release { "on" } else { "off" }
    );

    let mut app = App::new(
        settings,
        assets,
        (size.width, size.height),
        args.fullscreen,
        KeyTracker::new(reports_release, args.tick_ms),
    );
    let event_handler = EventHandler::new(args.tick_ms);

    run(tui, &mut app, &event_handler)?;
    log::info!(
        "Quit with score {} (high {})",
        app.invasion.stats().score,
        app.invasion.stats().high_score
    );
    Ok(())
}

fn run(tui: &mut Tui, app: &mut App, events: &EventHandler) -> Result<()> {
    loop {
        tui.draw(|frame| ui::render(frame, app))?;

        match events.next()? {
            Event::Tick => app.on_tick(),
            Event::Key(key) => app.on_key(key),
            Event::Mouse(mouse) => app.on_mouse(mouse),
            Event::Resize(cols, rows) => app.on_resize(cols, rows),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
