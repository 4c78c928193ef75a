use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dodgebox_input::Button;
use dodgebox_kernel::{Clock, Game, GameConfig, ManualClock, SystemClock};
use dodgebox_render::{DebugTextRenderer, MemoryScene, RenderView, Renderer, SceneBinder};
use dodgebox_tools::GameInspector;
use tracing_subscriber::EnvFilter;

const FRAME: Duration = Duration::from_millis(16);

#[derive(Parser)]
#[command(name = "dodgebox-cli", about = "Headless host for the dodgebox game")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Print the default game configuration as JSON
    Config,
    /// Run a headless session
    Run {
        /// Maximum number of frames to simulate
        #[arg(short, long, default_value = "600")]
        ticks: u64,
        /// RNG seed for enemy placement
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// JSON config file; missing fields take their defaults
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Buttons held for the whole session, e.g. `left,forward`
        #[arg(long, value_delimiter = ',')]
        hold: Vec<Button>,
        /// Press jump every N frames
        #[arg(long)]
        jump_every: Option<u64>,
        /// Print the debug view every N frames
        #[arg(long)]
        render_every: Option<u64>,
        /// Pace frames against the wall clock instead of a simulated one
        #[arg(long)]
        realtime: bool,
    },
}

struct RunOptions {
    ticks: u64,
    hold: Vec<Button>,
    jump_every: Option<u64>,
    render_every: Option<u64>,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    GameConfig::from_json_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn run_session<C: Clock>(
    mut game: Game<C>,
    opts: &RunOptions,
    mut advance: impl FnMut(&C),
) -> anyhow::Result<()> {
    let view = RenderView::default();
    let renderer = DebugTextRenderer::new();
    let mut binder = SceneBinder::attach(MemoryScene::new(), &game, view);

    for button in &opts.hold {
        game.input_mut().press(*button);
    }

    let span = tracing::info_span!("session", seed = game.seed());
    let _enter = span.enter();

    while game.is_running() && game.frame() < opts.ticks {
        if opts.jump_every.is_some_and(|n| n > 0 && game.frame() % n == 0) {
            game.input_mut().press(Button::Jump);
        }

        game.tick();
        let events = game.drain_events();
        binder.sync(&game, &events).context("syncing scene")?;

        if opts.render_every.is_some_and(|n| n > 0 && game.frame() % n == 0) {
            print!("{}", renderer.render(&game, &view));
        }

        advance(game.clock());
    }

    println!(
        "Scene: {} nodes, {} lights",
        binder.scene().node_count(),
        binder.scene().lights().len()
    );
    if let Some((id, distance)) = GameInspector::closest_enemy(&game) {
        println!("Closest enemy: {} at {distance:.2}", id.short());
    }
    println!("{}", GameInspector::summary(&game));
    match game.stop_reason() {
        Some(reason) => println!("Game over: {reason}"),
        None => println!("Survived {} frames", game.frame()),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("dodgebox-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("kernel: {}", dodgebox_kernel::crate_info());
            println!("render: {}", dodgebox_render::crate_info());
            println!("input: {}", dodgebox_input::crate_info());
            println!("tools: {}", dodgebox_tools::crate_info());
            println!("common: id={}", dodgebox_common::BodyId::new().short());
        }
        Commands::Config => {
            println!("{}", GameConfig::default().to_json_pretty());
        }
        Commands::Run {
            ticks,
            seed,
            config,
            hold,
            jump_every,
            render_every,
            realtime,
        } => {
            let config = load_config(config.as_ref())?;
            let opts = RunOptions {
                ticks,
                hold,
                jump_every,
                render_every,
            };
            println!("Running: seed={seed}, ticks={ticks}, realtime={realtime}");

            if realtime {
                let game = Game::with_clock(config, seed, SystemClock::new())?;
                run_session(game, &opts, |_| std::thread::sleep(FRAME))?;
            } else {
                let game = Game::with_clock(config, seed, ManualClock::new())?;
                run_session(game, &opts, |clock| clock.advance(FRAME))?;
            }
        }
    }

    Ok(())
}
