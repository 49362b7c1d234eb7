/// Entry point and game loop.

mod config;
mod domain;
mod sim;
mod ui;

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use config::{GameConfig, MIN_BOARD};
use domain::entity::TurnCommand;
use sim::event::GameEvent;
use sim::level;
use sim::step;
use sim::world::{GameState, Phase};
use ui::input;
use ui::renderer::Renderer;

#[derive(Parser)]
#[command(name = "boxbound")]
#[command(about = "A terminal box-pushing puzzle", long_about = None)]
struct Args {
    /// Board width for every level (minimum 4)
    #[arg(short = 'W', long)]
    width: Option<i32>,

    /// Board height for every level (minimum 4)
    #[arg(short = 'H', long)]
    height: Option<i32>,

    /// RNG seed for reproducible level layouts
    #[arg(long)]
    seed: Option<u64>,

    /// Player glyph
    #[arg(long, value_name = "GLYPH")]
    player_glyph: Option<String>,

    /// Box glyph
    #[arg(long, value_name = "GLYPH")]
    box_glyph: Option<String>,

    /// Captured-box glyph
    #[arg(long, value_name = "GLYPH")]
    captured_glyph: Option<String>,

    /// Target glyph
    #[arg(long, value_name = "GLYPH")]
    target_glyph: Option<String>,

    /// Background glyph
    #[arg(long, value_name = "GLYPH")]
    background_glyph: Option<String>,

    /// Wall glyph
    #[arg(long, value_name = "GLYPH")]
    wall_glyph: Option<String>,
}

fn apply_overrides(config: &mut GameConfig, args: &Args) {
    if let Some(w) = args.width {
        config.override_width(w);
    }
    if let Some(h) = args.height {
        config.override_height(h);
    }
    config.seed = args.seed;

    let g = &mut config.glyphs;
    if let Some(s) = &args.player_glyph {
        g.player = s.clone();
    }
    if let Some(s) = &args.box_glyph {
        g.box_ = s.clone();
    }
    if let Some(s) = &args.captured_glyph {
        g.captured = s.clone();
    }
    if let Some(s) = &args.target_glyph {
        g.target = s.clone();
    }
    if let Some(s) = &args.background_glyph {
        g.background = s.clone();
    }
    if let Some(s) = &args.wall_glyph {
        g.wall = s.clone();
    }
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    let mut config = GameConfig::load();
    apply_overrides(&mut config, &args);

    if let Err(e) = config.validate() {
        eprintln!("Error: {e} (boards must be at least {MIN_BOARD}x{MIN_BOARD})");
        std::process::exit(1);
    }

    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let boards: Result<Vec<_>, String> = config
        .plan
        .iter()
        .map(|&(w, h)| level::generate(w, h, &mut rng))
        .collect();
    let boards = match boards {
        Ok(boards) => boards,
        Err(e) => {
            eprintln!("Error: level construction failed: {e}");
            std::process::exit(1);
        }
    };

    let mut world = GameState::new(boards);
    let mut renderer = Renderer::new();

    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        std::process::exit(1);
    }

    let result = game_loop(&mut world, &mut renderer, &config);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    if let Err(e) = result {
        eprintln!("Game error: {e}");
        std::process::exit(1);
    }

    if world.phase == Phase::GameComplete {
        println!("All {} levels cleared. Thanks for playing!", world.level_count());
    }
}

fn game_loop(
    world: &mut GameState,
    renderer: &mut Renderer,
    config: &GameConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        renderer.render(world, &config.glyphs)?;

        if world.phase == Phase::GameComplete {
            // Leave the final board on screen until a key is pressed.
            input::wait_for_key()?;
            return Ok(());
        }

        let command = input::read_command()?;
        if command == TurnCommand::Quit {
            return Ok(());
        }

        let events = step::step(world, command);
        update_message(world, &events);
    }
}

/// Turn events into the status message shown above the help line.
fn update_message(world: &mut GameState, events: &[GameEvent]) {
    world.message.clear();
    for event in events {
        match event {
            GameEvent::BoxCaptured { score, total } => {
                let msg = format!(" Captured! {score}/{total}");
                world.set_message(&msg);
            }
            GameEvent::LevelReset => world.set_message(" Level reset"),
            GameEvent::LevelComplete { index } => {
                let msg = format!(" Level {} cleared!", index + 1);
                world.set_message(&msg);
            }
            GameEvent::GameComplete => world.set_message(" All levels cleared!"),
        }
    }
}
