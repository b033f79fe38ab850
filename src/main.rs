//! Terminal Battlezone runner (default binary).
//!
//! Drives the core [`Game`] at a fixed frame rate: crossterm events in,
//! braille-rasterized frames and host commands out.

use std::fs::File;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use env_logger::{Env, Target};
use log::{debug, info};

use battlezone::core::{Game, RunConfig, SimpleRng};
use battlezone::input::InputHandler;
use battlezone::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use battlezone::types::{HostCommand, InputEvent};

fn main() -> Result<()> {
    // Config errors are reported before the terminal is taken over.
    let config = RunConfig::from_env()?;
    init_logging(&config)?;

    let seed = config.seed.unwrap_or_else(seed_from_time);
    info!(
        "starting: seed={} fps={} enemy_fire={:?}",
        seed, config.fps, config.enemy_fire
    );

    let mut term = TerminalRenderer::new();
    let result = term.enter().and_then(|()| run(&mut term, &config, seed));

    // Always try to restore terminal state.
    let restored = term.exit();
    result?;
    restored
}

fn init_logging(config: &RunConfig) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn seed_from_time() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, config: &RunConfig, seed: u32) -> Result<()> {
    let (cols, rows) = crossterm::terminal::size().unwrap_or((80, 24));
    debug!("terminal size {}x{}", cols, rows);

    let mut game = Game::new(config.game_config(), SimpleRng::new(seed));
    let mut input = InputHandler::new(cols, rows);
    let mut view = GameView::new();
    let mut viewport = Viewport::new(cols, rows);
    let mut fb = FrameBuffer::new(cols, rows);

    let mut events: Vec<InputEvent> = Vec::with_capacity(32);
    let mut commands: Vec<HostCommand> = Vec::with_capacity(8);
    let budget = Duration::from_secs_f64(config.frame_secs());

    apply_commands(&mut game, term, &mut input, &mut commands)?;

    let mut last_frame = Instant::now();
    loop {
        let frame_start = Instant::now();
        let elapsed = frame_start.duration_since(last_frame);
        last_frame = frame_start;

        input.update(u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX));

        events.clear();
        while event::poll(Duration::ZERO)? {
            let ev = event::read()?;
            if let Event::Resize(w, h) = ev {
                viewport = Viewport::new(w, h);
                term.invalidate();
            }
            if let Some(e) = input.handle_event(&ev) {
                events.push(e);
            }
        }

        let Some(frame) = game.step(&events, input.held(), elapsed.as_secs_f64()) else {
            break;
        };
        view.render_into(frame, viewport, &mut fb);

        apply_commands(&mut game, term, &mut input, &mut commands)?;
        term.draw_swap(&mut fb)?;

        if let Some(rest) = budget.checked_sub(frame_start.elapsed()) {
            std::thread::sleep(rest);
        }
    }

    info!("exiting after {:.1}s of game time", game.clock());
    Ok(())
}

/// Hand queued host commands to the terminal.
fn apply_commands(
    game: &mut Game,
    term: &mut TerminalRenderer,
    input: &mut InputHandler,
    commands: &mut Vec<HostCommand>,
) -> Result<()> {
    commands.clear();
    commands.extend(game.drain_commands());
    if commands.is_empty() {
        return Ok(());
    }
    input.observe_commands(commands);
    term.apply(commands)
}
