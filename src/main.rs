//! Terminal Stack & Slide runner (default binary).
//!
//! It uses crossterm for input and a custom framebuffer-based renderer.
//! The simulation advances on a fixed 10ms frame; redraws are skipped while
//! nothing on screen is moving.

use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};

use stack_slide::config::{Cli, Config};
use stack_slide::core::{GameSnapshot, GameState};
use stack_slide::input::{handle_key_event, handle_mouse_event, should_quit, TapGate};
use stack_slide::logging;
use stack_slide::term::{FrameBuffer, GameView, RenderThrottle, TerminalRenderer, Viewport};
use stack_slide::types::{GameAction, FRAME_MS};

fn main() -> Result<()> {
    let config = Cli::parse().into_config()?;
    logging::init(config.log_file.as_deref())?;
    log::info!(
        "starting: rules={} seed={} mute={}",
        config.variant.as_str(),
        config.seed,
        config.mute
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(e) = &result {
        log::error!("game loop failed: {e:#}");
    }
    result
}

fn run(term: &mut TerminalRenderer, config: &Config) -> Result<()> {
    let mut game_state = GameState::try_with_rules(config.seed, config.rules)?;
    let mut tap_gate = TapGate::with_interval_ms(config.tap_interval_ms);

    let view = GameView::default();
    let mut throttle = RenderThrottle::default();
    let mut snap = GameSnapshot::default();

    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut viewport = Viewport::new(w, h);
    let mut fb = FrameBuffer::new(w, h);

    let clock = Instant::now();
    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(FRAME_MS as u64);

    loop {
        let now_ms = clock.elapsed().as_millis() as u64;

        // Render.
        game_state.snapshot_into(&mut snap);
        if throttle.should_render(now_ms, snap.fingerprint(), !snap.animating) {
            view.render_into(&snap, viewport, &mut fb);
            term.draw_swap(&mut fb)?;
        }

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            let action = match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            log::info!("quit requested");
                            return Ok(());
                        }
                        handle_key_event(key)
                    }
                    // Held keys are handled by the tap gate.
                    KeyEventKind::Repeat | KeyEventKind::Release => None,
                },
                Event::Mouse(mouse) => handle_mouse_event(mouse),
                Event::Resize(w, h) => {
                    viewport = Viewport::new(w, h);
                    term.invalidate();
                    throttle.reset();
                    None
                }
                _ => None,
            };

            if let Some(action) = action {
                dispatch(&mut game_state, &mut tap_gate, action, now_ms);
            }
        }

        // Tick. Feed the whole elapsed time so a slow frame catches up; the
        // sub-millisecond remainder stays on the clock.
        let behind = last_tick.elapsed();
        if behind >= tick_duration {
            let elapsed_ms = u32::try_from(behind.as_millis()).unwrap_or(u32::MAX);
            last_tick += Duration::from_millis(u64::from(elapsed_ms));
            game_state.tick(elapsed_ms);
        }

        // One bell per batch of cues.
        if !game_state.take_cues().is_empty() && !config.mute {
            term.bell()?;
        }
    }
}

fn dispatch(game_state: &mut GameState, tap_gate: &mut TapGate, action: GameAction, now_ms: u64) {
    if action == GameAction::Tap && !tap_gate.accept(now_ms) {
        return;
    }
    if !game_state.apply_action(action) {
        log::debug!("{} ignored in {}", action.as_str(), game_state.phase().as_str());
    }
}
