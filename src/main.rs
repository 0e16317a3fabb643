//! Terminal runner (default binary).
//!
//! Owns the frame clock: every tick the elapsed time is fed to the engine, key
//! and focus events become commands, queued engine events are drained into the
//! frontend, and the frame is redrawn.

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};

use blockdrop::config::GameConfig;
use blockdrop::core::GameSnapshot;
use blockdrop::event_log::EventLog;
use blockdrop::input::{focus_lost, map_key, KeyIntent};
use blockdrop::session::{frame_ms, Session};
use blockdrop::settings::Settings;
use blockdrop::term::{BellSink, FrameBuffer, GameView, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    let config = GameConfig::from_env();
    eprintln!(
        "[blockdrop] seed {} tick {}ms settings {}",
        config.seed,
        config.tick_ms,
        config.settings_path.display()
    );

    let settings = Settings::load_or_default(&config.settings_path);
    let mut event_log = match &config.event_log_path {
        Some(path) => match EventLog::open(path) {
            Ok(log) => Some(log),
            Err(e) => {
                eprintln!("[blockdrop] event log disabled: {:#}", e);
                None
            }
        },
        None => None,
    };

    let mut session = Session::new(config.seed, settings, config.force_muted);

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = run(&mut term, &mut session, &config, event_log.as_mut());
    // Always try to restore terminal state.
    let _ = term.exit();

    if let Some(log) = event_log.as_mut() {
        if let Err(e) = log.flush() {
            eprintln!("[blockdrop] {:#}", e);
        }
    }
    save_settings(&session, &config);
    eprintln!(
        "[blockdrop] final score {} (high score {})",
        session.game().score(),
        session.settings().high_score
    );
    result
}

fn save_settings(session: &Session, config: &GameConfig) {
    if let Err(e) = session.settings().save(&config.settings_path) {
        // stderr would corrupt the alternate screen; the save on exit reports instead.
        if !crossterm::terminal::is_raw_mode_enabled().unwrap_or(false) {
            eprintln!("[blockdrop] {:#}", e);
        }
    }
}

fn run(
    term: &mut TerminalRenderer,
    session: &mut Session,
    config: &GameConfig,
    mut event_log: Option<&mut EventLog>,
) -> Result<()> {
    let view = GameView::default();
    let mut bell = BellSink::new(io::stdout());
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let clock = Instant::now();
    let tick = Duration::from_millis(config.tick_ms as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        session.snapshot_into(&mut snap);
        view.render_into(&snap, &session.hud(), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match map_key(key, session.phase()) {
                    Some(KeyIntent::Quit) => return Ok(()),
                    Some(KeyIntent::ToggleMute) => {
                        session.toggle_mute();
                    }
                    Some(KeyIntent::Command(command)) => {
                        session.command(command, &mut bell)?;
                    }
                    None => {}
                },
                Event::FocusLost => {
                    if let Some(command) = focus_lost(session.phase()) {
                        session.command(command, &mut bell)?;
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick {
            last_tick = Instant::now();
            session.advance(frame_ms(elapsed));
        }

        let now_ms = clock.elapsed().as_millis() as u64;
        session.drain_events(now_ms, &mut bell, event_log.as_deref_mut())?;

        if session.take_save_request() {
            save_settings(session, config);
        }
    }
}
