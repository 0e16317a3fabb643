//! Session: the engine plus the frontend state that reacts to its events.
//!
//! The engine's bus handler only queues events; they are drained after each
//! engine call, so frontend reactions (cues, flash, high score, event log) never
//! run while the engine is mid-operation.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use anyhow::Result;

use crate::core::{GameEvent, GameSnapshot, GameState};
use crate::event_log::EventLog;
use crate::settings::Settings;
use crate::term::{CueSequencer, CueSink, Hud, LineFlash};
use crate::types::{Command, GamePhase, MAX_FRAME_MS};

/// Measured frame time in whole milliseconds, capped at [`MAX_FRAME_MS`].
pub fn frame_ms(elapsed: Duration) -> u32 {
    elapsed.as_millis().min(MAX_FRAME_MS as u128) as u32
}

pub struct Session {
    game: GameState,
    inbox: Rc<RefCell<VecDeque<GameEvent>>>,
    cues: CueSequencer,
    flash: LineFlash,
    settings: Settings,
    save_pending: bool,
}

impl Session {
    /// `force_muted` silences cues without touching the saved mute flag.
    pub fn new(seed: u32, settings: Settings, force_muted: bool) -> Self {
        let mut game = GameState::new(seed);
        let inbox = Rc::new(RefCell::new(VecDeque::new()));
        let queue = Rc::clone(&inbox);
        game.events_mut()
            .subscribe_all(move |event| queue.borrow_mut().push_back(event.clone()));

        Self {
            game,
            inbox,
            cues: CueSequencer::new(settings.muted || force_muted),
            flash: LineFlash::new(),
            settings,
            save_pending: false,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn phase(&self) -> GamePhase {
        self.game.phase()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn muted(&self) -> bool {
        self.cues.muted()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.game.snapshot_into(out);
    }

    pub fn hud(&self) -> Hud<'_> {
        Hud {
            high_score: self.settings.high_score,
            muted: self.cues.muted(),
            flash_rows: self.flash.rows(),
        }
    }

    /// Issue a player command: its own cue first, then the engine.
    pub fn command(&mut self, command: Command, sink: &mut dyn CueSink) -> Result<bool> {
        if command.is_gameplay() && self.phase() == GamePhase::Running {
            if let Some(cue) = self.cues.on_command(command) {
                sink.play(cue)?;
            }
        }
        Ok(self.game.handle_command(command))
    }

    pub fn toggle_mute(&mut self) -> bool {
        let muted = self.cues.toggle_mute();
        self.settings.muted = muted;
        self.save_pending = true;
        muted
    }

    /// Feed the frame clock to the engine and the line flash.
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        self.flash.advance(elapsed_ms);
        self.game.tick(elapsed_ms)
    }

    /// Handle every queued event. Returns how many were handled.
    pub fn drain_events(
        &mut self,
        now_ms: u64,
        sink: &mut dyn CueSink,
        mut log: Option<&mut EventLog>,
    ) -> Result<usize> {
        let mut handled = 0;
        loop {
            let next = self.inbox.borrow_mut().pop_front();
            let Some(event) = next else {
                break;
            };
            handled += 1;

            if let Some(log) = log.as_deref_mut() {
                log.write(&event)?;
            }

            match &event {
                GameEvent::LinesCleared { rows, .. } => self.flash.trigger(rows),
                GameEvent::ScoreChanged(s) => {
                    self.settings.record_score(s.score);
                }
                GameEvent::GameOver => self.save_pending = true,
                _ => {}
            }

            if let Some(cue) = self.cues.on_event(&event, now_ms) {
                sink.play(cue)?;
            }
        }
        Ok(handled)
    }

    /// True once after a game over or mute change: settings should be written.
    pub fn take_save_request(&mut self) -> bool {
        std::mem::take(&mut self.save_pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::Cue;

    #[derive(Default)]
    struct Recorder(Vec<Cue>);

    #[test]
    fn test_frame_ms_uses_measured_time_up_to_cap() {
        assert_eq!(frame_ms(Duration::from_micros(16_900)), 16);
        assert_eq!(frame_ms(Duration::from_millis(40)), 40);
        assert_eq!(frame_ms(Duration::from_secs(30)), MAX_FRAME_MS);
    }

    #[test]
    fn test_slow_frame_still_drops_on_time() {
        let mut session = Session::new(3, Settings::default(), true);
        let mut sink = Recorder::default();
        session.command(Command::Start, &mut sink).unwrap();
        let y0 = session.game().active().unwrap().y;

        // Four 250 ms frames cover one second of gravity.
        for _ in 0..4 {
            session.advance(frame_ms(Duration::from_millis(250)));
        }
        assert_eq!(session.game().active().unwrap().y, y0 + 1);
    }

    impl CueSink for Recorder {
        fn play(&mut self, cue: Cue) -> Result<()> {
            self.0.push(cue);
            Ok(())
        }
    }

    #[test]
    fn test_start_plays_start_cue_and_tracks_score() {
        let mut session = Session::new(3, Settings::default(), false);
        let mut sink = Recorder::default();

        session.command(Command::Start, &mut sink).unwrap();
        assert_eq!(session.drain_events(0, &mut sink, None).unwrap(), 2);
        assert_eq!(sink.0, vec![Cue::GameStart]);

        session.command(Command::HardDrop, &mut sink).unwrap();
        session.drain_events(10, &mut sink, None).unwrap();
        assert!(session.settings().high_score > 0);
        // Lock right after the hard drop stays silent.
        assert_eq!(sink.0, vec![Cue::GameStart, Cue::HardDrop]);
    }

    #[test]
    fn test_movement_cue_only_while_running() {
        let mut session = Session::new(3, Settings::default(), false);
        let mut sink = Recorder::default();

        session.command(Command::MoveLeft, &mut sink).unwrap();
        assert!(sink.0.is_empty());

        session.command(Command::Start, &mut sink).unwrap();
        session.drain_events(0, &mut sink, None).unwrap();
        session.command(Command::MoveLeft, &mut sink).unwrap();
        assert_eq!(sink.0.last(), Some(&Cue::Move));
    }

    #[test]
    fn test_force_muted_keeps_saved_flag() {
        let mut session = Session::new(3, Settings::default(), true);
        let mut sink = Recorder::default();
        session.command(Command::Start, &mut sink).unwrap();
        session.drain_events(0, &mut sink, None).unwrap();

        assert!(session.muted());
        assert!(!session.settings().muted);
        assert!(sink.0.is_empty());
    }

    #[test]
    fn test_toggle_mute_requests_save() {
        let mut session = Session::new(3, Settings::default(), false);
        assert!(session.toggle_mute());
        assert!(session.settings().muted);
        assert!(session.take_save_request());
        assert!(!session.take_save_request());
    }
}
