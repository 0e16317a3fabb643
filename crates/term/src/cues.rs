//! Audio cue sequencing.
//!
//! [`CueSequencer`] decides *which* cue a command or event produces, honoring
//! the mute flag and the hard-drop/lock overlap rule. A [`CueSink`] decides how
//! a cue sounds; the terminal only has a bell, so [`BellSink`] rings it for the
//! cues worth interrupting for and stays silent otherwise.

use std::io::Write;

use anyhow::Result;

use crate::core::GameEvent;
use crate::types::{Command, HARD_DROP_LOCK_WINDOW_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Move,
    Rotate,
    SoftDrop,
    HardDrop,
    Lock,
    LineClear { count: u32 },
    LevelUp,
    GameOver,
    GameStart,
}

impl Cue {
    /// Cues a bell-only sink should make audible.
    pub fn is_loud(&self) -> bool {
        matches!(
            self,
            Cue::LineClear { .. } | Cue::LevelUp | Cue::GameOver
        )
    }
}

pub trait CueSink {
    fn play(&mut self, cue: Cue) -> Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct CueSequencer {
    muted: bool,
    last_hard_drop_ms: Option<u64>,
}

impl CueSequencer {
    pub fn new(muted: bool) -> Self {
        Self {
            muted,
            last_hard_drop_ms: None,
        }
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    /// Flip the mute flag and return the new value.
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    fn gate(&self, cue: Cue) -> Option<Cue> {
        (!self.muted).then_some(cue)
    }

    /// Cue for an inbound command, as issued by the player.
    pub fn on_command(&mut self, command: Command) -> Option<Cue> {
        let cue = match command {
            Command::MoveLeft | Command::MoveRight => Cue::Move,
            Command::Rotate => Cue::Rotate,
            Command::SoftDrop => Cue::SoftDrop,
            Command::HardDrop | Command::Pause | Command::Start | Command::Restart => return None,
        };
        self.gate(cue)
    }

    /// Cue for a published event at monotonic time `now_ms`.
    ///
    /// A lock within [`HARD_DROP_LOCK_WINDOW_MS`] of a hard drop is silent; the
    /// hard drop time is recorded even while muted.
    pub fn on_event(&mut self, event: &GameEvent, now_ms: u64) -> Option<Cue> {
        let cue = match event {
            GameEvent::HardDrop => {
                self.last_hard_drop_ms = Some(now_ms);
                Cue::HardDrop
            }
            GameEvent::PieceLocked => {
                let recent = self
                    .last_hard_drop_ms
                    .is_some_and(|t| now_ms.saturating_sub(t) < HARD_DROP_LOCK_WINDOW_MS);
                if recent {
                    return None;
                }
                Cue::Lock
            }
            GameEvent::LinesCleared { count, .. } => Cue::LineClear { count: *count },
            GameEvent::LevelUp { .. } => Cue::LevelUp,
            GameEvent::GameOver => Cue::GameOver,
            GameEvent::GameStart => Cue::GameStart,
            GameEvent::PieceMoved | GameEvent::ScoreChanged(_) | GameEvent::GamePause { .. } => {
                return None
            }
        };
        self.gate(cue)
    }
}

/// Rings the terminal bell (BEL) for loud cues.
pub struct BellSink<W: Write> {
    out: W,
}

impl<W: Write> BellSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> CueSink for BellSink<W> {
    fn play(&mut self, cue: Cue) -> Result<()> {
        if cue.is_loud() {
            self.out.write_all(b"\x07")?;
            self.out.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bell_sink_rings_for_loud_cues_only() {
        let mut sink = BellSink::new(Vec::new());
        sink.play(Cue::Move).unwrap();
        sink.play(Cue::Lock).unwrap();
        sink.play(Cue::LineClear { count: 2 }).unwrap();
        sink.play(Cue::GameOver).unwrap();
        assert_eq!(sink.into_inner(), b"\x07\x07".to_vec());
    }

    #[test]
    fn toggle_mute_reports_new_state() {
        let mut seq = CueSequencer::new(false);
        assert!(seq.toggle_mute());
        assert!(seq.muted());
        assert!(!seq.toggle_mute());
    }
}
