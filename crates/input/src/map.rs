//! Key mapping from terminal events to game commands.
//!
//! Mapping depends on the game phase: movement only means something while a
//! game is running, Enter starts the first game and restarts after game over,
//! and P only pauses a live game.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::types::{Command, GamePhase};

/// What a key press asks the frontend to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyIntent {
    /// Forward to the engine.
    Command(Command),
    /// Flip the cue mute flag.
    ToggleMute,
    Quit,
}

/// Map keyboard input to an intent for the current phase.
pub fn map_key(key: KeyEvent, phase: GamePhase) -> Option<KeyIntent> {
    // Repeat events count as presses; releases (kitty protocol, Windows) never act.
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if should_quit(key) {
        return Some(KeyIntent::Quit);
    }

    match key.code {
        KeyCode::Char('m') | KeyCode::Char('M') => return Some(KeyIntent::ToggleMute),
        KeyCode::Enter => {
            return match phase {
                GamePhase::NotStarted => Some(KeyIntent::Command(Command::Start)),
                GamePhase::GameOver => Some(KeyIntent::Command(Command::Restart)),
                GamePhase::Running | GamePhase::Paused => None,
            };
        }
        KeyCode::Char('p') | KeyCode::Char('P') => {
            return match phase {
                GamePhase::Running | GamePhase::Paused => {
                    Some(KeyIntent::Command(Command::Pause))
                }
                GamePhase::NotStarted | GamePhase::GameOver => None,
            };
        }
        _ => {}
    }

    if phase != GamePhase::Running {
        return None;
    }
    gameplay_command(key.code).map(KeyIntent::Command)
}

/// Movement and rotation keys, independent of phase.
pub fn gameplay_command(code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::Left => Some(Command::MoveLeft),
        KeyCode::Right => Some(Command::MoveRight),
        KeyCode::Down => Some(Command::SoftDrop),
        KeyCode::Up => Some(Command::Rotate),
        KeyCode::Char(' ') => Some(Command::HardDrop),
        _ => None,
    }
}

/// Command to issue when the terminal loses focus.
pub fn focus_lost(phase: GamePhase) -> Option<Command> {
    (phase == GamePhase::Running).then_some(Command::Pause)
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
