//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key and focus events into [`crate::types::Command`]s for the
//! engine, plus the frontend-only intents (mute, quit). Holds no state: the
//! caller passes the current [`crate::types::GamePhase`] with every event.

pub mod map;

pub use blockdrop_types as types;

pub use map::{focus_lost, gameplay_command, map_key, should_quit, KeyIntent};
