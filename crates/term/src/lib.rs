//! Terminal frontend module.
//!
//! A small, game-oriented rendering layer: the view draws a [`core::GameSnapshot`]
//! into a framebuffer, and the renderer flushes only the cells that changed.
//! It also holds the frontend-only effects driven by engine events: the line
//! clear flash and cue sequencing.

pub mod cues;
pub mod fb;
pub mod flash;
pub mod game_view;
pub mod renderer;

pub use blockdrop_core as core;
pub use blockdrop_types as types;

pub use cues::{BellSink, Cue, CueSequencer, CueSink};
pub use fb::{CellStyle, FrameBuffer, Glyph, Rgb};
pub use flash::LineFlash;
pub use game_view::{ghost_drop, GameView, Hud, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
