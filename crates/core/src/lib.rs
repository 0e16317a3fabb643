//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It has no dependencies on terminals, audio, or files: the engine only consumes
//! commands and elapsed time, and reports through its event bus.
//!
//! - **Deterministic**: Same seed and same inputs produce identical games
//! - **Testable**: Unit tests for every rule
//! - **Portable**: Runs headless, in the terminal frontend, or in a test harness
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with collision tests and row removal
//! - [`pieces`]: Tetromino shapes, spawn columns and SRS wall kicks
//! - [`rng`]: 7-bag randomizer driven by a seeded LCG
//! - [`scoring`]: Line, drop and level arithmetic
//! - [`events`]: Outbound events and the synchronous bus that delivers them
//! - [`game_state`]: The simulation engine
//! - [`snapshot`]: Read-only copies of engine state for renderers
//!
//! # Game Rules
//!
//! - **7-Bag Randomizer**: every aligned run of seven pieces holds each kind once
//! - **SRS Rotation**: clockwise only, five kick candidates per rotation
//! - **Immediate lock**: a piece locks the moment it cannot fall
//! - **Scoring**: 100/300/500/800 x level for 1-4 rows, +1 per soft drop row,
//!   +2 per hard drop row
//! - **Levels**: one per 10 lines; gravity speeds up 75ms per level down to 100ms
//!
//! # Example
//!
//! ```
//! use blockdrop_core::GameState;
//! use blockdrop_core::types::Command;
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! game.handle_command(Command::MoveRight);
//! game.handle_command(Command::Rotate);
//! game.handle_command(Command::HardDrop);
//!
//! assert!(game.score() > 0); // Hard drop awards points
//! ```
//!
//! # Timing
//!
//! The host calls [`GameState::tick`](game_state::GameState::tick) with elapsed
//! milliseconds. Gravity steps at most once per call.

pub mod board;
pub mod events;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockdrop_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, RowList};
pub use events::{EventBus, EventKind, GameEvent, ScoreSnapshot, SubscriptionId};
pub use game_state::{GameState, Tetromino};
pub use pieces::{get_shape, try_rotate};
pub use rng::{PieceBag, SimpleRng};
pub use scoring::{calculate_drop_score, calculate_level, calculate_line_score};
pub use snapshot::{ActiveSnapshot, GameSnapshot, Grid, NextSnapshot};
