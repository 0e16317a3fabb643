//! Read-only copies of engine state for renderers and other observers.

use crate::events::ScoreSnapshot;
use crate::game_state::Tetromino;
use crate::pieces::{get_spawn_shape, PieceShape};
use crate::types::{Cell, ColorTag, GamePhase, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

pub type Grid = [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    /// Absolute `(x, y)` board cells
    pub cells: [(i8, i8); 4],
    pub color: ColorTag,
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
            cells: value.cells(),
            color: value.kind.color(),
        }
    }
}

/// On-deck piece, as shown in the preview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NextSnapshot {
    pub kind: PieceKind,
    /// Rotation-0 `(row, col)` offsets
    pub shape: PieceShape,
    pub color: ColorTag,
}

impl From<PieceKind> for NextSnapshot {
    fn from(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: get_spawn_shape(kind),
            color: kind.color(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: Grid,
    pub active: Option<ActiveSnapshot>,
    pub next: Option<NextSnapshot>,
    pub phase: GamePhase,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub drop_interval_ms: u32,
}

impl GameSnapshot {
    pub fn score_snapshot(&self) -> ScoreSnapshot {
        ScoreSnapshot {
            score: self.score,
            level: self.level,
            lines: self.lines,
        }
    }

    pub fn started(&self) -> bool {
        self.phase != GamePhase::NotStarted
    }

    pub fn paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn playable(&self) -> bool {
        self.phase == GamePhase::Running
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            next: None,
            phase: GamePhase::NotStarted,
            score: 0,
            level: 1,
            lines: 0,
            drop_interval_ms: crate::types::BASE_DROP_MS,
        }
    }
}
