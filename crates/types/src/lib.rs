//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game. All types
//! are pure data with no external dependencies, so they can be shared by the
//! simulation core, the terminal front-end and the input mapping alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//!
//! # Timing
//!
//! All durations are integer milliseconds.
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Default frame-clock period (~60 FPS) |
//! | `BASE_DROP_MS` | 1000 | Gravity interval at level 1 |
//! | `DROP_INTERVAL_STEP_MS` | 75 | Gravity speed-up per level |
//! | `DROP_INTERVAL_MIN_MS` | 100 | Fastest gravity interval |
//! | `HARD_DROP_LOCK_WINDOW_MS` | 100 | Lock cue suppression after a hard-drop cue |
//! | `LINE_FLASH_MS` | 150 | Cleared-row flash duration |
//!
//! # Examples
//!
//! ```
//! use blockdrop_types::{Command, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//!
//! assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
//! assert_eq!(Command::from_str("input-drop"), Some(Command::HardDrop));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Default frame-clock period in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 1 (1000ms = 1 second per row)
pub const BASE_DROP_MS: u32 = 1000;

/// Gravity interval reduction per level above 1
pub const DROP_INTERVAL_STEP_MS: u32 = 75;

/// Gravity never gets faster than this
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Points per cell for a player-initiated soft drop
pub const SOFT_DROP_POINTS: u32 = 1;

/// Points per cell for a hard drop
pub const HARD_DROP_POINTS_PER_CELL: u32 = 2;

/// Line clear base points indexed by rows cleared in one lock (multiplied by level).
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// A lock cue within this window after a hard-drop cue is swallowed.
pub const HARD_DROP_LOCK_WINDOW_MS: u64 = 100;

/// How long cleared rows flash in the terminal view.
pub const LINE_FLASH_MS: u32 = 150;

/// Longest frame fed to the engine; longer stalls count as this much.
pub const MAX_FRAME_MS: u32 = 250;

/// Tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// Every kind, in catalog order. One randomizer bag is a permutation of this.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Upper-case letter, as shown in the side panel
    pub fn letter(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }

    /// Immutable color tag of this kind.
    pub const fn color(&self) -> ColorTag {
        match self {
            PieceKind::I => ColorTag(0x00f0f0),
            PieceKind::O => ColorTag(0xf0f000),
            PieceKind::T => ColorTag(0xa000f0),
            PieceKind::S => ColorTag(0x00f000),
            PieceKind::Z => ColorTag(0xf00000),
            PieceKind::J => ColorTag(0x0000f0),
            PieceKind::L => ColorTag(0xf0a000),
        }
    }
}

/// Opaque color identifier written into board cells on lock (0xRRGGBB).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorTag(pub u32);

impl ColorTag {
    /// Split into 8-bit channels.
    pub const fn rgb(&self) -> (u8, u8, u8) {
        (
            ((self.0 >> 16) & 0xff) as u8,
            ((self.0 >> 8) & 0xff) as u8,
            (self.0 & 0xff) as u8,
        )
    }
}

/// Cell on the board (None = empty, Some = filled with the color of the piece that locked there)
pub type Cell = Option<ColorTag>;

/// Rotation states (North = spawn orientation, clockwise order)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotation index in `0..4`
    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Inverse of [`Rotation::index`], wrapping modulo 4
    pub fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Horizontal move direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn dx(&self) -> i8 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// Inbound commands relayed to the engine by the input collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    HardDrop,
    Pause,
    Start,
    Restart,
}

impl Command {
    pub const ALL: [Command; 8] = [
        Command::MoveLeft,
        Command::MoveRight,
        Command::SoftDrop,
        Command::Rotate,
        Command::HardDrop,
        Command::Pause,
        Command::Start,
        Command::Restart,
    ];

    /// Parse a command from its occurrence name
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "input-left" => Some(Command::MoveLeft),
            "input-right" => Some(Command::MoveRight),
            "input-down" => Some(Command::SoftDrop),
            "input-rotate" => Some(Command::Rotate),
            "input-drop" => Some(Command::HardDrop),
            "input-pause" => Some(Command::Pause),
            "input-start" => Some(Command::Start),
            "request-restart" => Some(Command::Restart),
            _ => None,
        }
    }

    /// Occurrence name
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "input-left",
            Command::MoveRight => "input-right",
            Command::SoftDrop => "input-down",
            Command::Rotate => "input-rotate",
            Command::HardDrop => "input-drop",
            Command::Pause => "input-pause",
            Command::Start => "input-start",
            Command::Restart => "request-restart",
        }
    }

    /// Commands that only act on a running game.
    pub fn is_gameplay(&self) -> bool {
        matches!(
            self,
            Command::MoveLeft
                | Command::MoveRight
                | Command::SoftDrop
                | Command::Rotate
                | Command::HardDrop
        )
    }
}

/// Engine lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamePhase {
    NotStarted,
    Running,
    Paused,
    GameOver,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_names_roundtrip() {
        for cmd in Command::ALL {
            assert_eq!(Command::from_str(cmd.as_str()), Some(cmd));
        }
        assert_eq!(Command::from_str("input-hold"), None);
    }

    #[test]
    fn test_rotation_index_wraps() {
        assert_eq!(Rotation::from_index(5), Rotation::East);
        assert_eq!(Rotation::West.rotate_cw().index(), 0);
    }

    #[test]
    fn test_color_tag_channels() {
        assert_eq!(PieceKind::L.color().rgb(), (0xf0, 0xa0, 0x00));
        assert_eq!(PieceKind::I.color().rgb(), (0x00, 0xf0, 0xf0));
    }

    #[test]
    fn test_piece_kind_parse() {
        assert_eq!(PieceKind::from_str("Z"), Some(PieceKind::Z));
        assert_eq!(PieceKind::from_str("x"), None);
    }
}
