//! Game state module - the simulation engine
//!
//! Ties together the board, the shape catalog, the bag randomizer and scoring,
//! and publishes every observable outcome on the owned [`EventBus`].
//!
//! Lifecycle: `NotStarted -> Running <-> Paused`, `Running -> GameOver`, and
//! `restart` from any phase back to `Running`. Every operation called in a phase
//! where it does not apply is a silent no-op that returns `false`.

use crate::board::Board;
use crate::events::{EventBus, GameEvent, ScoreSnapshot};
use crate::pieces::{get_shape, spawn_x, try_rotate, PieceShape};
use crate::rng::PieceBag;
use crate::scoring::{calculate_drop_score, calculate_level, calculate_line_score, get_drop_interval_ms};
use crate::snapshot::{ActiveSnapshot, GameSnapshot, NextSnapshot};
use crate::types::*;

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    /// Origin column
    pub x: i8,
    /// Origin row
    pub y: i8,
}

impl Tetromino {
    /// Create a new tetromino at rotation 0, horizontally centered on the top row
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x: spawn_x(kind),
            y: 0,
        }
    }

    /// Get the shape (mino offsets) for current rotation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute `(x, y)` board cells
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.shape().map(|(row, col)| (self.x + col, self.y + row))
    }

    /// Whether the piece, shifted by `(dx, dy)`, would sit on free cells only
    pub fn fits_at(&self, board: &Board, dx: i8, dy: i8) -> bool {
        self.cells()
            .iter()
            .all(|&(x, y)| !board.is_occupied(x + dx, y + dy))
    }

    pub fn fits(&self, board: &Board) -> bool {
        self.fits_at(board, 0, 0)
    }
}

/// Complete game state
#[derive(Debug)]
pub struct GameState {
    board: Board,
    active: Option<Tetromino>,
    next: Option<PieceKind>,
    bag: PieceBag,
    score: u32,
    level: u32,
    lines: u32,
    drop_interval_ms: u32,
    drop_timer_ms: u32,
    started: bool,
    paused: bool,
    game_over: bool,
    bus: EventBus,
}

impl GameState {
    /// Create a new, not yet started game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self {
            board: Board::new(),
            active: None,
            next: None,
            bag: PieceBag::new(seed),
            score: 0,
            level: 1,
            lines: 0,
            drop_interval_ms: BASE_DROP_MS,
            drop_timer_ms: 0,
            started: false,
            paused: false,
            game_over: false,
            bus: EventBus::new(),
        }
    }

    /// The bus every outcome is published on; register subscribers here
    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn next_piece(&self) -> Option<PieceKind> {
        self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn drop_timer_ms(&self) -> u32 {
        self.drop_timer_ms
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn phase(&self) -> GamePhase {
        if !self.started {
            GamePhase::NotStarted
        } else if self.game_over {
            GamePhase::GameOver
        } else if self.paused {
            GamePhase::Paused
        } else {
            GamePhase::Running
        }
    }

    /// Running with a piece in play: the only phase in which gameplay acts
    fn is_running(&self) -> bool {
        self.phase() == GamePhase::Running && self.active.is_some()
    }

    pub fn score_snapshot(&self) -> ScoreSnapshot {
        ScoreSnapshot {
            score: self.score,
            level: self.level,
            lines: self.lines,
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.next = self.next.map(NextSnapshot::from);
        out.phase = self.phase();
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.drop_interval_ms = self.drop_interval_ms;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    fn publish(&mut self, event: GameEvent) {
        self.bus.publish(&event);
    }

    fn publish_score(&mut self) {
        let snapshot = self.score_snapshot();
        self.publish(GameEvent::ScoreChanged(snapshot));
    }

    /// Start a game. Only acts before the first game or after game over.
    pub fn start(&mut self) -> bool {
        if self.started && !self.game_over {
            return false;
        }
        self.reset_session();
        true
    }

    /// Reset everything and start a fresh game, whatever the current phase
    pub fn restart(&mut self) -> bool {
        self.reset_session();
        true
    }

    fn reset_session(&mut self) {
        self.board.reset();
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.drop_interval_ms = BASE_DROP_MS;
        self.drop_timer_ms = 0;
        self.game_over = false;
        self.paused = false;
        self.started = true;
        self.active = None;
        self.next = None;
        self.bag.reset();

        self.spawn_piece();
        self.publish(GameEvent::GameStart);
        self.publish_score();
    }

    /// Spawn the queued piece (drawing one if nothing is queued) and queue the next.
    ///
    /// A spawn that collides ends the game; the colliding piece stays recorded
    /// as the active piece so the final frame can show it.
    pub(crate) fn spawn_piece(&mut self) -> bool {
        let kind = match self.next.take() {
            Some(kind) => kind,
            None => self.bag.draw(),
        };
        let piece = Tetromino::spawn(kind);
        self.next = Some(self.bag.draw());
        self.active = Some(piece);

        if !piece.fits(&self.board) {
            self.game_over = true;
            self.publish(GameEvent::GameOver);
            return false;
        }

        self.drop_timer_ms = 0;
        true
    }

    /// Shift the active piece if the destination is free
    fn try_shift(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        if !active.fits_at(&self.board, dx, dy) {
            return false;
        }

        self.active = Some(Tetromino {
            x: active.x + dx,
            y: active.y + dy,
            ..active
        });
        true
    }

    /// Move the active piece one column left or right
    pub fn move_horizontal(&mut self, direction: Direction) -> bool {
        if !self.is_running() {
            return false;
        }
        if !self.try_shift(direction.dx(), 0) {
            return false;
        }
        self.publish(GameEvent::PieceMoved);
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.move_horizontal(Direction::Left)
    }

    pub fn move_right(&mut self) -> bool {
        self.move_horizontal(Direction::Right)
    }

    /// Player soft drop: one row down for a point, or lock if resting
    pub fn soft_drop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }

        if self.try_shift(0, 1) {
            self.score = self
                .score
                .saturating_add(calculate_drop_score(1, false));
            self.drop_timer_ms = 0;
            self.publish(GameEvent::PieceMoved);
            self.publish_score();
        } else {
            self.drop_timer_ms = 0;
            self.lock_piece();
        }
        true
    }

    /// Gravity step: like a soft drop, without points
    fn gravity_step(&mut self) {
        if self.try_shift(0, 1) {
            self.publish(GameEvent::PieceMoved);
        } else {
            self.lock_piece();
        }
    }

    /// Rotate clockwise, resolving collisions with the SRS kick table.
    ///
    /// When every kick candidate collides nothing changes and nothing is published.
    pub fn rotate(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let board = &self.board;
        let result = try_rotate(active.kind, active.rotation, active.x, active.y, |x, y| {
            board.is_occupied(x, y)
        });

        let Some(result) = result else {
            return false;
        };

        self.active = Some(Tetromino {
            rotation: result.rotation,
            x: result.x,
            y: result.y,
            ..active
        });
        self.publish(GameEvent::PieceMoved);
        true
    }

    /// Rows the active piece can fall before resting
    pub fn drop_distance(&self) -> u32 {
        let Some(active) = self.active else {
            return 0;
        };
        let mut distance: i8 = 0;
        while active.fits_at(&self.board, 0, distance + 1) {
            distance += 1;
        }
        distance as u32
    }

    /// Drop the active piece to its resting row and lock it.
    ///
    /// Publishes the score change and `hard-drop` before the lock's own events.
    pub fn hard_drop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let distance = self.drop_distance();
        self.active = Some(Tetromino {
            y: active.y + distance as i8,
            ..active
        });

        self.score = self
            .score
            .saturating_add(calculate_drop_score(distance, true));
        self.publish_score();
        self.publish(GameEvent::HardDrop);
        self.lock_piece();
        true
    }

    /// Merge the active piece into the board, clear lines, spawn the next piece
    pub(crate) fn lock_piece(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        self.board.place_cells(&active.cells(), active.kind.color());
        self.publish(GameEvent::PieceLocked);

        self.clear_lines();
        self.spawn_piece();
    }

    /// Remove full rows, score them, and advance the level when due.
    /// Returns the number of rows cleared.
    pub(crate) fn clear_lines(&mut self) -> usize {
        let rows = self.board.find_full_rows();
        if rows.is_empty() {
            return 0;
        }

        self.board.remove_rows(&rows);

        let count = rows.len();
        self.score = self
            .score
            .saturating_add(calculate_line_score(count, self.level));
        self.lines = self.lines.saturating_add(count as u32);

        self.publish(GameEvent::LinesCleared {
            rows,
            count: count as u32,
        });
        self.publish_score();

        let new_level = calculate_level(self.lines);
        if new_level > self.level {
            self.level = new_level;
            self.drop_interval_ms = get_drop_interval_ms(new_level);
            self.publish(GameEvent::LevelUp { level: new_level });
        }

        count
    }

    /// Flip the pause flag of a live game
    pub fn toggle_pause(&mut self) -> bool {
        if !self.started || self.game_over {
            return false;
        }
        self.paused = !self.paused;
        let paused = self.paused;
        self.publish(GameEvent::GamePause { paused });
        true
    }

    /// Advance the clock by `elapsed_ms`.
    ///
    /// At most one gravity step happens per call; once the interval is reached
    /// the timer restarts from zero and any overshoot is dropped.
    /// Returns true if gravity stepped.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.is_running() {
            return false;
        }

        self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
        if self.drop_timer_ms < self.drop_interval_ms {
            return false;
        }

        self.gravity_step();
        self.drop_timer_ms = 0;
        true
    }

    /// Apply an inbound command
    pub fn handle_command(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::SoftDrop => self.soft_drop(),
            Command::Rotate => self.rotate(),
            Command::HardDrop => self.hard_drop(),
            Command::Pause => self.toggle_pause(),
            Command::Start => self.start(),
            Command::Restart => self.restart(),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
