//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is empty or holds the color tag of
//! the piece that locked there. Storage is a flat row-major array so the grid
//! never allocates and its dimensions can never change.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)

use arrayvec::ArrayVec;

use crate::types::{Cell, ColorTag, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Upper bound on rows reported by a single scan
pub const MAX_ROWS: usize = BOARD_HEIGHT as usize;

/// Row indices reported by [`Board::find_full_rows`]
pub type RowList = ArrayVec<u8, MAX_ROWS>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Collision test shared by walls, floor and stack: out of bounds counts as occupied
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        !matches!(self.get(x, y), Some(None))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .is_some_and(|row| row.iter().all(|cell| cell.is_some()))
    }

    /// Cells of row `y`, left to right
    /// Returns None if out of bounds
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= BOARD_HEIGHT as usize {
            return None;
        }
        let width = BOARD_WIDTH as usize;
        Some(&self.cells[y * width..(y + 1) * width])
    }

    /// Mark each in-bounds `(x, y)` cell as occupied with `color`
    pub fn place_cells(&mut self, cells: &[(i8, i8)], color: ColorTag) {
        for &(x, y) in cells {
            self.set(x, y, Some(color));
        }
    }

    /// Indices of all full rows, scanned bottom to top (descending)
    pub fn find_full_rows(&self) -> RowList {
        let mut rows = RowList::new();
        for y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(y) {
                rows.push(y as u8);
            }
        }
        rows
    }

    /// Delete the named rows and backfill the same number of empty rows at the top.
    ///
    /// Surviving rows keep their relative order. Indices may come in any order;
    /// out-of-range and repeated indices are ignored.
    /// Returns the number of rows actually removed.
    pub fn remove_rows(&mut self, rows: &[u8]) -> usize {
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;

        // Compact surviving rows downward, bottom to top
        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if rows.contains(&(read_y as u8)) {
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src = read_y * width;
                self.cells.copy_within(src..src + width, write_y * width);
            }
        }

        // Everything above the last written row is new, empty space
        self.cells[..write_y * width].fill(None);

        write_y
    }

    /// Replace the grid with an all-empty grid
    pub fn reset(&mut self) {
        self.cells.fill(None);
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of occupied cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Copy the grid out row by row
    pub fn write_grid(&self, out: &mut [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        for (row, cells) in out.iter_mut().zip(self.cells.chunks_exact(BOARD_WIDTH as usize)) {
            row.copy_from_slice(cells);
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
