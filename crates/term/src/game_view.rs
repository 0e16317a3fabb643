//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::pieces::shape_columns;
use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{ColorTag, GamePhase, BOARD_HEIGHT, BOARD_WIDTH};

const WELL_BG: Rgb = Rgb::new(24, 24, 32);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);
const BORDER_FG: Rgb = Rgb::new(200, 200, 200);
const GRID_FG: Rgb = Rgb::new(70, 70, 80);
const FLASH_FG: Rgb = Rgb::new(255, 255, 255);

pub const BLOCK: char = '█';
pub const GHOST: char = '░';
pub const GRID_DOT: char = '·';

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Frontend state drawn next to the engine snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hud<'a> {
    pub high_score: u32,
    pub muted: bool,
    /// Board rows currently flashing after a clear.
    pub flash_rows: &'a [u8],
}

/// Terminal renderer for the playfield, side panel and overlays.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 roughly squares cells in common terminal fonts.
        Self { cell_w: 2, cell_h: 1 }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    fn frame_size(&self) -> (u16, u16) {
        (
            BOARD_WIDTH as u16 * self.cell_w + 2,
            BOARD_HEIGHT as u16 * self.cell_h + 2,
        )
    }

    /// Top-left corner of the board frame for `viewport`.
    pub fn frame_origin(&self, viewport: Viewport) -> (u16, u16) {
        let (frame_w, frame_h) = self.frame_size();
        let panel_w = 20;
        let x = viewport.width.saturating_sub(frame_w + panel_w) / 2;
        let y = viewport.height.saturating_sub(frame_h) / 2;
        (x, y)
    }

    /// Terminal position of the top-left character of board cell `(x, y)`.
    pub fn cell_origin(&self, viewport: Viewport, x: u16, y: u16) -> (u16, u16) {
        let (fx, fy) = self.frame_origin(viewport);
        (fx + 1 + x * self.cell_w, fy + 1 + y * self.cell_h)
    }

    /// Render into an existing framebuffer, resizing it to `viewport`.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        hud: &Hud<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().glyph(' '));

        let (frame_x, frame_y) = self.frame_origin(viewport);
        let (frame_w, frame_h) = self.frame_size();

        fb.draw_box(
            frame_x,
            frame_y,
            frame_w,
            frame_h,
            CellStyle::new(BORDER_FG, SCREEN_BG),
        );

        // Locked cells, or a grid dot where empty.
        for (y, row) in snap.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let (x, y) = (x as u16, y as u16);
                match cell {
                    Some(tag) => self.draw_block(fb, viewport, x, y, *tag, BLOCK),
                    None => self.fill_cell(
                        fb,
                        viewport,
                        x,
                        y,
                        GRID_DOT,
                        CellStyle::new(GRID_FG, WELL_BG).dim(),
                    ),
                }
            }
        }

        if let (Some(active), Some(fall)) = (snap.active, ghost_drop(snap)) {
            if fall > 0 && snap.phase != GamePhase::GameOver {
                for &(x, y) in &active.cells {
                    if let Some((x, y)) = on_board(x, y + fall) {
                        self.draw_block(fb, viewport, x, y, active.color, GHOST);
                    }
                }
            }
        }

        if let Some(active) = snap.active {
            for &(x, y) in &active.cells {
                if let Some((x, y)) = on_board(x, y) {
                    self.draw_block(fb, viewport, x, y, active.color, BLOCK);
                }
            }
        }

        let flash = CellStyle::new(FLASH_FG, FLASH_FG).bold();
        for &row in hud.flash_rows {
            if row < BOARD_HEIGHT {
                for x in 0..BOARD_WIDTH as u16 {
                    self.fill_cell(fb, viewport, x, row as u16, BLOCK, flash);
                }
            }
        }

        self.draw_side_panel(fb, snap, hud, frame_x + frame_w + 2, frame_y);

        match snap.phase {
            GamePhase::NotStarted => {
                self.draw_overlay(fb, frame_x, frame_y, &[("BLOCKDROP", None), ("ENTER to start", None)]);
            }
            GamePhase::Paused => {
                self.draw_overlay(fb, frame_x, frame_y, &[("PAUSED", None), ("P to resume", None)]);
            }
            GamePhase::GameOver => {
                self.draw_overlay(
                    fb,
                    frame_x,
                    frame_y,
                    &[
                        ("GAME OVER", None),
                        ("Score ", Some(snap.score)),
                        ("ENTER to restart", None),
                    ],
                );
            }
            GamePhase::Running => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, hud: &Hud<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut fb);
        fb
    }

    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        viewport: Viewport,
        x: u16,
        y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let (px, py) = self.cell_origin(viewport, x, y);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_block(
        &self,
        fb: &mut FrameBuffer,
        viewport: Viewport,
        x: u16,
        y: u16,
        color: ColorTag,
        ch: char,
    ) {
        let fg = Rgb::from(color);
        let style = if ch == GHOST {
            CellStyle::new(fg.scaled(1, 2), WELL_BG).dim()
        } else {
            CellStyle::new(fg, WELL_BG).bold()
        };
        self.fill_cell(fb, viewport, x, y, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        hud: &Hud<'_>,
        panel_x: u16,
        panel_y: u16,
    ) {
        if panel_x >= fb.width() {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);
        let help = value.dim();

        let mut y = panel_y;
        for (name, n) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
            ("HIGH", hud.high_score.max(snap.score)),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, n, value);
            y += 3;
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y += 1;
        if let Some(next) = snap.next {
            let (min_col, _) = shape_columns(&next.shape);
            let style = CellStyle::new(Rgb::from(next.color), SCREEN_BG).bold();
            for &(row, col) in &next.shape {
                let px = panel_x + ((col - min_col) as u16) * self.cell_w;
                let py = y + row as u16;
                fb.fill_rect(px, py, self.cell_w, 1, BLOCK, style);
            }
        }
        y += 3;

        let end = fb.put_str(panel_x, y, "SOUND ", label);
        fb.put_str(end, y, if hud.muted { "OFF" } else { "ON" }, value);
        y += 2;

        for line in [
            "←/→  move",
            "↑    rotate",
            "↓    soft drop",
            "SPC  hard drop",
            "P pause  M mute",
            "Q    quit",
        ] {
            fb.put_str(panel_x, y, line, help);
            y += 1;
        }
    }

    fn draw_overlay(
        &self,
        fb: &mut FrameBuffer,
        frame_x: u16,
        frame_y: u16,
        lines: &[(&str, Option<u32>)],
    ) {
        let (frame_w, frame_h) = self.frame_size();
        let box_w = frame_w.saturating_sub(2);
        let box_h = lines.len() as u16 + 2;
        let box_x = frame_x + 1;
        let box_y = frame_y + frame_h.saturating_sub(box_h) / 2;

        let text = CellStyle::new(Rgb::new(255, 255, 255), SCREEN_BG).bold();
        fb.fill_rect(box_x, box_y, box_w, box_h, ' ', text);
        fb.draw_box(box_x, box_y, box_w, box_h, CellStyle::new(BORDER_FG, SCREEN_BG));

        for (i, &(s, n)) in lines.iter().enumerate() {
            let digits = n.map_or(0, |n| n.checked_ilog10().unwrap_or(0) as u16 + 1);
            let text_w = s.chars().count() as u16 + digits;
            let x = box_x + box_w.saturating_sub(text_w) / 2;
            let y = box_y + 1 + i as u16;
            let end = fb.put_str(x, y, s, text);
            if let Some(n) = n {
                fb.put_u32(end, y, n, text);
            }
        }
    }
}

/// Rows the active piece would fall before resting on the snapshot's board.
pub fn ghost_drop(snap: &GameSnapshot) -> Option<i8> {
    let active = snap.active?;
    let free = |x: i8, y: i8| {
        on_board(x, y).is_some_and(|(x, y)| snap.board[y as usize][x as usize].is_none())
    };
    if !active.cells.iter().all(|&(x, y)| free(x, y)) {
        return None;
    }

    let mut fall = 0;
    while active.cells.iter().all(|&(x, y)| free(x, y + fall + 1)) {
        fall += 1;
    }
    Some(fall)
}

fn on_board(x: i8, y: i8) -> Option<(u16, u16)> {
    let in_bounds = (0..BOARD_WIDTH as i8).contains(&x) && (0..BOARD_HEIGHT as i8).contains(&y);
    in_bounds.then_some((x as u16, y as u16))
}
