//! Scoring module - line clear points, drop points, level progression
//!
//! Levels start at 1. Line clear points are `LINE_SCORES[rows] * level`, using the
//! level in effect *before* the clear that may raise it.

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_MIN_MS, DROP_INTERVAL_STEP_MS, HARD_DROP_POINTS_PER_CELL,
    LINES_PER_LEVEL, LINE_SCORES, SOFT_DROP_POINTS,
};

/// Calculate line clear score
/// lines: number of rows cleared by one lock
/// level: current level (1-based)
///
/// Row counts without a table entry score nothing.
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    LINE_SCORES
        .get(lines)
        .copied()
        .unwrap_or(0)
        .saturating_mul(level)
}

/// Calculate drop score
/// soft_drop: +1 per cell
/// hard_drop: +2 per cell
pub fn calculate_drop_score(cells: u32, is_hard_drop: bool) -> u32 {
    if is_hard_drop {
        cells.saturating_mul(HARD_DROP_POINTS_PER_CELL)
    } else {
        cells.saturating_mul(SOFT_DROP_POINTS)
    }
}

/// Level for a running line total: one level per 10 lines, starting at 1
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Get drop interval for a level (in milliseconds)
pub fn get_drop_interval_ms(level: u32) -> u32 {
    let speedup = level.saturating_sub(1).saturating_mul(DROP_INTERVAL_STEP_MS);
    BASE_DROP_MS
        .saturating_sub(speedup)
        .max(DROP_INTERVAL_MIN_MS)
}
