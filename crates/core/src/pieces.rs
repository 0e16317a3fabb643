//! Pieces module - Tetromino shapes and SRS rotation system
//!
//! Shapes are stored as `(row, col)` offsets from the piece origin, rows growing
//! downward like the board. Kick tables are authored with `+dy` pointing *up*, so
//! the vertical kick component is subtracted when applied to a board position.
//! Reference: https://tetris.wiki/SRS

use crate::types::{PieceKind, Rotation, BOARD_WIDTH};

/// Offset of a single mino relative to piece origin, as `(row, col)`
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from piece origin
pub type PieceShape = [MinoOffset; 4];

/// Candidate `(dx, dy)` kicks for one rotation, tried in order
pub type KickSet = [(i8, i8); 5];

/// Kick sets indexed by the rotation being rotated *from*
pub type KickTable = [KickSet; 4];

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    match kind {
        PieceKind::I => get_i_shape(rotation),
        PieceKind::O => get_o_shape(rotation),
        PieceKind::T => get_t_shape(rotation),
        PieceKind::S => get_s_shape(rotation),
        PieceKind::Z => get_z_shape(rotation),
        PieceKind::J => get_j_shape(rotation),
        PieceKind::L => get_l_shape(rotation),
    }
}

/// I piece shapes: horizontal and vertical bars
fn get_i_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North | Rotation::South => [(0, 0), (0, 1), (0, 2), (0, 3)],
        Rotation::East | Rotation::West => [(0, 0), (1, 0), (2, 0), (3, 0)],
    }
}

/// O piece shapes (same for all rotations)
fn get_o_shape(_rotation: Rotation) -> PieceShape {
    [(0, 0), (0, 1), (1, 0), (1, 1)]
}

fn get_t_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(0, 0), (0, 1), (0, 2), (1, 1)],
        Rotation::East => [(0, 0), (1, 0), (2, 0), (1, 1)],
        Rotation::South => [(1, 0), (1, 1), (1, 2), (0, 1)],
        Rotation::West => [(0, 0), (1, 0), (2, 0), (1, -1)],
    }
}

fn get_s_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North | Rotation::South => [(0, 1), (0, 2), (1, 0), (1, 1)],
        Rotation::East | Rotation::West => [(0, 0), (1, 0), (1, 1), (2, 1)],
    }
}

fn get_z_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North | Rotation::South => [(0, 0), (0, 1), (1, 1), (1, 2)],
        Rotation::East | Rotation::West => [(0, 1), (1, 0), (1, 1), (2, 0)],
    }
}

fn get_j_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(0, 0), (1, 0), (1, 1), (1, 2)],
        Rotation::East => [(0, 0), (0, 1), (1, 0), (2, 0)],
        Rotation::South => [(0, 0), (0, 1), (0, 2), (1, 2)],
        Rotation::West => [(0, 0), (1, 0), (2, 0), (2, -1)],
    }
}

fn get_l_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(0, 2), (1, 0), (1, 1), (1, 2)],
        Rotation::East => [(0, 0), (1, 0), (2, 0), (2, 1)],
        Rotation::South => [(0, 0), (0, 1), (0, 2), (1, 0)],
        Rotation::West => [(0, 0), (0, 1), (1, 1), (2, 1)],
    }
}

/// Kick table for J, L, S, T, Z (and O, whose rotation never changes its cells)
const NORMAL_KICKS: KickTable = [
    // 0 -> 1
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 1 -> 2
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 2 -> 3
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 3 -> 0
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
];

/// I piece kick table
const I_KICKS: KickTable = [
    // 0 -> 1
    [(0, 0), (-2, 0), (1, 0), (-2, 1), (1, -2)],
    // 1 -> 2
    [(0, 0), (2, 0), (-1, 0), (2, -1), (-1, 2)],
    // 2 -> 3
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    // 3 -> 0
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
];

/// Get kick table for a piece kind
pub fn get_kick_table(kind: PieceKind) -> &'static KickTable {
    match kind {
        PieceKind::I => &I_KICKS,
        _ => &NORMAL_KICKS,
    }
}

/// Ordered kick candidates for a clockwise rotation out of `from`
pub fn get_kicks(kind: PieceKind, from: Rotation) -> &'static KickSet {
    &get_kick_table(kind)[from.index()]
}

/// Outcome of a successful rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationResult {
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    /// Index of the kick candidate that fit (0 = no kick)
    pub kick_index: usize,
}

/// Try to rotate a piece clockwise with wall kicks.
///
/// `is_occupied(x, y)` must report walls and floor as occupied. The first kick
/// candidate whose cells are all free wins; `None` means every candidate collided.
pub fn try_rotate(
    kind: PieceKind,
    rotation: Rotation,
    x: i8,
    y: i8,
    is_occupied: impl Fn(i8, i8) -> bool,
) -> Option<RotationResult> {
    let new_rotation = rotation.rotate_cw();
    let new_shape = get_shape(kind, new_rotation);

    for (kick_index, &(dx, dy)) in get_kicks(kind, rotation).iter().enumerate() {
        let new_x = x + dx;
        let new_y = y - dy;

        let fits = new_shape
            .iter()
            .all(|&(row, col)| !is_occupied(new_x + col, new_y + row));

        if fits {
            return Some(RotationResult {
                rotation: new_rotation,
                x: new_x,
                y: new_y,
                kick_index,
            });
        }
    }

    None
}

/// Column span `(min_col, width)` of a shape
pub fn shape_columns(shape: &PieceShape) -> (i8, i8) {
    let min = shape.iter().map(|&(_, c)| c).min().unwrap_or(0);
    let max = shape.iter().map(|&(_, c)| c).max().unwrap_or(0);
    (min, max - min + 1)
}

/// Spawn column for a piece kind: rotation-0 bounding box centered horizontally
pub fn spawn_x(kind: PieceKind) -> i8 {
    let (min_col, width) = shape_columns(&get_shape(kind, Rotation::North));
    (BOARD_WIDTH as i8 - width).div_euclid(2) - min_col
}

/// Get initial shape for a new piece
pub fn get_spawn_shape(kind: PieceKind) -> PieceShape {
    get_shape(kind, Rotation::North)
}
