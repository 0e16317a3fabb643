//! Board tests

use blockdrop::core::Board;
use blockdrop::types::{ColorTag, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

fn fill_row(board: &mut Board, y: i8, color: ColorTag) {
    for x in 0..BOARD_WIDTH as i8 {
        board.set(x, y, Some(color));
    }
}

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);
    assert_eq!(board.cells().len(), 200);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert_eq!(board.get(x, y), Some(None), "cell ({}, {})", x, y);
            assert!(!board.is_occupied(x, y));
        }
    }
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();

    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i8, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);
}

#[test]
fn test_walls_and_floor_are_occupied() {
    let board = Board::new();

    for y in 0..BOARD_HEIGHT as i8 {
        assert!(board.is_occupied(-1, y));
        assert!(board.is_occupied(BOARD_WIDTH as i8, y));
    }
    for x in 0..BOARD_WIDTH as i8 {
        assert!(board.is_occupied(x, BOARD_HEIGHT as i8));
    }
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::new();
    let t = PieceKind::T.color();

    assert!(board.set(5, 10, Some(t)));
    assert_eq!(board.get(5, 10), Some(Some(t)));
    assert!(board.is_occupied(5, 10));

    assert!(board.set(5, 10, None));
    assert_eq!(board.get(5, 10), Some(None));
}

#[test]
fn test_board_set_out_of_bounds() {
    let mut board = Board::new();
    let t = PieceKind::T.color();

    assert!(!board.set(-1, 0, Some(t)));
    assert!(!board.set(0, -1, Some(t)));
    assert!(!board.set(BOARD_WIDTH as i8, 0, Some(t)));
    assert!(!board.set(0, BOARD_HEIGHT as i8, Some(t)));
    assert_eq!(board.filled_count(), 0);
}

#[test]
fn test_place_cells_skips_out_of_bounds() {
    let mut board = Board::new();
    board.place_cells(&[(0, 0), (1, 0), (-1, 0), (0, 25)], PieceKind::L.color());

    assert_eq!(board.filled_count(), 2);
    assert_eq!(board.get(1, 0), Some(Some(PieceKind::L.color())));
}

#[test]
fn test_find_full_rows_bottom_to_top() {
    let mut board = Board::new();
    let c = PieceKind::I.color();
    fill_row(&mut board, 19, c);
    fill_row(&mut board, 12, c);
    fill_row(&mut board, 15, c);
    board.set(3, 14, Some(c));

    assert_eq!(board.find_full_rows().as_slice(), &[19, 15, 12]);
}

#[test]
fn test_find_full_rows_none() {
    let mut board = Board::new();
    for x in 0..9 {
        board.set(x, 19, Some(PieceKind::O.color()));
    }
    assert!(board.find_full_rows().is_empty());
    assert!(!board.is_row_full(19));
}

#[test]
fn test_remove_rows_shifts_survivors_down() {
    let mut board = Board::new();
    let full = PieceKind::I.color();
    let marker = PieceKind::Z.color();

    board.set(4, 10, Some(marker));
    fill_row(&mut board, 18, full);
    fill_row(&mut board, 19, full);

    let rows = board.find_full_rows();
    assert_eq!(board.remove_rows(&rows), 2);

    assert_eq!(board.get(4, 12), Some(Some(marker)));
    assert_eq!(board.get(4, 10), Some(None));
    assert_eq!(board.filled_count(), 1);
    for x in 0..BOARD_WIDTH as i8 {
        assert_eq!(board.get(x, 0), Some(None));
        assert_eq!(board.get(x, 1), Some(None));
    }
}

#[test]
fn test_remove_all_rows_leaves_empty_board() {
    let mut board = Board::new();
    for y in 0..BOARD_HEIGHT as i8 {
        fill_row(&mut board, y, PieceKind::S.color());
    }

    let rows = board.find_full_rows();
    assert_eq!(rows.len(), BOARD_HEIGHT as usize);
    assert_eq!(board.remove_rows(&rows), BOARD_HEIGHT as usize);
    assert_eq!(board.filled_count(), 0);
}

#[test]
fn test_remove_no_rows_is_noop() {
    let mut board = Board::new();
    board.set(2, 19, Some(PieceKind::J.color()));
    let before = board.clone();

    assert_eq!(board.remove_rows(&[]), 0);
    assert_eq!(board, before);
}

#[test]
fn test_reset_clears_every_cell() {
    let mut board = Board::new();
    fill_row(&mut board, 7, PieceKind::T.color());
    board.reset();
    assert_eq!(board, Board::new());
}
