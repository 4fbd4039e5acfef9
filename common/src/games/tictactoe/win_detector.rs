use super::board::Board;
use super::types::{Cell, Symbol};

/// Rows, then columns, then diagonals.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

pub fn detect_winner(board: &Board) -> Option<Symbol> {
    let cells = board.cells();
    LINES.iter().find_map(|&[a, b, c]| match cells[a] {
        Cell::Taken(symbol) if cells[b] == cells[a] && cells[c] == cells[a] => Some(symbol),
        _ => None,
    })
}

pub fn is_draw(board: &Board) -> bool {
    board.is_full() && detect_winner(board).is_none()
}
