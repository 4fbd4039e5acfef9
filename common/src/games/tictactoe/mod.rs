mod board;
mod types;
mod win_detector;

pub use board::Board;
pub use types::{Cell, Outcome, Symbol, BOARD_SIZE, CELL_COUNT};
pub use win_detector::{detect_winner, is_draw, LINES};
