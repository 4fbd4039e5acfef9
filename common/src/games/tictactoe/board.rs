use super::types::{Cell, Symbol, CELL_COUNT};

/// Nine cells in row-major order; index 0 is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn from_cells(cells: [Cell; CELL_COUNT]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Writes `symbol` at `index`. An out-of-range index or an occupied cell
    /// leaves the board untouched and returns an error.
    pub fn apply_move(&mut self, index: usize, symbol: Symbol) -> Result<(), String> {
        match self.cells.get_mut(index) {
            None => Err(format!("Cell index {} is out of range", index)),
            Some(cell) if !cell.is_empty() => Err(format!("Cell {} is already marked", index)),
            Some(cell) => {
                *cell = Cell::Taken(symbol);
                Ok(())
            }
        }
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert_eq!(board.filled_count(), 0);
        assert!(board.cells().iter().all(|cell| cell.is_empty()));
    }

    #[test]
    fn test_apply_move_writes_symbol() {
        let mut board = Board::new();
        board.apply_move(4, Symbol::X).unwrap();

        assert_eq!(board.get(4), Some(Cell::Taken(Symbol::X)));
        assert_eq!(board.filled_count(), 1);
    }

    #[test]
    fn test_apply_move_on_occupied_cell_is_rejected() {
        let mut board = Board::new();
        board.apply_move(0, Symbol::X).unwrap();

        assert!(board.apply_move(0, Symbol::O).is_err());
        assert_eq!(board.get(0), Some(Cell::Taken(Symbol::X)));
        assert_eq!(board.filled_count(), 1);
    }

    #[test]
    fn test_apply_move_out_of_range_is_rejected() {
        let mut board = Board::new();

        assert!(board.apply_move(9, Symbol::X).is_err());
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_is_full_after_nine_moves() {
        let mut board = Board::new();
        let mut symbol = Symbol::X;
        for index in 0..CELL_COUNT {
            assert!(!board.is_full());
            board.apply_move(index, symbol).unwrap();
            symbol = symbol.opponent();
        }

        assert!(board.is_full());
    }
}
