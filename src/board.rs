use crate::error::GameError;
use crate::snake::{Direction, FoodKind};
use crate::Coords;

const BODY_CHAR: char = '█';
const UNMOVED_HEAD_CHAR: char = 'o';

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Food(FoodKind),
    Body,
    /// Facing is `None` until the snake makes its first move
    Head(Option<Direction>),
}

impl Cell {
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Food(kind) => kind.symbol(),
            Cell::Body => BODY_CHAR,
            Cell::Head(Some(direction)) => direction.head_char(),
            Cell::Head(None) => UNMOVED_HEAD_CHAR,
        }
    }

    pub fn is_food(self) -> bool {
        matches!(self, Cell::Food(_))
    }
}

/// Number of cells in a `width` x `height` board.
pub fn cell_count(width: usize, height: usize) -> Result<usize, GameError> {
    if width == 0 || height == 0 {
        return Err(GameError::InvalidDimensions { width, height });
    }

    // Coordinates are signed 32 bit pairs
    if width > i32::MAX as usize || height > i32::MAX as usize {
        return Err(GameError::BoardTooLarge { width, height });
    }

    width
        .checked_mul(height)
        .ok_or(GameError::BoardTooLarge { width, height })
}

/// The playable area, stored row by row. Walls are not part of the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Result<Self, GameError> {
        let count = cell_count(width, height)?;

        let mut cells = Vec::new();
        cells.try_reserve_exact(count)?;
        cells.resize(count, Cell::Empty);

        Ok(Board { width, height, cells })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, (row, col): Coords) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.height && (col as usize) < self.width
    }

    /// Callers must check `contains` first; out of bounds access panics.
    pub fn cell_at(&self, pos: Coords) -> Cell {
        self.cells[self.index(pos)]
    }

    pub fn cell_at_mut(&mut self, pos: Coords) -> &mut Cell {
        let i = self.index(pos);
        &mut self.cells[i]
    }

    pub fn set(&mut self, pos: Coords, cell: Cell) {
        *self.cell_at_mut(pos) = cell;
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    pub fn positions(&self) -> impl Iterator<Item = Coords> {
        let width = self.width as i32;
        (0..self.height as i32).flat_map(move |row| (0..width).map(move |col| (row, col)))
    }

    pub fn clear_food(&mut self) {
        for cell in self.cells.iter_mut().filter(|cell| cell.is_food()) {
            *cell = Cell::Empty;
        }
    }

    fn index(&self, pos: Coords) -> usize {
        debug_assert!(self.contains(pos), "cell {:?} is outside the board", pos);
        pos.0 as usize * self.width + pos.1 as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(4, 3).unwrap();
        assert_eq!(board.width(), 4);
        assert_eq!(board.height(), 3);
        assert_eq!(board.rows().count(), 3);
        assert!(board.rows().all(|row| row.len() == 4));
        assert!(board.positions().all(|pos| board.cell_at(pos) == Cell::Empty));
    }

    #[test]
    fn test_invalid_sizes() {
        assert!(matches!(Board::new(0, 3), Err(GameError::InvalidDimensions { .. })));
        assert!(matches!(cell_count(usize::MAX, 2), Err(GameError::BoardTooLarge { .. })));
    }

    #[test]
    fn test_bounds_checking() {
        let board = Board::new(3, 2).unwrap();
        assert!(board.contains((0, 0)));
        assert!(board.contains((1, 2)));
        assert!(!board.contains((-1, 0)));
        assert!(!board.contains((0, -1)));
        assert!(!board.contains((2, 0)));
        assert!(!board.contains((0, 3)));
    }

    #[test]
    fn test_row_major_layout() {
        let mut board = Board::new(3, 2).unwrap();
        board.set((1, 0), Cell::Body);
        let rows: Vec<&[Cell]> = board.rows().collect();
        assert_eq!(rows[1][0], Cell::Body);
        assert_eq!(rows[0][0], Cell::Empty);
        assert_eq!(board.positions().nth(3), Some((1, 0)));
    }

    #[test]
    fn test_clear_food_keeps_snake() {
        let mut board = Board::new(3, 1).unwrap();
        board.set((0, 0), Cell::Food(FoodKind::Mouse));
        board.set((0, 1), Cell::Body);
        board.clear_food();
        assert_eq!(board.cell_at((0, 0)), Cell::Empty);
        assert_eq!(board.cell_at((0, 1)), Cell::Body);
    }

    #[test]
    fn test_symbols() {
        assert_eq!(Cell::Head(Some(Direction::Left)).symbol(), '<');
        assert_eq!(Cell::Food(FoodKind::Apple).symbol(), 'O');
        assert_eq!(Cell::Empty.symbol(), ' ');
    }
}
