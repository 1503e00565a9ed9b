use crate::board::{Board, Cell};
use crate::error::GameError;
use crate::Coords;
use Direction::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn is_opposite(self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Up, Down) | (Down, Up) | (Left, Right) | (Right, Left)
        )
    }

    /// Row and column delta of one step in this direction
    pub fn delta(self) -> Coords {
        match self {
            Up => (-1, 0),
            Down => (1, 0),
            Left => (0, -1),
            Right => (0, 1),
        }
    }

    pub fn step(self, (row, col): Coords) -> Coords {
        let (d_row, d_col) = self.delta();
        (row + d_row, col + d_col)
    }

    pub fn head_char(self) -> char {
        match self {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }
}

/// The four kinds of food that can appear on the board.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum FoodKind {
    #[default]
    Apple,
    Cherry,
    Mouse,
    Egg,
}

impl FoodKind {
    pub const ALL: [FoodKind; 4] = [FoodKind::Apple, FoodKind::Cherry, FoodKind::Mouse, FoodKind::Egg];

    pub fn symbol(self) -> char {
        match self {
            FoodKind::Apple => 'O',
            FoodKind::Cherry => '%',
            FoodKind::Mouse => '&',
            FoodKind::Egg => '@',
        }
    }
}

/// A snake is a list of segments, head first, plus a log of everything it ate.
///
/// `stomach[i]` is the food that produced segment `i + 1`, so the stomach is
/// always one entry shorter than the body. Cloning a snake copies both lists,
/// which is what the archive relies on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    location: Vec<Coords>,
    direction: Option<Direction>,
    stomach: Vec<FoodKind>,
}

impl Snake {
    /// A single segment in the top left corner that has not started moving.
    pub fn new() -> Self {
        Snake { location: vec![(0, 0)], direction: None, stomach: vec![] }
    }

    #[cfg(test)]
    pub(crate) fn from_segments(location: Vec<Coords>, direction: Option<Direction>) -> Self {
        assert!(!location.is_empty());
        let stomach = vec![FoodKind::default(); location.len() - 1];
        Snake { location, direction, stomach }
    }

    pub fn location(&self) -> &[Coords] {
        &self.location
    }

    pub fn head(&self) -> Coords {
        self.location[0]
    }

    pub fn tail(&self) -> Coords {
        self.location[self.location.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.location.len()
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = Some(direction);
    }

    pub fn stomach(&self) -> &[FoodKind] {
        &self.stomach
    }

    /// The stomach as a string of food symbols, oldest first.
    pub fn stomach_contents(&self) -> String {
        self.stomach.iter().map(|food| food.symbol()).collect()
    }

    /// Every segment takes the place of the one ahead of it and the head
    /// lands on `new_head`. Length never changes.
    pub fn move_to(&mut self, new_head: Coords) {
        // The old tail ends up in front and is overwritten by the new head
        self.location.rotate_right(1);
        self.location[0] = new_head;
    }

    /// Grows or shrinks the body and the stomach from the tail end.
    ///
    /// New segments start at (0, 0) and new stomach slots hold the default
    /// food until something overwrites them.
    pub fn resize(&mut self, new_length: usize) -> Result<(), GameError> {
        debug_assert!(new_length >= 1, "a snake needs at least a head");
        let new_length = new_length.max(1);

        if new_length > self.location.len() {
            self.location.try_reserve(new_length - self.location.len())?;
            self.stomach.try_reserve(new_length - 1 - self.stomach.len())?;
        }

        self.location.resize(new_length, (0, 0));
        self.stomach.resize(new_length - 1, FoodKind::default());
        Ok(())
    }

    /// Adds one segment, records `food` as the newest stomach entry and
    /// advances the head to `new_head`.
    pub fn grow_toward(&mut self, new_head: Coords, food: FoodKind) -> Result<(), GameError> {
        self.resize(self.len() + 1)?;
        if let Some(newest) = self.stomach.last_mut() {
            *newest = food;
        }
        self.move_to(new_head);
        Ok(())
    }

    pub fn draw_onto(&self, board: &mut Board) {
        board.set(self.head(), Cell::Head(self.direction));
        for pos in &self.location[1..] {
            board.set(*pos, Cell::Body);
        }
    }

    /// Clears every segment from the board. Food elsewhere is left alone.
    pub fn erase_from(&self, board: &mut Board) {
        for pos in &self.location {
            board.set(*pos, Cell::Empty);
        }
    }
}

impl Default for Snake {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake_of_three() -> Snake {
        let mut snake = Snake::new();
        snake.set_direction(Right);
        snake.grow_toward((0, 1), FoodKind::Cherry).unwrap();
        snake.grow_toward((0, 2), FoodKind::Egg).unwrap();
        snake
    }

    #[test]
    fn test_new_snake() {
        let snake = Snake::new();
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), (0, 0));
        assert_eq!(snake.direction(), None);
        assert!(snake.stomach().is_empty());
    }

    #[test]
    fn test_direction_step() {
        assert_eq!(Up.step((2, 2)), (1, 2));
        assert_eq!(Down.step((2, 2)), (3, 2));
        assert_eq!(Left.step((2, 2)), (2, 1));
        assert_eq!(Right.step((2, 2)), (2, 3));
        assert!(Up.is_opposite(Down));
        assert!(!Up.is_opposite(Left));
    }

    #[test]
    fn test_move_to_shifts_segments() {
        let mut snake = snake_of_three();
        assert_eq!(snake.location(), &[(0, 2), (0, 1), (0, 0)]);

        snake.move_to((1, 2));
        assert_eq!(snake.location(), &[(1, 2), (0, 2), (0, 1)]);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.stomach().len(), 2);
    }

    #[test]
    fn test_grow_toward_appends_food() {
        let mut snake = snake_of_three();
        assert_eq!(snake.stomach(), &[FoodKind::Cherry, FoodKind::Egg]);

        snake.grow_toward((0, 3), FoodKind::Mouse).unwrap();
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.location(), &[(0, 3), (0, 2), (0, 1), (0, 0)]);
        assert_eq!(snake.stomach(), &[FoodKind::Cherry, FoodKind::Egg, FoodKind::Mouse]);
        assert_eq!(snake.stomach_contents(), "%@&");
    }

    #[test]
    fn test_resize_shrinks_from_tail() {
        let mut snake = snake_of_three();
        snake.resize(2).unwrap();
        assert_eq!(snake.location(), &[(0, 2), (0, 1)]);
        assert_eq!(snake.stomach(), &[FoodKind::Cherry]);
    }

    #[test]
    fn test_resize_grows_with_blank_segments() {
        let mut snake = Snake::new();
        snake.move_to((3, 4));
        snake.resize(3).unwrap();
        assert_eq!(snake.location(), &[(3, 4), (0, 0), (0, 0)]);
        assert_eq!(snake.stomach().len(), 2);
    }

    #[test]
    fn test_draw_and_erase() {
        let mut board = Board::new(4, 2).unwrap();
        let snake = snake_of_three();

        snake.draw_onto(&mut board);
        assert_eq!(board.cell_at((0, 2)), Cell::Head(Some(Right)));
        assert_eq!(board.cell_at((0, 1)), Cell::Body);
        assert_eq!(board.cell_at((0, 0)), Cell::Body);

        board.set((1, 3), Cell::Food(FoodKind::Apple));
        snake.erase_from(&mut board);
        assert_eq!(board.cell_at((0, 2)), Cell::Empty);
        assert_eq!(board.cell_at((0, 0)), Cell::Empty);
        assert_eq!(board.cell_at((1, 3)), Cell::Food(FoodKind::Apple));
    }

    #[test]
    fn test_clone_is_independent() {
        let original = snake_of_three();
        let mut copy = original.clone();
        assert_eq!(copy, original);

        copy.grow_toward((1, 2), FoodKind::Apple).unwrap();
        copy.set_direction(Down);
        assert_eq!(original.len(), 3);
        assert_eq!(original.direction(), Some(Right));
        assert_eq!(original.head(), (0, 2));
    }
}
