use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::archive::Archive;
use crate::board::{Board, Cell};
use crate::config::GameConfig;
use crate::error::GameError;
use crate::snake::{Direction, FoodKind, Snake};
use crate::Coords;

/// Random placement attempts per board cell before scanning for free cells.
const FOOD_ATTEMPTS_PER_CELL: usize = 4;

const NOT_STARTED_SCORE: i32 = -1;
const FIRST_SCORE: i32 = 1;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum State {
    Menu,
    Playing,
    ArchiveView,
    Exit,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MenuItem {
    Start,
    Archive,
    Exit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 3] = [MenuItem::Start, MenuItem::Archive, MenuItem::Exit];

    pub fn label(self) -> &'static str {
        match self {
            MenuItem::Start => "Start",
            MenuItem::Archive => "Archived snakes",
            MenuItem::Exit => "Exit",
        }
    }

    fn target_state(self) -> State {
        match self {
            MenuItem::Start => State::Playing,
            MenuItem::Archive => State::ArchiveView,
            MenuItem::Exit => State::Exit,
        }
    }
}

/// One discrete input per tick
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Enter,
    None,
}

impl Action {
    pub fn direction(self) -> Option<Direction> {
        match self {
            Action::Up => Some(Direction::Up),
            Action::Down => Some(Direction::Down),
            Action::Left => Some(Direction::Left),
            Action::Right => Some(Direction::Right),
            Action::Enter | Action::None => None,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Collision {
    Wall,
    Body,
}

/// Outcome of a single `Game::advance`
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Tick {
    Moved,
    Ate(FoodKind),
    /// The snake stays where it was and the run is over
    Crashed(Collision),
    /// No cell is left for new food
    BoardFull,
}

pub struct Game {
    board: Board,
    snake: Snake,
    score: i32,
    found: bool,
    state: State,
    menu_index: usize,
    /// Last direction asked for since the previous step
    pending_turn: Option<Direction>,
    archive: Archive,
    rng: StdRng,
}

impl Game {
    pub fn new(config: &GameConfig) -> Result<Self, GameError> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut board = Board::new(config.width, config.height)?;
        let snake = Snake::new();
        snake.draw_onto(&mut board);

        info!("new {}x{} game (seed: {:?})", config.width, config.height, config.seed);

        Ok(Game {
            board,
            snake,
            score: NOT_STARTED_SCORE,
            found: true,
            state: State::Menu,
            menu_index: 0,
            pending_turn: None,
            archive: Archive::new(),
            rng,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn menu_index(&self) -> usize {
        self.menu_index
    }

    pub fn selected_item(&self) -> MenuItem {
        MenuItem::ALL[self.menu_index]
    }

    pub fn archive(&self) -> &Archive {
        &self.archive
    }

    /// Starts a new run: fresh snake in the top left corner, score 1 and
    /// one food item on the board.
    pub fn reset(&mut self) {
        self.snake.erase_from(&mut self.board);
        self.board.clear_food();

        self.snake = Snake::new();
        self.snake.draw_onto(&mut self.board);
        self.score = FIRST_SCORE;
        self.found = false;
        self.pending_turn = None;

        if self.place_food().is_none() {
            warn!("no room for food on a fresh board");
        }
        info!("game reset");
    }

    /// Routes one input action according to the current top level state.
    pub fn handle(&mut self, action: Action) {
        match self.state {
            State::Menu => self.update_menu(action),
            State::Playing => {
                if let Some(direction) = action.direction() {
                    self.steer(direction);
                }
            }
            State::ArchiveView => {
                if action == Action::Enter {
                    self.return_to_menu();
                }
            }
            State::Exit => {}
        }
    }

    pub fn update_menu(&mut self, action: Action) {
        match action {
            Action::Up if self.menu_index > 0 => self.menu_index -= 1,
            Action::Down if self.menu_index < MenuItem::ALL.len() - 1 => self.menu_index += 1,
            Action::Enter => {
                let item = self.selected_item();
                debug!("menu: {:?} selected", item);
                if item == MenuItem::Start {
                    self.reset();
                }
                self.state = item.target_state();
            }
            _ => {}
        }
    }

    /// Queues a turn for the next step. Only the latest one counts.
    pub fn steer(&mut self, direction: Direction) {
        self.pending_turn = Some(direction);
    }

    /// A reversal is ignored once the snake has a body to run into.
    fn apply_pending_turn(&mut self) {
        let Some(direction) = self.pending_turn.take() else {
            return;
        };

        if let Some(current) = self.snake.direction() {
            if self.snake.len() > 1 && current.is_opposite(direction) {
                debug!("ignored reversal from {:?} to {:?}", current, direction);
                return;
            }
        }
        self.snake.set_direction(direction);
    }

    pub fn return_to_menu(&mut self) {
        self.state = State::Menu;
    }

    pub fn quit(&mut self) {
        self.state = State::Exit;
    }

    /// Runs one game step.
    ///
    /// Order matters: the queued turn is taken against the direction of the
    /// last step, pending food is placed, then the move is checked, and only a
    /// valid move touches the snake or the board.
    pub fn advance(&mut self) -> Result<Tick, GameError> {
        self.apply_pending_turn();

        if !self.generate_food() {
            return Ok(Tick::BoardFull);
        }

        let head = self.snake.head();
        let target = match self.snake.direction() {
            Some(direction) => direction.step(head),
            None => head,
        };

        if let Some(collision) = self.collision_at(target) {
            debug!("{:?} collision at {:?}, score {}", collision, target, self.score);
            return Ok(Tick::Crashed(collision));
        }

        let target_cell = self.board.cell_at(target);
        self.snake.erase_from(&mut self.board);

        let tick = match target_cell {
            Cell::Food(kind) => {
                self.found = true;
                self.snake.grow_toward(target, kind)?;
                debug!("ate {:?} at {:?}, length {}", kind, target, self.snake.len());
                Tick::Ate(kind)
            }
            _ => {
                self.snake.move_to(target);
                Tick::Moved
            }
        };

        self.snake.draw_onto(&mut self.board);
        Ok(tick)
    }

    /// Places a new food item if the last one was eaten, bumping the score.
    ///
    /// Returns `false` when the snake fills the whole board.
    pub fn generate_food(&mut self) -> bool {
        if !self.found {
            return true;
        }
        self.score += 1;
        self.found = false;

        if self.place_food().is_some() {
            true
        } else {
            info!("board full at score {}", self.score);
            false
        }
    }

    /// Saves the live snake and score under `name`.
    pub fn archive_snake(&mut self, name: &str) -> Result<(), GameError> {
        self.archive.append(name, self.score, &self.snake)
    }

    fn collision_at(&self, target: Coords) -> Option<Collision> {
        if !self.board.contains(target) {
            return Some(Collision::Wall);
        }

        // The tail moves out of the way during this same step
        if self.board.cell_at(target) == Cell::Body && target != self.snake.tail() {
            return Some(Collision::Body);
        }

        None
    }

    fn place_food(&mut self) -> Option<Coords> {
        let cells = self.board.width() * self.board.height();
        self.place_food_within(FOOD_ATTEMPTS_PER_CELL.saturating_mul(cells))
    }

    fn place_food_within(&mut self, attempts: usize) -> Option<Coords> {
        let pos = self.random_free_cell(attempts)?;
        let kind = FoodKind::ALL[self.rng.gen_range(0..FoodKind::ALL.len())];
        self.board.set(pos, Cell::Food(kind));
        debug!("placed {:?} at {:?}", kind, pos);
        Some(pos)
    }

    /// Uniform rejection sampling for `attempts` tries, then a scan over
    /// whatever is left so a crowded board still terminates.
    fn random_free_cell(&mut self, attempts: usize) -> Option<Coords> {
        let (width, height) = (self.board.width(), self.board.height());

        for _ in 0..attempts {
            let pos = (
                self.rng.gen_range(0..height) as i32,
                self.rng.gen_range(0..width) as i32,
            );
            if self.is_free_for_food(pos) {
                return Some(pos);
            }
        }

        let free: Vec<Coords> = self
            .board
            .positions()
            .filter(|pos| self.is_free_for_food(*pos))
            .collect();
        free.choose(&mut self.rng).copied()
    }

    fn is_free_for_food(&self, pos: Coords) -> bool {
        self.board.cell_at(pos) != Cell::Body && pos != self.snake.head()
    }

    #[cfg(test)]
    fn place_snake(&mut self, snake: Snake) {
        self.snake.erase_from(&mut self.board);
        self.snake = snake;
        self.snake.draw_onto(&mut self.board);
    }
}
