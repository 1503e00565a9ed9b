use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, style, terminal};

use crate::archive::Archive;
use crate::game::{Action, Game, MenuItem};
use crate::snake::Snake;

const WALL_CHAR: char = '#';
const DEAD_SNAKE_CHAR: char = 'X';
// Rows above the board: score line and top wall
const BOARD_TOP: u16 = 2;
const MAX_NAME_LEN: usize = 24;

/// What a single key press means to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Action(Action),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Menu,
    Game,
    Archive,
}

pub struct TermManager<W: Write = Stdout> {
    out: W,
    screen: Option<Screen>,
    // Lines last printed on the current screen, so unchanged rows are skipped
    frame: Vec<String>,
}

impl TermManager {
    pub fn new() -> Self {
        TermManager::with_writer(stdout())
    }
}

impl<W: Write> TermManager<W> {
    pub fn with_writer(out: W) -> Self {
        TermManager { out, screen: None, frame: vec![] }
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.out, EnterAlternateScreen).context("Error entering alt screen")?;
        terminal::enable_raw_mode().context("Error setting raw mode")?;
        execute!(self.out, cursor::Hide, cursor::DisableBlinking)
            .context("Error hiding cursor")?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode().context("Error unsetting raw mode")?;
        execute!(self.out, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
            .context("Error leaving alt screen")?;
        Ok(())
    }

    pub fn read_key_blocking(&self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                if ev.kind == KeyEventKind::Press {
                    return Ok(ev);
                }
            }
        }
    }

    pub fn read_key_events_queue(&self) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(1))? {
            if let Event::Key(ev) = read()? {
                if ev.kind == KeyEventKind::Press {
                    events.push(ev);
                }
            }
        }

        Ok(events)
    }

    pub fn draw_menu(&mut self, game: &Game) -> Result<()> {
        self.enter_screen(Screen::Menu)?;
        self.print_line(0, "SNAKE")?;
        self.print_line(2, "MENU")?;

        for (i, item) in MenuItem::ALL.iter().enumerate() {
            let line = if i == game.menu_index() {
                format!("    ***{}***", item.label())
            } else {
                format!("       {}", item.label())
            };
            self.print_line(3 + i as u16, &line)?;
        }

        self.flush()
    }

    /// Score line, then the board inside a one cell wall.
    pub fn draw_game(&mut self, game: &Game) -> Result<()> {
        let board = game.board();
        let wall: String = std::iter::repeat(WALL_CHAR).take(board.width() + 2).collect();

        self.enter_screen(Screen::Game)?;
        self.print_line(0, &format!("Score: {}", game.score()))?;
        self.print_line(BOARD_TOP - 1, &wall)?;

        let mut row = BOARD_TOP;
        for cells in board.rows() {
            let mut line = String::with_capacity(board.width() + 2);
            line.push(WALL_CHAR);
            line.extend(cells.iter().map(|cell| cell.symbol()));
            line.push(WALL_CHAR);
            self.print_line(row, &line)?;
            row += 1;
        }
        self.print_line(row, &wall)?;

        let hint = if game.snake().direction().is_none() { "Press an arrow key to start!" } else { "" };
        self.print_line(row + 2, hint)?;

        self.flush()
    }

    /// Crosses out every segment of a snake already drawn by `draw_game`.
    pub fn mark_dead_snake(&mut self, snake: &Snake) -> Result<()> {
        for &(row, col) in snake.location() {
            let pos = (col as u16 + 1, row as u16 + BOARD_TOP);
            queue!(self.out, cursor::MoveTo(pos.0, pos.1), style::Print(DEAD_SNAKE_CHAR))?;
        }
        // The next frame has to repaint those rows
        self.frame.clear();
        self.flush()
    }

    pub fn draw_archive(&mut self, archive: &Archive) -> Result<()> {
        self.enter_screen(Screen::Archive)?;
        self.print_line(0, "ARCHIVED SNAKES:")?;

        let mut row = 1;
        for record in archive.iter() {
            let line = format!(
                "{} ate {} things: {}",
                record.name(),
                record.score(),
                record.snake().stomach_contents()
            );
            self.print_line(row, &line)?;
            row += 1;
        }

        if archive.is_empty() {
            self.print_line(row, "(none yet)")?;
            row += 1;
        }
        self.print_line(row + 1, "Press Enter to go back")?;

        self.flush()
    }

    pub fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        let (term_width, term_height) = terminal::size()?;
        let msg_height = lines.len() as u16 + 2;
        let msg_width = lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) as u16 + 2;
        let top = (term_height / 2).saturating_sub(msg_height / 2);
        let left = (term_width / 2).saturating_sub(msg_width / 2);

        let blank = " ".repeat(msg_width as usize);
        queue!(self.out, cursor::MoveTo(left, top), style::Print(&blank))?;
        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            queue!(self.out, cursor::MoveTo(left, top + 1 + i as u16), style::Print(padded_line))?;
        }
        queue!(self.out, cursor::MoveTo(left, top + msg_height - 1), style::Print(&blank))?;

        // The box covers part of the frame, which must be repainted later
        self.frame.clear();
        self.flush()
    }

    /// Asks for a player name below `lines`. Esc or Ctrl+C gives `None`.
    pub fn prompt_name(&mut self, lines: &[&str]) -> Result<Option<String>> {
        let mut name = String::new();

        loop {
            let entry = format!("> {:<width$}", name, width = MAX_NAME_LEN);
            let mut shown: Vec<&str> = lines.to_vec();
            shown.push(entry.as_str());
            self.show_message(&shown)?;

            let ev = self.read_key_blocking()?;
            if is_ctrl_c(&ev) {
                return Ok(None);
            }

            match ev.code {
                KeyCode::Enter if !name.trim().is_empty() => return Ok(Some(name.trim().to_owned())),
                KeyCode::Esc => return Ok(None),
                KeyCode::Backspace => {
                    name.pop();
                }
                KeyCode::Char(ch) if !ch.is_control() && name.chars().count() < MAX_NAME_LEN => {
                    name.push(ch)
                }
                _ => {}
            }
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    /// Prints `text` on `row` unless that exact line is already there.
    fn print_line(&mut self, row: u16, text: &str) -> Result<()> {
        let i = row as usize;
        if self.frame.get(i).map(String::as_str) == Some(text) {
            return Ok(());
        }

        queue!(
            self.out,
            cursor::MoveTo(0, row),
            style::Print(text),
            terminal::Clear(ClearType::UntilNewLine)
        )?;

        if self.frame.len() <= i {
            self.frame.resize(i + 1, String::new());
        }
        self.frame[i] = text.to_owned();
        Ok(())
    }

    /// The whole terminal is only wiped when switching to another screen.
    fn enter_screen(&mut self, screen: Screen) -> Result<()> {
        if self.screen != Some(screen) {
            queue!(self.out, terminal::Clear(ClearType::All))?;
            self.screen = Some(screen);
            self.frame.clear();
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush().context("Error flushing")
    }
}

pub fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}

pub fn translate(ev: &KeyEvent) -> Input {
    if is_ctrl_c(ev) {
        return Input::Quit;
    }

    let action = match ev.code {
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Action::Up,
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Action::Left,
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Action::Down,
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Action::Right,
        KeyCode::Enter => Action::Enter,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => return Input::Quit,
        _ => Action::None,
    };
    Input::Action(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrow_and_wasd_keys() {
        assert_eq!(translate(&key(KeyCode::Up)), Input::Action(Action::Up));
        assert_eq!(translate(&key(KeyCode::Char('a'))), Input::Action(Action::Left));
        assert_eq!(translate(&key(KeyCode::Char('S'))), Input::Action(Action::Down));
        assert_eq!(translate(&key(KeyCode::Right)), Input::Action(Action::Right));
        assert_eq!(translate(&key(KeyCode::Enter)), Input::Action(Action::Enter));
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(translate(&key(KeyCode::Esc)), Input::Quit);
        assert_eq!(translate(&key(KeyCode::Char('q'))), Input::Quit);
        assert_eq!(translate(&key(KeyCode::Char('Q'))), Input::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(translate(&ctrl_c), Input::Quit);
        assert!(is_ctrl_c(&ctrl_c));
    }

    #[test]
    fn test_unchanged_lines_are_not_reprinted() {
        let mut term = TermManager::with_writer(Vec::new());
        term.screen = Some(Screen::Game);

        term.print_line(2, "#  #").unwrap();
        assert_eq!(term.frame, ["", "", "#  #"]);
        let written = term.out.len();
        assert!(written > 0);

        term.print_line(2, "#  #").unwrap();
        assert_eq!(term.out.len(), written);

        term.print_line(0, "Score: 3").unwrap();
        assert!(term.out.len() > written);
        assert_eq!(term.frame, ["Score: 3", "", "#  #"]);

        term.enter_screen(Screen::Game).unwrap();
        assert_eq!(term.frame.len(), 3);
        term.enter_screen(Screen::Menu).unwrap();
        assert!(term.frame.is_empty());
        assert_eq!(term.screen, Some(Screen::Menu));
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(translate(&key(KeyCode::Char('x'))), Input::Action(Action::None));
        assert_eq!(translate(&key(KeyCode::Char('c'))), Input::Action(Action::None));
    }
}
