use std::{thread::sleep, time::Duration};

use anyhow::Result;
use log::info;

use crate::game::{Game, State, Tick};
use crate::term::{translate, Input, TermManager};

/// Drives a `Game` from the terminal until the player picks Exit.
pub struct Session {
    game: Game,
    term: TermManager,
    tick: Duration,
}

impl Session {
    pub fn new(game: Game, tick: Duration) -> Self {
        Session { game, term: TermManager::new(), tick }
    }

    pub fn run(&mut self) -> Result<()> {
        self.term.setup()?;
        let result = self.main_loop();
        // Leave the terminal usable even if the loop failed
        self.term.restore()?;
        result
    }

    fn main_loop(&mut self) -> Result<()> {
        loop {
            match self.game.state() {
                State::Menu => {
                    self.term.draw_menu(&self.game)?;
                    match translate(&self.term.read_key_blocking()?) {
                        Input::Quit => self.game.quit(),
                        Input::Action(action) => self.game.handle(action),
                    }
                }
                State::ArchiveView => {
                    self.term.draw_archive(self.game.archive())?;
                    match translate(&self.term.read_key_blocking()?) {
                        Input::Quit => self.game.return_to_menu(),
                        Input::Action(action) => self.game.handle(action),
                    }
                }
                State::Playing => self.play()?,
                State::Exit => {
                    info!("exiting");
                    return Ok(());
                }
            }
        }
    }

    fn play(&mut self) -> Result<()> {
        self.term.draw_game(&self.game)?;

        loop {
            sleep(self.tick);

            for key_ev in self.term.read_key_events_queue()? {
                match translate(&key_ev) {
                    Input::Quit => {
                        self.game.quit();
                        return Ok(());
                    }
                    Input::Action(action) => self.game.handle(action),
                }
            }

            match self.game.advance()? {
                Tick::Crashed(collision) => {
                    info!("run ended by {:?} collision, score {}", collision, self.game.score());
                    return self.game_over(false);
                }
                Tick::BoardFull => return self.game_over(true),
                Tick::Moved | Tick::Ate(_) => self.term.draw_game(&self.game)?,
            }
        }
    }

    fn game_over(&mut self, win: bool) -> Result<()> {
        self.term.draw_game(&self.game)?;
        if !win {
            self.term.mark_dead_snake(self.game.snake())?;
        }

        let headline = if win { "The board is full, you won!" } else { "Game over!" };
        let score = format!("Score: {}", self.game.score());
        let name = self.term.prompt_name(&[
            headline,
            &score,
            "",
            "Enter your name to archive this snake,",
            "or Esc to skip.",
        ])?;

        if let Some(name) = name {
            self.game.archive_snake(&name)?;

            let archive = self.game.archive();
            if let Some(record) = archive.last() {
                info!(
                    "{} snakes archived, latest by {} with {} foods eaten",
                    archive.len(),
                    record.name(),
                    record.snake().stomach().len()
                );
            }
        }

        self.game.return_to_menu();
        Ok(())
    }
}
