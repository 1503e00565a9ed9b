use log::info;

use crate::error::GameError;
use crate::snake::Snake;

/// A finished run: who played it, how it scored and the snake as it died.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveRecord {
    name: String,
    score: i32,
    snake: Snake,
}

impl ArchiveRecord {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }
}

/// Past runs in the order they were archived. Lives as long as the process.
#[derive(Debug, Default)]
pub struct Archive {
    records: Vec<ArchiveRecord>,
}

impl Archive {
    pub fn new() -> Self {
        Archive { records: vec![] }
    }

    /// Stores a copy of `snake`; the live snake can keep changing afterwards.
    pub fn append(&mut self, name: &str, score: i32, snake: &Snake) -> Result<(), GameError> {
        self.records.try_reserve(1)?;
        self.records.push(ArchiveRecord {
            name: name.to_owned(),
            score,
            snake: snake.clone(),
        });

        info!(
            "archived snake #{} for {:?}: score {}, length {}",
            self.records.len(),
            name,
            score,
            snake.len()
        );
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&ArchiveRecord> {
        self.records.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArchiveRecord> {
        self.records.iter()
    }
}
