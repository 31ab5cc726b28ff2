//! Session configuration edited on the start screen.

use clap::ValueEnum;

/// An Open Trivia DB category.
pub struct Category {
    pub id: u32,
    pub label: &'static str,
}

/// Categories offered on the start screen, by Open Trivia DB id.
pub const CATEGORIES: &[Category] = &[
    Category { id: 9, label: "General Knowledge" },
    Category { id: 10, label: "Books" },
    Category { id: 11, label: "Film" },
    Category { id: 12, label: "Music" },
    Category { id: 14, label: "Television" },
    Category { id: 15, label: "Video Games" },
    Category { id: 17, label: "Science & Nature" },
    Category { id: 18, label: "Computers" },
    Category { id: 21, label: "Sports" },
    Category { id: 22, label: "Geography" },
    Category { id: 23, label: "History" },
];

pub const MIN_AMOUNT: u16 = 1;
pub const MAX_AMOUNT: u16 = 50;

/// Question difficulty filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Value used in the API query string.
    pub fn query_value(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Upper-cased label for the quiz sidebar.
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Hard,
            Difficulty::Medium => Difficulty::Easy,
            Difficulty::Hard => Difficulty::Medium,
        }
    }
}

// Lets clap print the default value in --help.
impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.query_value())
    }
}

/// Filters for one question batch request.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Index into [`CATEGORIES`].
    category_index: usize,
    pub difficulty: Difficulty,
    pub amount: u16,
}

impl SessionConfig {
    /// Build a config from CLI values. An unknown category id falls back to
    /// the first entry in [`CATEGORIES`]; the amount is clamped to the range
    /// the API accepts.
    pub fn new(category_id: u32, difficulty: Difficulty, amount: u16) -> Self {
        let category_index = CATEGORIES
            .iter()
            .position(|c| c.id == category_id)
            .unwrap_or_else(|| {
                log::warn!("unknown category id {category_id}, using {}", CATEGORIES[0].label);
                0
            });

        Self {
            category_index,
            difficulty,
            amount: amount.clamp(MIN_AMOUNT, MAX_AMOUNT),
        }
    }

    pub fn category(&self) -> &'static Category {
        &CATEGORIES[self.category_index]
    }

    pub fn next_category(&mut self) {
        self.category_index = (self.category_index + 1) % CATEGORIES.len();
    }

    pub fn previous_category(&mut self) {
        self.category_index = (self.category_index + CATEGORIES.len() - 1) % CATEGORIES.len();
    }

    pub fn increase_amount(&mut self) {
        self.amount = (self.amount + 1).min(MAX_AMOUNT);
    }

    pub fn decrease_amount(&mut self) {
        self.amount = self.amount.saturating_sub(1).max(MIN_AMOUNT);
    }
}
