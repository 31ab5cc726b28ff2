mod config;
mod question;

pub use config::{Category, Difficulty, SessionConfig, CATEGORIES};
pub use question::{AnswerOption, Question};
