mod highscore;

pub use highscore::{HIGH_SCORE_KEY, HighScoreStore, StoreError};
