use std::path::PathBuf;

use clap::Parser;
use trivia_quiz::{DEFAULT_API_URL, Difficulty, HighScoreStore, Quiz, SessionConfig, TriviaClient};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of questions to fetch
    #[arg(short, long, default_value_t = 10)]
    amount: u16,

    /// Open Trivia DB category id
    #[arg(short, long, default_value_t = 9)]
    category: u32,

    /// Question difficulty
    #[arg(short, long, value_enum, default_value_t = Difficulty::Easy)]
    difficulty: Difficulty,

    /// Trivia API endpoint
    #[arg(long, default_value = DEFAULT_API_URL)]
    api_url: String,

    /// File the high score is persisted in
    #[arg(long, default_value = "highscore.json")]
    highscore_file: PathBuf,
}

#[tokio::main]
async fn main() {
    pretty_env_logger::init();
    let args = Args::parse();

    let quiz = Quiz::new(
        SessionConfig::new(args.category, args.difficulty, args.amount),
        TriviaClient::new(args.api_url),
        HighScoreStore::new(args.highscore_file),
    );

    if let Err(e) = quiz.run().await {
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}
