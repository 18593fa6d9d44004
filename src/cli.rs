//! Command-line interface for ultraghost.

use clap::Parser;
use std::path::PathBuf;

/// Ultraghost - a word duel against the computer
#[derive(Parser, Debug)]
#[command(name = "ultraghost")]
#[command(about = "Play letter-constraint word duels against the computer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the word list, one word per line
    #[arg(short, long, default_value = "/usr/share/dict/words")]
    pub words: PathBuf,

    /// Reuse the letters from puzzle to puzzle until nobody can improve
    #[arg(long)]
    pub hyperghost: bool,

    /// Shortest word accepted as a solution
    #[arg(long, default_value_t = 4)]
    pub min_length: usize,

    /// Score a contestant must reach to win
    #[arg(long, default_value_t = 20)]
    pub win_score: i32,

    /// Words the computer examines per search tick
    #[arg(long, default_value_t = 30)]
    pub batch_size: usize,

    /// Cap on the computer's search ticks per puzzle
    #[arg(long, default_value_t = 1000)]
    pub max_batches: usize,

    /// Your display name
    #[arg(long, default_value = "You")]
    pub name: String,

    /// Print standings as JSON after each puzzle
    #[arg(long)]
    pub json: bool,
}
