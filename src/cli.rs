use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pollcast")]
#[command(author, version, about = "Telegram bot that publishes MCQ questions from HTML exports as group polls", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the bot (long polling)
    Run,

    /// Parse a local HTML file and print the extracted questions
    Extract {
        /// Path to the HTML file
        #[arg(short, long)]
        file: PathBuf,

        /// Print the questions as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
