use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Input MP3 file for the full translation pipeline
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Target language name or code (e.g. 'Spanish' or 'es'). Prompted if omitted.
    #[arg(short, long)]
    pub language: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List supported languages and their codes
    Languages,

    /// Transcribe an audio file to text
    Transcribe {
        /// Input audio file
        #[arg(short, long)]
        input: PathBuf,

        /// Output text file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Translate a text file to a target language
    Translate {
        /// Input text file
        #[arg(short, long)]
        input: PathBuf,

        /// Target language name or code
        #[arg(short, long)]
        language: String,

        /// Output text file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Synthesize speech from a text file
    Synthesize {
        /// Input text file
        #[arg(short, long)]
        input: PathBuf,

        /// Language name or code the text is in
        #[arg(short, long)]
        language: String,

        /// Output MP3 file
        #[arg(short, long)]
        output: PathBuf,
    },
}
