use clap::Parser;
use std::path::PathBuf;

/// Golf swing coach: analyzes a swing video and answers follow-up questions
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Recorded or exported swing video
    #[arg(index = 1)] // Positional argument
    pub video: PathBuf,

    /// Path to the config file (defaults to ~/.config/swingcoach/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Gemini API key (overrides GEMINI_API_KEY and the config file)
    #[arg(short = 'k', long)]
    pub api_key: Option<String>,

    /// Gemini model to use
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// Base URL of the generateContent API or of a proxy in front of it
    #[arg(long)]
    pub api_base_url: Option<String>,

    /// Millisecond offsets to sample, comma separated
    #[arg(long, value_delimiter = ',')]
    pub offsets: Option<Vec<u64>>,

    /// Keep extracted frames in this directory instead of a temporary one
    #[arg(long)]
    pub frames_dir: Option<PathBuf>,

    /// ffmpeg binary to use for frame extraction
    #[arg(long)]
    pub ffmpeg: Option<PathBuf>,

    /// Quote this many earlier messages into follow-up questions
    #[arg(long)]
    pub history_turns: Option<usize>,

    /// Print the report and exit without starting the chat
    #[arg(long, default_value_t = false)]
    pub no_chat: bool,

    /// Enable verbose output
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}
