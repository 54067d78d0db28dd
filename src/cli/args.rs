use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "querychat")]
#[command(about = "Chat with a question-answering backend from the terminal")]
#[command(version)]
pub struct Args {
    /// Backend base URL (overrides QUERYCHAT_ENDPOINT and the config file)
    #[arg(short = 'e', long, global = true)]
    pub endpoint: Option<String>,

    /// Suppress banners, spinners and status lines
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Log request details to stderr
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start an interactive chat session (the default)
    Chat,
    /// Ask a single question and print the answer
    Ask {
        /// Question text (read from stdin if omitted)
        #[arg(trailing_var_arg = true)]
        words: Vec<String>,
    },
    /// Check that the backend is reachable
    Health,
    /// Set the backend endpoint interactively
    Configure {
        /// Show the current configuration instead of editing it
        #[arg(long)]
        show: bool,
    },
}
