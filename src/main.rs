use anyhow::Result;
use clap::Parser;

use querychat::cli::commands::{ask, chat, configure, health};
use querychat::cli::{Args, Command};
use querychat::output::{self, OutputConfig};
use querychat::logging;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    output::init(OutputConfig { quiet: args.quiet });
    logging::init(args.verbose);

    match args.command.unwrap_or(Command::Chat) {
        Command::Chat => {
            chat::run_chat(chat::ChatOptions {
                endpoint: args.endpoint,
            })
            .await?;
        }
        Command::Ask { words } => {
            ask::run_ask(ask::AskOptions {
                words,
                endpoint: args.endpoint,
            })
            .await?;
        }
        Command::Health => {
            health::run_health(health::HealthOptions {
                endpoint: args.endpoint,
            })
            .await?;
        }
        Command::Configure { show } => {
            configure::run_configure(show)?;
        }
    }

    Ok(())
}
