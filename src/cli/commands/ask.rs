use anyhow::{Result, bail};

use super::{build_controller, load_config};
use crate::input::read_question;
use crate::output;
use crate::session::{IgnoreReason, SubmitOutcome};
use crate::ui::Spinner;

pub struct AskOptions {
    pub words: Vec<String>,
    pub endpoint: Option<String>,
}

/// Sends one question and prints the assistant's reply to stdout.
///
/// The reply (or the fixed apology) is always printed; a failed exchange
/// additionally makes the command exit non-zero.
pub async fn run_ask(options: AskOptions) -> Result<()> {
    let config = load_config(options.endpoint)?;
    let question = read_question(&options.words)?;

    let controller = build_controller(&config)?;
    controller.update_input(question);

    let spinner = if output::is_quiet() {
        Spinner::hidden()
    } else {
        Spinner::new("Thinking...")
    };
    let outcome = controller.submit().await;
    spinner.stop();

    match outcome {
        SubmitOutcome::Ignored(IgnoreReason::EmptyInput) => {
            bail!("Nothing to ask: the question is empty")
        }
        SubmitOutcome::Ignored(IgnoreReason::Busy) => {
            bail!("Session is busy with another question")
        }
        SubmitOutcome::Completed(exchange) => {
            println!("{}", exchange.reply_text());
            if let Some(kind) = exchange.failure() {
                bail!("Request to {} failed: {kind}", config.endpoint);
            }
            Ok(())
        }
    }
}
