use anyhow::Result;
use inquire::Text;
use inquire::ui::{Attributes, Color, RenderConfig, StyleSheet, Styled};

use super::command::{Input, SlashCommand, SlashCommandCompleter, parse_input};
use super::ui;
use crate::config::ResolvedConfig;
use crate::output;
use crate::session::{ChatController, SubmitOutcome};
use crate::ui::{Spinner, Style, answer_or_closed};

/// An interactive chat REPL on top of a [`ChatController`].
pub struct ChatSession {
    config: ResolvedConfig,
    controller: ChatController,
}

impl ChatSession {
    pub const fn new(config: ResolvedConfig, controller: ChatController) -> Self {
        Self { config, controller }
    }

    pub async fn run(&self) -> Result<()> {
        ui::print_header();
        ui::print_transcript(&self.controller.transcript());

        let prompt_style = Styled::new("❯")
            .with_fg(Color::LightBlue)
            .with_attr(Attributes::BOLD);
        let mut render_config = RenderConfig::default()
            .with_prompt_prefix(prompt_style)
            .with_answered_prompt_prefix(prompt_style);
        render_config.option = StyleSheet::new().with_fg(Color::Grey);
        render_config.selected_option = Some(StyleSheet::new().with_fg(Color::DarkMagenta));

        loop {
            let line = Text::new("")
                .with_render_config(render_config)
                .with_autocomplete(SlashCommandCompleter)
                .with_help_message("Ask a question, /help for commands, Ctrl+C to quit")
                .prompt();
            let Some(line) = answer_or_closed(line)? else {
                println!();
                break;
            };

            match parse_input(&line) {
                Input::Empty => {}
                Input::Command(cmd) => {
                    if !self.handle_command(cmd) {
                        break;
                    }
                }
                Input::Message(text) => {
                    self.controller.update_input(text);
                    self.send().await;
                }
            }
        }

        ui::print_goodbye();
        Ok(())
    }

    fn handle_command(&self, cmd: SlashCommand) -> bool {
        match cmd {
            SlashCommand::Config => {
                ui::print_config(&self.config);
                true
            }
            SlashCommand::Help => {
                ui::print_help();
                true
            }
            SlashCommand::History => {
                ui::print_transcript(&self.controller.transcript());
                true
            }
            SlashCommand::Quit => false,
            SlashCommand::Unknown(cmd) => {
                ui::print_error(&format!(
                    "Unknown command: /{cmd} (try {})",
                    Style::command("/help")
                ));
                true
            }
        }
    }

    /// Submits the pending input and prints the assistant's answer.
    async fn send(&self) {
        let spinner = if output::is_quiet() {
            Spinner::hidden()
        } else {
            Spinner::new("Thinking...")
        };
        let outcome = self.controller.submit().await;
        spinner.stop();

        if let SubmitOutcome::Completed(_) = outcome
            && let Some(reply) = self.controller.transcript().last()
        {
            ui::print_message(reply);
        }
    }
}
