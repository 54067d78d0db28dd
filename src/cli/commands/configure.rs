//! Configure command handler for editing the backend settings.

use anyhow::Result;
use inquire::Text;
use inquire::validator::Validation;

use crate::backend::DEFAULT_CHAT_PATH;
use crate::config::{ClientConfig, ConfigManager, normalize_chat_path, validate_endpoint};
use crate::ui::{Style, cancellable};

/// Runs the configure command.
///
/// With `show`, prints the current settings; otherwise prompts for the
/// endpoint and chat path and saves them.
pub fn run_configure(show: bool) -> Result<()> {
    let manager = ConfigManager::new()?;
    if show {
        let config = manager.load()?;
        print_client_config(&manager, &config.client);
        return Ok(());
    }

    if cancellable(prompt_and_save(&manager))?.is_none() {
        println!();
        println!("{}", Style::secondary("Configuration unchanged"));
    }
    Ok(())
}

fn prompt_and_save(manager: &ConfigManager) -> Result<()> {
    let mut config = manager.load()?;
    print_client_config(manager, &config.client);

    let current_endpoint = config.client.endpoint.clone().unwrap_or_default();
    let endpoint = Text::new("Backend endpoint:")
        .with_default(&current_endpoint)
        .with_placeholder("http://localhost:5000")
        .with_validator(|input: &str| {
            Ok(match validate_endpoint(input) {
                Ok(_) => Validation::Valid,
                Err(e) => Validation::Invalid(e.to_string().into()),
            })
        })
        .prompt()?;

    let current_path = normalize_chat_path(config.client.chat_path.as_deref());
    let chat_path = Text::new("Chat path:")
        .with_default(&current_path)
        .with_help_message("Path appended to the endpoint for chat requests")
        .prompt()?;

    config.client.endpoint = Some(validate_endpoint(&endpoint)?);
    let chat_path = normalize_chat_path(Some(&chat_path));
    config.client.chat_path = (chat_path != DEFAULT_CHAT_PATH).then_some(chat_path);

    manager.save(&config)?;

    println!();
    println!(
        "{} Configuration saved to {}",
        Style::success("✓"),
        Style::secondary(manager.config_path().display())
    );

    Ok(())
}

fn print_client_config(manager: &ConfigManager, client: &ClientConfig) {
    let unset = || Style::secondary("(not set)");

    println!(
        "{} {}",
        Style::header("Current configuration"),
        Style::secondary(manager.config_path().display())
    );
    println!(
        "  {}      {}",
        Style::label("endpoint"),
        client.endpoint.as_ref().map_or_else(unset, Style::value)
    );
    println!(
        "  {}     {}",
        Style::label("chat path"),
        Style::value(normalize_chat_path(client.chat_path.as_deref()))
    );
    println!(
        "  {}  {}",
        Style::label("timeout secs"),
        client.timeout_secs.map_or_else(unset, Style::value)
    );
    println!(
        "  {}      {}",
        Style::label("greeting"),
        client.greeting.as_ref().map_or_else(unset, Style::value)
    );
    println!();
}
