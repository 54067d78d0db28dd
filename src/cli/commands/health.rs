use anyhow::{Context, Result};

use super::{build_backend, load_config};
use crate::ui::Style;

pub struct HealthOptions {
    pub endpoint: Option<String>,
}

/// Probes the backend root route and prints what it reports.
pub async fn run_health(options: HealthOptions) -> Result<()> {
    let config = load_config(options.endpoint)?;
    let backend = build_backend(&config)?;

    let health = backend
        .health()
        .await
        .with_context(|| format!("Backend at {} is not reachable", config.endpoint))?;

    println!(
        "{} {}",
        Style::success("✓"),
        Style::value(backend.endpoint())
    );
    if let Some(status) = health.status {
        println!("  {}   {status}", Style::label("status"));
    }
    if let Some(message) = health.message {
        println!("  {}  {}", Style::label("message"), Style::secondary(message));
    }
    Ok(())
}
