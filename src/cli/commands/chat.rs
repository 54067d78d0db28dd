use anyhow::Result;

use super::{build_controller, load_config};
use crate::chat::ChatSession;

pub struct ChatOptions {
    pub endpoint: Option<String>,
}

pub async fn run_chat(options: ChatOptions) -> Result<()> {
    let config = load_config(options.endpoint)?;
    let controller = build_controller(&config)?;
    ChatSession::new(config, controller).run().await
}
