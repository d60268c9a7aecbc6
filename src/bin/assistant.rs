//! # Persona Assistant
//!
//! Line-oriented chat with a persona-conditioned language model.
//!
//! Usage: `cargo run --bin assistant`

use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info};
use std::io;
use tokio::io::BufReader;

use persona_assistant::cli::run_repl;
use persona_assistant::core::{Config, Provider};
use persona_assistant::ChatSession;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    // The openai crate reads its key from the environment, not from our config
    if config.provider == Provider::OpenAi {
        std::env::set_var("OPENAI_API_KEY", &config.api_key);
        std::env::set_var("OPENAI_KEY", &config.api_key);
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting persona assistant...");

    let mut session = ChatSession::from_config(&config)?;

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = io::stdout();

    if let Err(e) = run_repl(&mut session, stdin, &mut stdout).await {
        error!("Assistant stopped: {e:#}");
        return Err(e);
    }

    info!(
        "Session ended after {} turns",
        session.history().turn_count()
    );
    Ok(())
}
