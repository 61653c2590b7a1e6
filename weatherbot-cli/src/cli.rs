use anyhow::Result;
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};

use weatherbot_core::{ChatMessage, Config, MessageHandler};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherbot", version, about = "Weather chat bot console")]
pub struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// Chat with the bot interactively. Type "/quit" or press Esc to leave.
    Chat,

    /// Run a single message through the bot, e.g. "!weather forecast London".
    Send {
        /// The full message text, quoted.
        text: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Chat => chat().await,
            Command::Send { text } => send(&text).await,
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;

    config.set_openweather_api_key(api_key);
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn chat() -> Result<()> {
    let config = Config::load()?;
    let handler = MessageHandler::from_config(&config)?;

    println!("Chatting with weatherbot. Commands start with \"!weather\" - try \"!weather help\".");

    loop {
        let line = match Text::new("you:").prompt() {
            Ok(line) => line,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        if line.trim() == "/quit" {
            break;
        }

        let message = ConsoleMessage { text: line };
        handler.handle(&message).await?;
    }

    Ok(())
}

async fn send(text: &str) -> Result<()> {
    let config = Config::load()?;
    let handler = MessageHandler::from_config(&config)?;

    let message = ConsoleMessage { text: text.to_string() };
    handler.handle(&message).await
}

/// A console line standing in for a chat-platform message. Replies go to
/// stdout; the console user is never a bot.
#[derive(Debug)]
struct ConsoleMessage {
    text: String,
}

#[async_trait]
impl ChatMessage for ConsoleMessage {
    fn text(&self) -> &str {
        &self.text
    }

    fn is_from_bot(&self) -> bool {
        false
    }

    async fn reply(&self, text: &str) -> Result<()> {
        println!("weatherbot: {text}");
        Ok(())
    }
}
