//! Echo Bot Example
//!
//! A LINE bot that repeats what it is told, built on the Courier runtime.
//!
//! # Commands
//!
//! - `/help`  - a buttons template with the available commands
//! - `/where` - a text followed by a location pin
//! - anything else is echoed back
//!
//! # Usage
//!
//! ```bash
//! COURIER_ADAPTERS__LINE__CHANNEL_SECRET=<base64 secret> \
//! COURIER_ADAPTERS__LINE__CHANNEL_ACCESS_TOKEN=<base64 token> \
//! cargo run --package echo-bot -- --config courier.toml
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use courier::prelude::*;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "echo-bot", about = "Echo bot for the LINE Messaging API")]
struct Args {
    /// Configuration file to load instead of searching for `courier.toml`.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Configuration profile, e.g. `dev` loads `courier.dev.toml` first.
    #[arg(short, long, env = "COURIER_PROFILE")]
    profile: Option<String>,
}

// ============================================================================
// Replies
// ============================================================================

fn help() -> Result<BotReply> {
    let mut menu = ButtonsBuilder::new("What can I do for you?", "Echo bot commands")?;
    menu.title("Echo Bot")?
        .add_message_button("Where are you?", "/where")?
        .add_postback_button("Say hi", "greeting=hi", Some("hi"))?
        .add_uri_button("Website", "https://example.com")?;
    Ok(menu.build()?.into())
}

fn location() -> Result<BotReply> {
    let pin = OutboundMessage::location(
        "University of Science and Technology of China",
        "96 Jinzhai Road, Hefei, Anhui",
        31.8389,
        117.2636,
    )?;
    Ok(BotReply::batch([
        ReplyItem::from("I live here:"),
        pin.into(),
    ]))
}

async fn echo(msg: CanonicalMessage, _req: Arc<WebhookRequest>) -> Result<BotReply> {
    info!(sender = %msg.sender, text = %msg.text, "Received message");

    if msg.is_postback() {
        return Ok(format!("You picked: {}", msg.text).into());
    }
    match msg.text.trim() {
        "" => Ok(BotReply::Empty),
        "/help" => help(),
        "/where" => location(),
        text => Ok(text.into()),
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut builder = CourierRuntime::builder();
    if let Some(path) = args.config {
        builder = builder.config_file(path);
    }
    if let Some(profile) = args.profile {
        builder = builder.profile(profile);
    }
    let runtime = builder.build()?;

    runtime.register_adapter::<LineAdapter>(echo).await?;
    runtime.run().await?;

    Ok(())
}
