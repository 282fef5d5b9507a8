//! Simple IRC client example
//!
//! Connects to the server named in a TOML config (first argument), or to
//! Libera.Chat with a default nick, joins the configured channels and answers
//! greetings.
//!
//! ```text
//! RUST_LOG=slirc_client=debug cargo run --example simple_client -- bot.toml
//! ```

use slirc_client::{Client, ClientConfig, Event};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => ClientConfig::load(&path)?,
        None => ClientConfig::new("irc.libera.chat", "slirc_example")
            .with_realname("slirc-client example")
            .with_channel("#slirc-example"),
    };
    info!(server = %config.addr(), nick = %config.nickname, "starting");

    let mut client = Client::spawn(config)?;
    let handle = client.handle();

    while let Some(event) = client.next_event().await {
        match event {
            Event::Raw(msg) => println!("← {}", msg),
            Event::Welcome => info!("registered"),
            Event::Join { channel } => {
                handle.privmsg(channel, "Hello from slirc-client!")?;
            }
            Event::PrivMsg { nick, message } => {
                if message.contains("quit") {
                    handle.quit(Some("Goodbye!".into()))?;
                } else {
                    handle.privmsg(nick, format!("you said: {}", message))?;
                }
            }
            Event::Message {
                nick,
                message,
                channel,
            } if message.contains("hello") => {
                handle.privmsg(channel, format!("Hello there, {}! 👋", nick))?;
            }
            Event::IrcError { error } => warn!(%error, "server error"),
            Event::Error(error) => warn!(%error, "connection error"),
            Event::Close => info!("connection closed"),
            _ => {}
        }
    }

    Ok(())
}
