//! TUI-less "say" command

use std::error::Error;
use std::io::{self, Write};
use std::sync::Arc;

use crate::core::chat_client::HttpChatClient;
use crate::core::config::settings::Settings;
use crate::core::controller::{ExchangeController, RejectReason, SendOutcome};
use tracing::debug;

pub async fn run_say(message: Vec<String>, settings: &Settings) -> Result<(), Box<dyn Error>> {
    let message = message.join(" ");
    if message.trim().is_empty() {
        eprintln!("Usage: iotrix say <message>");
        std::process::exit(1);
    }

    let transport = HttpChatClient::new(&settings.base_url)?;
    debug!(base_url = transport.base_url(), "sending one-shot message");
    let controller = ExchangeController::new(Arc::new(transport), settings.request_timeout);

    let outcome = say(&controller, &message, &mut io::stdout().lock()).await?;
    if let SendOutcome::Fallback(err) = outcome {
        eprintln!("❌ Error: {err}");
        std::process::exit(1);
    }
    Ok(())
}

/// Run one exchange and write whatever ended up in the reply slot.
pub async fn say<W: Write>(
    controller: &ExchangeController,
    message: &str,
    out: &mut W,
) -> Result<SendOutcome, Box<dyn Error>> {
    let outcome = controller.send(message).await;
    if let SendOutcome::Rejected(reason) = &outcome {
        return Err(match reason {
            RejectReason::Blank => "message is empty".into(),
            RejectReason::Busy => "another message is still waiting for a reply".into(),
        });
    }

    let reply = controller.read(|session| {
        session
            .conversation
            .last()
            .map(|exchange| exchange.bot().to_string())
    });
    if let Some(reply) = reply {
        writeln!(out, "{reply}")?;
        out.flush()?;
    }
    Ok(outcome)
}
