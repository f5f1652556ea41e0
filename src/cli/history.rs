use std::error::Error;

use crate::api::history::{fetch_history, sort_history};
use crate::api::HistoryEntry;
use crate::core::config::settings::Settings;
use crate::ui::transcript::{BOT_LABEL, USER_LABEL};

const CONTINUATION_INDENT: &str = "          ";

pub async fn run_history(
    settings: &Settings,
    limit: Option<usize>,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let client = reqwest::Client::builder()
        .timeout(settings.request_timeout)
        .build()?;

    let mut entries = fetch_history(&client, &settings.base_url).await?;
    sort_history(&mut entries);
    let newest = newest(&entries, limit);

    if json {
        println!("{}", serde_json::to_string_pretty(newest)?);
        return Ok(());
    }

    if newest.is_empty() {
        println!("No conversation history yet.");
        return Ok(());
    }

    for line in format_history(newest) {
        println!("{line}");
    }
    Ok(())
}

/// The last `limit` entries of a sorted history.
pub fn newest(entries: &[HistoryEntry], limit: Option<usize>) -> &[HistoryEntry] {
    let skip = limit
        .map(|limit| entries.len().saturating_sub(limit))
        .unwrap_or(0);
    &entries[skip..]
}

pub fn format_history(entries: &[HistoryEntry]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        let when = entry
            .timestamp
            .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "unknown time".to_string());
        lines.push(format!("#{} · {when}", entry.id));
        lines.push(labelled(USER_LABEL, &entry.user_message));
        lines.push(labelled(BOT_LABEL, &entry.bot_response));
    }
    lines
}

fn labelled(label: &str, text: &str) -> String {
    let body = text
        .trim_end()
        .replace('\n', &format!("\n{CONTINUATION_INDENT}"));
    format!("  {:<8}{body}", format!("{label}:"))
}
