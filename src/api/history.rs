use crate::api::{HistoryEntry, HISTORY_ENDPOINT};
use crate::utils::url::construct_api_url;

pub async fn fetch_history(
    client: &reqwest::Client,
    base_url: &str,
) -> Result<Vec<HistoryEntry>, Box<dyn std::error::Error>> {
    let history_url = construct_api_url(base_url, HISTORY_ENDPOINT);
    tracing::debug!(url = %history_url, "fetching stored history");

    let response = client.get(history_url).send().await?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(format!("History request failed with status {status}: {error_text}").into());
    }

    let entries = response.json::<Vec<HistoryEntry>>().await?;
    Ok(entries)
}

pub fn sort_history(entries: &mut [HistoryEntry]) {
    // Oldest first; rows without a timestamp keep id order at the end.
    entries.sort_by(|a, b| match (&a.timestamp, &b.timestamp) {
        (Some(a_ts), Some(b_ts)) => a_ts.cmp(b_ts).then(a.id.cmp(&b.id)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.id.cmp(&b.id),
    });
}
