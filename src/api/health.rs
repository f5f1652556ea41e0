use crate::api::{HealthStatus, HEALTH_ENDPOINT};
use crate::utils::url::construct_api_url;

pub async fn fetch_health(
    client: &reqwest::Client,
    base_url: &str,
) -> Result<HealthStatus, Box<dyn std::error::Error>> {
    let health_url = construct_api_url(base_url, HEALTH_ENDPOINT);
    tracing::debug!(url = %health_url, "probing backend health");

    let response = client.get(health_url).send().await?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(format!("Health check failed with status {status}: {error_text}").into());
    }

    let health = response.json::<HealthStatus>().await?;
    Ok(health)
}
