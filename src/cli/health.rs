use std::error::Error;

use crate::api::health::fetch_health;
use crate::api::HealthStatus;
use crate::core::config::settings::Settings;

pub async fn run_health(settings: &Settings) -> Result<(), Box<dyn Error>> {
    let client = reqwest::Client::builder()
        .timeout(settings.request_timeout)
        .build()?;

    match fetch_health(&client, &settings.base_url).await {
        Ok(status) => {
            println!("{}", describe_health(&settings.base_url, &status));
            if !status.is_healthy() {
                std::process::exit(1);
            }
            Ok(())
        }
        Err(err) => {
            eprintln!("❌ Could not reach IoTrix at {}: {err}", settings.base_url);
            std::process::exit(1);
        }
    }
}

pub fn describe_health(base_url: &str, status: &HealthStatus) -> String {
    let service = status.service.as_deref().unwrap_or("IoTrix");
    if status.is_healthy() {
        format!("✅ {service} at {base_url} is healthy")
    } else {
        format!("⚠️  {service} at {base_url} reports status: {}", status.status)
    }
}
