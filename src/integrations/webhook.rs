use super::{HookPayload, Webhook};
use crate::core::{config::WebhookConfig, util};
use reqwest::StatusCode;
use std::time::Duration;

/// Local Slack app listening for hook events.
pub struct SlackApp {
    url: String,
    timeout: Duration,
}

impl SlackApp {
    pub fn new(cfg: &WebhookConfig) -> Self {
        SlackApp {
            url: cfg.url.clone(),
            timeout: cfg.timeout(),
        }
    }
}

impl Webhook for SlackApp {
    /// Single attempt. Anything but a 200 counts as failure.
    fn post(&self, payload: &HookPayload) -> Result<(), String> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .no_proxy()
            .build()
            .map_err(|e| format!("Cannot build HTTP client: {}", e))?;

        log::info!("Sending payload to {}: {:?}", self.url, payload);

        let response = client
            .post(&self.url)
            .json(payload)
            .send()
            .map_err(|e| format!("Connection error to Slack app at {}: {}", self.url, e))?;

        let status = response.status();
        let body = response.text().unwrap_or_default();
        log::info!("Slack response: {} {}", status.as_u16(), util::preview(&body, 200));

        if status == StatusCode::OK {
            Ok(())
        } else {
            Err(format!("Slack app returned {}", status))
        }
    }
}
