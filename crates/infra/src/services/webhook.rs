use crate::config::WebhookSettings;
use serde::Serialize;

/// Header carrying the shared webhook key so that receivers can verify
/// that the request came from this server
const WEBHOOK_KEY_HEADER: &str = "bookli-webhook-key";

#[derive(Clone)]
pub struct WebhookClient {
    client: reqwest::Client,
}

impl WebhookClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    pub async fn send<T: Serialize>(
        &self,
        settings: &WebhookSettings,
        body: &T,
    ) -> anyhow::Result<()> {
        self.client
            .post(&settings.url)
            .header(WEBHOOK_KEY_HEADER, &settings.key)
            .json(body)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}

impl Default for WebhookClient {
    fn default() -> Self {
        Self::new()
    }
}
