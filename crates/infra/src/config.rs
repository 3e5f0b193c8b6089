use bookli_utils::create_random_secret;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Secret code required to create new `User`s
    pub create_user_secret_code: String,
    /// Port for the application to run on
    pub port: usize,
    /// Where the notification send job delivers due reminders. Delivery
    /// is disabled when not configured.
    pub webhook: Option<WebhookSettings>,
}

#[derive(Debug, Clone)]
pub struct WebhookSettings {
    pub url: String,
    /// Shared key included in the webhook request headers so the receiver
    /// can verify the sender
    pub key: String,
}

impl Config {
    pub fn new() -> Self {
        let create_user_secret_code = match std::env::var("CREATE_USER_SECRET_CODE") {
            Ok(code) => code,
            Err(_) => {
                info!("Did not find CREATE_USER_SECRET_CODE environment variable. Going to create one.");
                let code = create_random_secret(16);
                info!(
                    "Secret code for creating users was generated and set to: {}",
                    code
                );
                code
            }
        };

        let default_port = "5000";
        let port = std::env::var("PORT").unwrap_or_else(|_| default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                5000
            }
        };

        let webhook = match std::env::var("WEBHOOK_URL") {
            Ok(url) => match url::Url::parse(&url) {
                Ok(parsed_url) if ["https", "http"].contains(&parsed_url.scheme()) => {
                    let key = std::env::var("WEBHOOK_KEY")
                        .unwrap_or_else(|_| create_random_secret(16));
                    Some(WebhookSettings { url, key })
                }
                _ => {
                    warn!(
                        "The given WEBHOOK_URL: {} is not a valid http(s) url, notification delivery is disabled.",
                        url
                    );
                    None
                }
            },
            Err(_) => None,
        };

        Self {
            create_user_secret_code,
            port,
            webhook,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
