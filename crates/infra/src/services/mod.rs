mod webhook;

pub use webhook::WebhookClient;
