use async_trait::async_trait;
use serde::Serialize;

use crate::config::MailConfig;
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub text: String,
}

/// Outbound mail sink shared through `AppState`.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: MailMessage) -> AppResult<()>;
}

/// Sends mail through an HTTP relay that accepts `{from, to, subject, text}`.
pub struct HttpMailer {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    from: String,
}

impl HttpMailer {
    pub fn new(api_url: String, api_key: Option<String>, from: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
            from,
        }
    }
}

#[derive(Serialize)]
struct RelayPayload<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, message: MailMessage) -> AppResult<()> {
        let payload = RelayPayload {
            from: &self.from,
            to: &message.to,
            subject: &message.subject,
            text: &message.text,
        };

        let mut request = self.client.post(&self.api_url).json(&payload);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to reach mail relay: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Internal(format!(
                "Mail relay rejected message: {}",
                response.status()
            )));
        }

        tracing::info!(to = %message.to, subject = %message.subject, "Mail sent");
        Ok(())
    }
}

/// Logs messages instead of delivering them.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: MailMessage) -> AppResult<()> {
        tracing::info!(
            to = %message.to,
            subject = %message.subject,
            body = %message.text,
            "No mail relay configured, logging message"
        );
        Ok(())
    }
}

pub fn mailer_from_config(config: &MailConfig) -> std::sync::Arc<dyn Mailer> {
    match &config.api_url {
        Some(url) => std::sync::Arc::new(HttpMailer::new(
            url.clone(),
            config.api_key.clone(),
            config.from_address.clone(),
        )),
        None => std::sync::Arc::new(LogMailer),
    }
}
