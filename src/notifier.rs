//! Outbound chat notifications.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::config::TelegramConfig;

/// Why a notification was not delivered.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Bot token or chat id is missing from the environment.
    #[error("telegram bot token or chat id not configured")]
    NotConfigured,
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected response status {0}")]
    Status(StatusCode),
    /// The Bot API answered with `"ok": false`.
    #[error("rejected by telegram: {0}")]
    Rejected(String),
}

pub type NotifyResult<T> = Result<T, NotifyError>;

/// Delivers plain-text messages to the user.
pub trait Notifier {
    fn send(&self, text: &str) -> NotifyResult<()>;
}

struct Credentials {
    bot_token: String,
    chat_id: String,
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct BotApiResponse {
    ok: bool,
    description: Option<String>,
}

/// [`Notifier`] posting to the Telegram Bot API `sendMessage` method.
pub struct TelegramNotifier {
    client: Client,
    api_base: String,
    credentials: Option<Credentials>,
}

impl TelegramNotifier {
    pub fn new(config: &TelegramConfig) -> NotifyResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let credentials = match (&config.bot_token, &config.chat_id) {
            (Some(bot_token), Some(chat_id)) if !bot_token.is_empty() && !chat_id.is_empty() => {
                Some(Credentials {
                    bot_token: bot_token.clone(),
                    chat_id: chat_id.clone(),
                })
            }
            _ => {
                log::warn!("Telegram credentials missing; alerts will not be delivered");
                None
            }
        };

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    fn send_message_url(&self, bot_token: &str) -> String {
        format!("{}/bot{bot_token}/sendMessage", self.api_base)
    }
}

impl Notifier for TelegramNotifier {
    fn send(&self, text: &str) -> NotifyResult<()> {
        let credentials = self.credentials.as_ref().ok_or(NotifyError::NotConfigured)?;

        let response = self
            .client
            .post(self.send_message_url(&credentials.bot_token))
            .json(&SendMessage {
                chat_id: &credentials.chat_id,
                text,
            })
            .send()?;

        let status = response.status();
        match response.json::<BotApiResponse>() {
            Ok(body) if body.ok && status.is_success() => Ok(()),
            Ok(body) => Err(NotifyError::Rejected(
                body.description.unwrap_or_else(|| status.to_string()),
            )),
            Err(_) if !status.is_success() => Err(NotifyError::Status(status)),
            Err(e) => Err(e.into()),
        }
    }
}
