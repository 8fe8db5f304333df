use anyhow::{Context, Result};
use std::env;

/// SMTP settings for alert delivery. Only constructed when a recipient is
/// configured; otherwise alerts fall back to the log notifier.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_server: String,
    pub smtp_port: u16,
    pub from: String,
    pub to: String,
    pub username: String,
    pub password: String,
}

impl EmailConfig {
    pub fn from_env() -> Result<Option<Self>> {
        let Ok(to) = env::var("EMAIL_TO") else {
            return Ok(None);
        };

        let from = env::var("EMAIL_FROM").context("EMAIL_FROM required when EMAIL_TO is set")?;
        let username = env::var("EMAIL_USERNAME").unwrap_or_else(|_| from.clone());
        let password =
            env::var("EMAIL_PASSWORD").context("EMAIL_PASSWORD required when EMAIL_TO is set")?;

        Ok(Some(Self {
            smtp_server: env::var("EMAIL_SMTP_SERVER")
                .unwrap_or_else(|_| "smtp.gmail.com".to_string()),
            smtp_port: env::var("EMAIL_SMTP_PORT")
                .unwrap_or_else(|_| "587".to_string())
                .parse()
                .context("Invalid EMAIL_SMTP_PORT")?,
            from,
            to,
            username,
            password,
        }))
    }
}
