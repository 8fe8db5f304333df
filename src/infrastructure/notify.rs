//! Alert delivery: SMTP mail when configured, log lines otherwise.

use crate::config::EmailConfig;
use crate::domain::ports::Notifier;
use anyhow::{Context, Result};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::info;

pub struct SmtpNotifier {
    config: EmailConfig,
}

impl SmtpNotifier {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn notify(&self, subject: &str, body: &str) -> Result<()> {
        let email = Message::builder()
            .from(self.config.from.parse().context("Invalid EMAIL_FROM address")?)
            .to(self.config.to.parse().context("Invalid EMAIL_TO address")?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .context("Failed to build alert mail")?;

        let credentials = Credentials::new(
            self.config.username.clone(),
            self.config.password.clone(),
        );

        let mailer = SmtpTransport::starttls_relay(&self.config.smtp_server)
            .context("Invalid SMTP relay")?
            .port(self.config.smtp_port)
            .credentials(credentials)
            .build();

        // lettre's SmtpTransport is blocking; keep it off the async workers
        tokio::task::spawn_blocking(move || mailer.send(&email))
            .await
            .context("SMTP send task failed")?
            .context("SMTP send failed")?;

        info!("SmtpNotifier: alert mail sent to {}", self.config.to);
        Ok(())
    }
}

/// Fallback used when no SMTP settings are present: alerts land in the log
/// instead of silently disappearing.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, subject: &str, body: &str) -> Result<()> {
        info!("LogNotifier: {}\n{}", subject, body);
        Ok(())
    }
}
