//! Email notifier
//!
//! Sends the digest as a plain-text email through an authenticated SMTP
//! relay. Any failure to build or send the message is logged and reported
//! as an unsuccessful delivery.

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use jobwatch_core::{Digest, Job};
use lettre::message::{Mailbox, Message, header};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use tracing::{error, info};

use super::Notifier;
use crate::config::EmailSettings;

pub struct EmailNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl EmailNotifier {
    /// Builds the SMTP transport from configuration
    ///
    /// Uses implicit TLS on the configured port. The digest is sent from
    /// `address` to `to`, or back to `address` when no recipient is set.
    pub fn new(settings: &EmailSettings) -> Result<Self> {
        let address = settings
            .address
            .as_deref()
            .ok_or_else(|| anyhow!("EMAIL_ADDRESS is not set"))?;
        let password = settings
            .password
            .as_deref()
            .ok_or_else(|| anyhow!("EMAIL_PASSWORD is not set"))?;

        let from = address
            .parse::<Mailbox>()
            .with_context(|| format!("Invalid sender address '{}'", address))?;
        let to = match settings.to.as_deref() {
            Some(to) => to
                .parse::<Mailbox>()
                .with_context(|| format!("Invalid recipient address '{}'", to))?,
            None => from.clone(),
        };

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.smtp_host)
            .with_context(|| format!("Failed to configure SMTP relay {}", settings.smtp_host))?
            .port(settings.smtp_port)
            .credentials(Credentials::new(address.to_string(), password.to_string()))
            .build();

        Ok(Self {
            transport,
            from,
            to,
        })
    }

    fn build_message(&self, digest: &Digest) -> Result<Message> {
        Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(digest.subject.as_str())
            .header(header::ContentType::TEXT_PLAIN)
            .body(digest.body.clone())
            .context("Failed to build email message")
    }

    async fn send(&self, digest: &Digest) -> Result<()> {
        let message = self.build_message(digest)?;
        self.transport
            .send(message)
            .await
            .context("Failed to send email")?;
        Ok(())
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn deliver(&self, jobs: &[Job]) -> bool {
        let digest = Digest::render(jobs);

        match self.send(&digest).await {
            Ok(()) => {
                info!(subject = %digest.subject, "Alert sent to {}", self.to);
                true
            }
            Err(e) => {
                error!("Failed to send email alert: {:#}", e);
                false
            }
        }
    }
}
