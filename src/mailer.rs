//! Outbound email delivery over SMTP using lettre

use anyhow::Context;
use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart, SinglePart, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use thiserror::Error;
use tracing::info;

use crate::config::{EmailConfig, EmailProvider};

const GMAIL_RELAY: &str = "smtp.gmail.com";
const OUTLOOK_RELAY: &str = "smtp-mail.outlook.com";

#[derive(Error, Debug)]
pub enum MailError {
    #[error("invalid mailbox address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build email message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("SMTP delivery failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// One fully-formed outbound email, ready for delivery.
#[derive(Debug, Clone)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

/// The single capability the contact handler needs from a mail system:
/// deliver one message, or fail with a transport error.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError>;
}

/// SMTP-backed mail transport
#[derive(Clone)]
pub struct SmtpMailer {
    mailer: SmtpTransport,
    from: Mailbox,
}

impl SmtpMailer {
    /// Create a mailer from configuration.
    ///
    /// The hosted presets pin the relay host; the generic variant picks
    /// between a TLS wrapper and STARTTLS based on the secure flag, and
    /// drops authentication entirely when no credentials are configured
    /// (local MailDev-style development).
    pub fn new(config: &EmailConfig) -> anyhow::Result<Self> {
        let mailer = match config.service {
            EmailProvider::Gmail => SmtpTransport::relay(GMAIL_RELAY)
                .context("Failed to create SMTP transport")?
                .credentials(Credentials::new(
                    config.username.clone(),
                    config.password.clone(),
                ))
                .build(),
            EmailProvider::Outlook => SmtpTransport::relay(OUTLOOK_RELAY)
                .context("Failed to create SMTP transport")?
                .credentials(Credentials::new(
                    config.username.clone(),
                    config.password.clone(),
                ))
                .build(),
            EmailProvider::Smtp if config.username.is_empty() && config.password.is_empty() => {
                info!(
                    smtp_host = %config.smtp_host,
                    smtp_port = config.smtp_port,
                    "SMTP credentials not configured, using unauthenticated connection (e.g., MailDev)"
                );
                SmtpTransport::builder_dangerous(&config.smtp_host)
                    .port(config.smtp_port)
                    .build()
            }
            EmailProvider::Smtp => {
                let builder = if config.smtp_secure {
                    SmtpTransport::relay(&config.smtp_host)
                } else {
                    SmtpTransport::starttls_relay(&config.smtp_host)
                };
                builder
                    .context("Failed to create SMTP transport")?
                    .port(config.smtp_port)
                    .credentials(Credentials::new(
                        config.username.clone(),
                        config.password.clone(),
                    ))
                    .build()
            }
        };

        let from: Mailbox = format!("{} <{}>", config.from_name, config.from_email)
            .parse()
            .context("Failed to parse from email")?;

        Ok(Self { mailer, from })
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        let to: Mailbox = email.to.parse()?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(email.subject.clone())
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(email.text_body.clone()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(email.html_body.clone()),
                    ),
            )?;

        self.mailer.send(&message)?;

        info!(to = %email.to, subject = %email.subject, "Email sent successfully");

        Ok(())
    }
}
