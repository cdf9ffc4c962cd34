//! Outbound email delivery.
//!
//! Everything that sends mail goes through a [`Mailer`], so the verification
//! workflows never touch a transport directly.

use std::sync::Arc;

use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::{self, authentication::Credentials},
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::{config, Error};

/// Display name of every outgoing message.
const SENDER: &str = "Campus Portal";

/// A plain-text email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mail {
    pub to: lettre::Address,
    pub subject: String,
    pub body: String,
}

#[axum::async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: Mail) -> Result<(), Error>;
}

/// Delivers mail through an SMTP relay.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &config::Mail) -> Result<Self, Error> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.server)?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .timeout(Some(config.timeout()))
            .build();

        Ok(Self {
            transport,
            from: Mailbox::new(Some(SENDER.to_owned()), config.address.clone()),
        })
    }
}

#[axum::async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, mail: Mail) -> Result<(), Error> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(Mailbox::new(None, mail.to))
            .subject(mail.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(mail.body)?;

        let result: Result<_, smtp::Error> = self.transport.send(message).await;
        if let Err(err) = result {
            tracing::error!("error sending email with smtp: {err}");
            return Err(err.into());
        }
        Ok(())
    }
}

/// Logs mail instead of sending it, for setups without credentials.
pub struct LogMailer;

#[axum::async_trait]
impl Mailer for LogMailer {
    async fn send(&self, mail: Mail) -> Result<(), Error> {
        tracing::info!(
            to = %mail.to,
            subject = %mail.subject,
            "mail delivery disabled, message not sent:\n{}",
            mail.body
        );
        Ok(())
    }
}

/// Picks the mailer matching the configuration.
pub fn from_config(config: &config::Mail) -> Result<Arc<dyn Mailer>, Error> {
    if config.enabled() {
        tracing::info!("delivering mail through {}:{}", config.server, config.port);
        Ok(Arc::new(SmtpMailer::new(config)?))
    } else {
        tracing::warn!("mail credentials not configured, mail will only be logged");
        Ok(Arc::new(LogMailer))
    }
}
