//! SMTP transport.
//!
//! Port 465 uses implicit TLS; every other port upgrades with STARTTLS before
//! logging in.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;

use super::{MailError, Mailer, OutgoingEmail};
use crate::config::SmtpSettings;

const IMPLICIT_TLS_PORT: u16 = 465;
const SMTP_TIMEOUT: Duration = Duration::from_secs(10);

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn from_settings(smtp: &SmtpSettings) -> Result<Self, MailError> {
        let builder = if smtp.port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&smtp.server)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&smtp.server)
        }
        .map_err(|e| MailError::Transport(format!("invalid SMTP server '{}': {e}", smtp.server)))?;

        let transport = builder
            .port(smtp.port)
            .credentials(Credentials::new(smtp.username.clone(), smtp.password.clone()))
            .timeout(Some(SMTP_TIMEOUT))
            .build();
        Ok(Self { transport })
    }
}

fn build_message(message: &OutgoingEmail) -> Result<Message, MailError> {
    let from_address: Address = message
        .from_email
        .parse()
        .map_err(|e| MailError::Address(format!("{}: {e}", message.from_email)))?;
    let to: Mailbox = message
        .to
        .parse()
        .map_err(|e| MailError::Address(format!("{}: {e}", message.to)))?;

    Message::builder()
        .from(Mailbox::new(Some(message.from_name.clone()), from_address))
        .to(to)
        .subject(message.subject.clone())
        .header(ContentType::TEXT_PLAIN)
        .body(message.body.clone())
        .map_err(|e| MailError::Transport(format!("failed to build message: {e}")))
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: &OutgoingEmail) -> Result<(), MailError> {
        let email = build_message(message)?;
        self.transport
            .send(email)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;
        debug!("email=smtp_accepted to={}", message.to);
        Ok(())
    }

    fn transport(&self) -> &'static str {
        "smtp"
    }
}

impl std::fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpMailer").finish_non_exhaustive()
    }
}
