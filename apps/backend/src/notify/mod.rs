//! Email delivery policy.
//!
//! Verification mail is the only path allowed to fail a request; every other
//! notification degrades to a log record when delivery does not work out.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::{AppConfig, SmtpSettings};
use crate::error::AppError;

mod smtp;

pub use smtp::SmtpMailer;

/// A fully composed plain-text message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub from_name: String,
    pub from_email: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl OutgoingEmail {
    pub fn new(config: &AppConfig, to: &str, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            from_name: config.app_name.clone(),
            from_email: config.smtp.from_email.clone(),
            to: to.to_string(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("{0} is not configured")]
    NotConfigured(&'static str),
    #[error("invalid address {0}")]
    Address(String),
    #[error("transport failure: {0}")]
    Transport(String),
}

/// Something that can deliver an [`OutgoingEmail`].
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &OutgoingEmail) -> Result<(), MailError>;

    /// Short name for logs
    fn transport(&self) -> &'static str {
        "custom"
    }
}

/// Writes each message to the log instead of a mail server.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: &OutgoingEmail) -> Result<(), MailError> {
        info!(
            email = "logged",
            to = %message.to,
            subject = %message.subject,
            from = %message.from_email
        );
        Ok(())
    }

    fn transport(&self) -> &'static str {
        "log"
    }
}

/// SMTP when the settings are complete, otherwise the log transport.
pub fn mailer_for(config: &AppConfig) -> Arc<dyn Mailer> {
    if let Some(setting) = missing_smtp_setting(&config.smtp) {
        info!("email=transport_selected transport=log missing={}", setting);
        return Arc::new(LogMailer);
    }
    match SmtpMailer::from_settings(&config.smtp) {
        Ok(mailer) => {
            info!(
                "email=transport_selected transport=smtp server={}:{}",
                config.smtp.server, config.smtp.port
            );
            Arc::new(mailer)
        }
        Err(e) => {
            warn!("email=transport_unavailable error={} fallback=log", e);
            Arc::new(LogMailer)
        }
    }
}

/// What the generic path managed to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Sent,
    /// Delivery failed and the message was written to the log instead
    LoggedOnly,
}

fn missing_smtp_setting(smtp: &SmtpSettings) -> Option<&'static str> {
    if smtp.server.trim().is_empty() {
        Some("SMTP_SERVER")
    } else if smtp.username.trim().is_empty() {
        Some("SMTP_USERNAME")
    } else if smtp.password.is_empty() {
        Some("SMTP_PASSWORD")
    } else {
        None
    }
}

/// Send the email-verification link. Any failure is returned to the caller.
pub async fn send_verification_email(
    mailer: &dyn Mailer,
    config: &AppConfig,
    to: &str,
    verify_link: &str,
) -> Result<(), AppError> {
    let app_name = &config.app_name;

    if let Some(setting) = missing_smtp_setting(&config.smtp) {
        error!("email=verification_failed to={} reason=not_configured setting={}", to, setting);
        return Err(AppError::email(MailError::NotConfigured(setting).to_string()));
    }

    let message = OutgoingEmail::new(
        config,
        to,
        format!("Verify your email for {app_name}"),
        format!(
            "Hello,\n\n\
             Please verify your email to complete your registration to {app_name}.\n\n\
             Click the link below (valid for 24 hours):\n\
             {verify_link}\n\n\
             If you did not sign up, you can ignore this email.\n\n\
             Thank you,\n{app_name} Team"
        ),
    );

    info!(
        "email=verification_sending to={} server={}:{}",
        to, config.smtp.server, config.smtp.port
    );
    mailer.send(&message).await.map_err(|e| {
        error!("email=verification_failed to={} error={}", to, e);
        AppError::email(e.to_string())
    })?;
    info!("email=verification_sent to={}", to);
    Ok(())
}

/// Best-effort notification; never fails.
pub async fn send_generic_email(
    mailer: &dyn Mailer,
    config: &AppConfig,
    to: &str,
    subject: &str,
    body: &str,
) -> DeliveryOutcome {
    let message = OutgoingEmail::new(config, to, subject, body);
    match mailer.send(&message).await {
        Ok(()) => DeliveryOutcome::Sent,
        Err(e) => {
            info!(
                email = "fallback_log",
                to = %to,
                subject = %subject,
                body = %body,
                error = %e
            );
            DeliveryOutcome::LoggedOnly
        }
    }
}

pub async fn send_user_status_email(
    mailer: &dyn Mailer,
    config: &AppConfig,
    to: &str,
    approved: bool,
    reason: Option<&str>,
) -> DeliveryOutcome {
    let app_name = &config.app_name;
    let (subject, body) = if approved {
        (
            format!("{app_name}: Registration Approved"),
            "Your registration has been approved.\nYou can now log in to your account.\n".to_string(),
        )
    } else {
        (
            format!("{app_name}: Registration Rejected"),
            format!(
                "Your registration has been rejected.\nReason: {}\n",
                reason.unwrap_or("Not specified.")
            ),
        )
    };
    send_generic_email(mailer, config, to, &subject, &body).await
}

pub async fn send_document_request_status_email(
    mailer: &dyn Mailer,
    config: &AppConfig,
    to: &str,
    document_name: &str,
    requested_at: &str,
    approved: bool,
    reason: Option<&str>,
) -> DeliveryOutcome {
    let app_name = &config.app_name;
    let (subject, body) = if approved {
        (
            format!("{app_name}: Document Request Approved"),
            format!(
                "Your document request has been approved.\n\
                 Document: {document_name}\n\
                 Date of request: {requested_at}\n\
                 You can now log in to your account.\n"
            ),
        )
    } else {
        (
            format!("{app_name}: Document Request Rejected"),
            format!(
                "Your document request has been rejected.\n\
                 Document: {document_name}\n\
                 Date of request: {requested_at}\n\
                 Reason: {}\n",
                reason.unwrap_or("Not specified.")
            ),
        )
    };
    send_generic_email(mailer, config, to, &subject, &body).await
}
