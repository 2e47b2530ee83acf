//! Contact notification mail
//!
//! When SMTP credentials are configured, every contact message is forwarded
//! to the portfolio owner. Delivery is best effort: failures are logged and
//! never reach the visitor.

use crate::config::MailConfig;
use crate::models::Message;
use anyhow::{anyhow, Result};
use lettre::{
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message as Email, Tokio1Executor,
};

struct Outbound {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

pub struct NotificationMailer {
    outbound: Option<Outbound>,
}

impl NotificationMailer {
    /// Build the SMTP transport once; a bad configuration disables mail.
    pub fn from_config(config: &MailConfig) -> Self {
        if !config.is_enabled() {
            tracing::info!("SMTP credentials not set, contact notifications disabled");
            return Self::disabled();
        }

        match build_outbound(config) {
            Ok(outbound) => {
                tracing::info!(
                    "Contact notifications go to {} via {}:{}",
                    outbound.to,
                    config.smtp_host,
                    config.smtp_port
                );
                Self {
                    outbound: Some(outbound),
                }
            }
            Err(e) => {
                tracing::warn!("Contact notifications disabled: {:#}", e);
                Self::disabled()
            }
        }
    }

    pub fn disabled() -> Self {
        Self { outbound: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.outbound.is_some()
    }

    /// Forward a contact message to the owner, logging any failure
    pub async fn notify_new_message(&self, message: &Message) {
        let Some(outbound) = &self.outbound else {
            return;
        };

        let result = match build_notification(outbound.from.clone(), outbound.to.clone(), message) {
            Ok(email) => outbound
                .transport
                .send(email)
                .await
                .map(|_| ())
                .map_err(|e| anyhow!("SMTP delivery failed: {}", e)),
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => tracing::info!("Sent notification for message {}", message.id),
            Err(e) => tracing::error!("Failed to send notification for message {}: {:#}", message.id, e),
        }
    }
}

fn build_outbound(config: &MailConfig) -> Result<Outbound> {
    let user = config
        .smtp_user
        .clone()
        .ok_or_else(|| anyhow!("SMTP user not configured"))?;
    let pass = config
        .smtp_pass
        .clone()
        .ok_or_else(|| anyhow!("SMTP password not configured"))?;
    let recipient = config.recipient().unwrap_or(&user);

    let from: Mailbox = user
        .parse()
        .map_err(|e| anyhow!("Invalid SMTP user address '{}': {}", user, e))?;
    let to: Mailbox = recipient
        .parse()
        .map_err(|e| anyhow!("Invalid notification address '{}': {}", recipient, e))?;

    let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
        .map_err(|e| anyhow!("Failed to create SMTP transport: {}", e))?
        .credentials(Credentials::new(user, pass))
        .port(config.smtp_port)
        .build();

    Ok(Outbound { transport, from, to })
}

/// Compose the notification for one contact message
pub fn build_notification(from: Mailbox, to: Mailbox, message: &Message) -> Result<Email> {
    let text = format!(
        "Name: {}\nEmail: {}\nMessage: {}",
        message.name, message.email, message.message
    );

    Email::builder()
        .from(from)
        .to(to)
        .subject(format!("New Portfolio Message from {}", message.name))
        .multipart(MultiPart::alternative_plain_html(
            text,
            notification_html(message),
        ))
        .map_err(|e| anyhow!("Failed to build email: {}", e))
}

fn notification_html(message: &Message) -> String {
    format!(
        "<h3>New Portfolio Message</h3>\
         <p><strong>Name:</strong> {}</p>\
         <p><strong>Email:</strong> {}</p>\
         <p><strong>Message:</strong></p>\
         <p>{}</p>",
        escape_html(&message.name),
        escape_html(&message.email),
        escape_html(&message.message).replace('\n', "<br>")
    )
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
