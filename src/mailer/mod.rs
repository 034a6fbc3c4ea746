use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

use crate::config::EmailSettings;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid mailbox address {address}: {source}")]
    Address {
        address: String,
        source: lettre::address::AddressError,
    },
    #[error("smtp relay setup failed: {0}")]
    Relay(#[source] lettre::transport::smtp::Error),
    #[error("message build failed: {0}")]
    Build(#[from] lettre::error::Error),
    #[error("smtp send failed: {0}")]
    Send(#[source] lettre::transport::smtp::Error),
}

pub trait ReportMailer {
    async fn send_report(&self, subject: &str, html_body: String) -> Result<(), MailError>;
}

/// TLS-wrapped SMTP sender with plain authentication. One message per report,
/// the whole recipient list on each message.
#[derive(Debug, Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Vec<Mailbox>,
}

impl SmtpMailer {
    pub fn from_config(settings: &EmailSettings) -> Result<Self, MailError> {
        let from = parse_mailbox(&settings.from)?;
        let to = settings
            .to
            .iter()
            .map(|address| parse_mailbox(address))
            .collect::<Result<Vec<_>, _>>()?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.smtp_host)
            .map_err(MailError::Relay)?
            .port(settings.smtp_port)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            from,
            to,
        })
    }
}

impl ReportMailer for SmtpMailer {
    async fn send_report(&self, subject: &str, html_body: String) -> Result<(), MailError> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .subject(subject)
            .header(ContentType::TEXT_HTML);
        for recipient in &self.to {
            builder = builder.to(recipient.clone());
        }

        let message = builder.body(html_body)?;
        self.transport.send(message).await.map_err(MailError::Send)?;
        Ok(())
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address
        .parse::<Mailbox>()
        .map_err(|source| MailError::Address {
            address: address.to_string(),
            source,
        })
}

#[cfg(test)]
pub(crate) struct MockReportMailer {
    pub(crate) sent: std::sync::Mutex<Vec<(String, String)>>,
}

#[cfg(test)]
impl MockReportMailer {
    pub(crate) fn new() -> Self {
        Self {
            sent: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[cfg(test)]
impl ReportMailer for MockReportMailer {
    async fn send_report(&self, subject: &str, html_body: String) -> Result<(), MailError> {
        self.sent
            .lock()
            .expect("mock mailer lock")
            .push((subject.to_string(), html_body));
        Ok(())
    }
}
