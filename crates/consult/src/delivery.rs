use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde::{Deserialize, Serialize};

use crate::errors::DeliveryError;
use crate::prompt_template;
use crate::report::Artifact;

/// Basic address-shape validation: one `@`, a non-empty local part, a
/// dotted domain, no whitespace. Anything stricter belongs to the relay.
pub fn is_valid_address(address: &str) -> bool {
    if address.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = address.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        _ => false,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipient {
    pub address: String,
    pub name: String,
}

impl Recipient {
    pub fn new(address: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmailAttachment {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// One assembled outbound package, transport-agnostic.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundEmail {
    pub to_address: String,
    pub to_name: String,
    pub subject: String,
    pub html_body: String,
    pub attachments: Vec<EmailAttachment>,
}

/// The mail-relay seam. One call, one attempt, one outcome; retry is the
/// caller's decision.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn deliver(&self, email: &OutboundEmail) -> Result<(), DeliveryError>;
}

/// SMTP relay configuration (STARTTLS + authenticated sender).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub sender_address: String,
    pub sender_name: String,
    #[serde(skip_serializing, default)]
    pub password: String,
}

pub struct SmtpMailTransport {
    config: SmtpConfig,
}

impl SmtpMailTransport {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    fn build_message(&self, email: &OutboundEmail) -> Result<Message, DeliveryError> {
        let from: Mailbox = format!(
            "{} <{}>",
            self.config.sender_name, self.config.sender_address
        )
        .parse()
        .map_err(|e: lettre::address::AddressError| DeliveryError::Assembly(e.to_string()))?;
        let to: Mailbox = format!("{} <{}>", email.to_name, email.to_address)
            .parse()
            .map_err(|e: lettre::address::AddressError| DeliveryError::Assembly(e.to_string()))?;

        let mut multipart = MultiPart::mixed().singlepart(SinglePart::html(email.html_body.clone()));
        for attachment in &email.attachments {
            let content_type = ContentType::parse("application/octet-stream")
                .map_err(|e| DeliveryError::Assembly(e.to_string()))?;
            multipart = multipart.singlepart(
                Attachment::new(attachment.filename.clone())
                    .body(attachment.bytes.clone(), content_type),
            );
        }

        Message::builder()
            .from(from)
            .to(to)
            .subject(email.subject.clone())
            .multipart(multipart)
            .map_err(|e| DeliveryError::Assembly(e.to_string()))
    }
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn deliver(&self, email: &OutboundEmail) -> Result<(), DeliveryError> {
        let message = self.build_message(email)?;

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.host)
            .map_err(|e| DeliveryError::Transport(e.to_string()))?
            .port(self.config.port)
            .credentials(Credentials::new(
                self.config.sender_address.clone(),
                self.config.password.clone(),
            ))
            .build();

        mailer
            .send(message)
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;
        Ok(())
    }
}

/// Transport that records packages instead of sending them. Used by tests
/// to assert assembly without a relay.
#[derive(Default, Clone)]
pub struct RecordingTransport {
    pub sent: Arc<Mutex<Vec<OutboundEmail>>>,
}

#[async_trait]
impl MailTransport for RecordingTransport {
    async fn deliver(&self, email: &OutboundEmail) -> Result<(), DeliveryError> {
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

/// What one successful delivery attempt actually carried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryReceipt {
    pub message: String,
    pub attached: Vec<String>,
    pub skipped: Vec<String>,
}

/// Bundles a run's artifacts into a single outbound message.
pub struct DeliveryService {
    transport: Box<dyn MailTransport>,
    /// Role descriptions listed in the message body.
    roles: Vec<String>,
}

impl DeliveryService {
    pub fn new(transport: Box<dyn MailTransport>, roles: Vec<String>) -> Self {
        Self { transport, roles }
    }

    /// One delivery attempt for the whole package.
    ///
    /// Artifacts whose backing file is missing at send time are skipped and
    /// logged; the message still goes out with whatever is available. A
    /// transport failure is one outcome for the whole package.
    pub async fn send(
        &self,
        recipient_address: &str,
        recipient_name: &str,
        project_title: &str,
        artifacts: &[Artifact],
    ) -> Result<DeliveryReceipt, DeliveryError> {
        if !is_valid_address(recipient_address) {
            return Err(DeliveryError::InvalidAddress(recipient_address.to_string()));
        }

        let mut attachments = Vec::new();
        let mut attached = Vec::new();
        let mut skipped = Vec::new();
        for artifact in artifacts {
            let filename = artifact
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| artifact.agent_name.clone());
            match std::fs::read(&artifact.path) {
                Ok(bytes) => {
                    attached.push(filename.clone());
                    attachments.push(EmailAttachment { filename, bytes });
                }
                Err(e) => {
                    tracing::warn!(
                        path = %artifact.path.display(),
                        error = %e,
                        "skipping missing attachment"
                    );
                    skipped.push(filename);
                }
            }
        }

        let html_body = prompt_template::delivery_body(recipient_name, project_title, &self.roles)
            .map_err(|e| DeliveryError::Assembly(e.to_string()))?;

        let email = OutboundEmail {
            to_address: recipient_address.to_string(),
            to_name: recipient_name.to_string(),
            subject: format!("Project Delivery: {}", project_title),
            html_body,
            attachments,
        };

        self.transport.deliver(&email).await?;

        Ok(DeliveryReceipt {
            message: format!(
                "Project report emailed to {} with {} attachment(s)",
                recipient_address,
                attached.len()
            ),
            attached,
            skipped,
        })
    }
}
