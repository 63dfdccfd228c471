use crate::config::{SmtpConfig, SmtpSecurity};
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Error, Debug)]
pub enum MailError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("Invalid content type: {0}")]
    ContentType(String),
}

/// Everything needed to deliver one report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub subject: String,
    pub body: String,
    pub recipients: Vec<String>,
    /// Name the attachment is presented under
    pub attachment_name: String,
    /// Work artifact holding the attachment bytes
    pub attachment_path: PathBuf,
}

/// Delivers report mails
pub trait Mailer {
    fn send(&mut self, message: &MailMessage) -> Result<(), MailError>;
}

pub struct SmtpMailer {
    transport: SmtpTransport,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, MailError> {
        let builder = match config.security {
            SmtpSecurity::Tls => SmtpTransport::relay(&config.host)?,
            SmtpSecurity::StartTls => SmtpTransport::starttls_relay(&config.host)?,
            SmtpSecurity::None => SmtpTransport::builder_dangerous(&config.host),
        };
        let mut builder = builder.port(config.port);
        if let (Some(user), Some(password)) = (&config.user, &config.password) {
            builder = builder.credentials(Credentials::new(user.clone(), password.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from: config.from.parse()?,
        })
    }
}

/// Assemble the MIME message: a plain text body plus the spreadsheet
pub fn build_message(from: &Mailbox, message: &MailMessage) -> Result<Message, MailError> {
    let mut builder = Message::builder()
        .from(from.clone())
        .subject(message.subject.clone());
    for recipient in &message.recipients {
        builder = builder.to(recipient.parse()?);
    }

    let content_type = ContentType::parse(XLSX_CONTENT_TYPE)
        .map_err(|e| MailError::ContentType(e.to_string()))?;
    let bytes = fs::read(&message.attachment_path)?;
    let attachment = Attachment::new(message.attachment_name.clone()).body(bytes, content_type);

    let email = builder.multipart(
        MultiPart::mixed()
            .singlepart(SinglePart::plain(message.body.clone()))
            .singlepart(attachment),
    )?;
    Ok(email)
}

impl Mailer for SmtpMailer {
    fn send(&mut self, message: &MailMessage) -> Result<(), MailError> {
        let email = build_message(&self.from, message)?;
        self.transport.send(&email)?;
        info!(
            "Sent '{}' to {}",
            message.attachment_name,
            message.recipients.join(", ")
        );
        Ok(())
    }
}

/// Logs what would be sent instead of sending it
#[derive(Debug, Default)]
pub struct LogMailer;

impl Mailer for LogMailer {
    fn send(&mut self, message: &MailMessage) -> Result<(), MailError> {
        info!(
            "Dry run: '{}' ({}) to {} with subject '{}'",
            message.attachment_name,
            message.attachment_path.display(),
            message.recipients.join(", "),
            message.subject
        );
        Ok(())
    }
}
