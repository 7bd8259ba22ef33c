//! Mail transport — SMTP dispatch of application emails.
//!
//! The transport is built once at startup from injected config (STARTTLS relay
//! plus address/credential pair). Send operations report success as a boolean
//! and never raise past this boundary; the credential self-test is exposed
//! independently of sending.

pub mod handlers;

use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_SMTP_SERVER: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// SMTP endpoint and credential, resolved from configuration at startup.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub address: String,
    pub password: String,
    pub smtp_server: String,
    pub smtp_port: u16,
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid mailbox address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("invalid attachment content type: {0}")]
    ContentType(#[from] lettre::message::header::ContentTypeErr),

    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP failure: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// A binary attachment carried with the application email. Lettre encodes the
/// content as base64 with a content-disposition header naming the file.
#[derive(Debug, Clone)]
pub struct MailAttachment {
    pub file_name: String,
    pub content: Vec<u8>,
}

/// Everything needed to dispatch one application email.
#[derive(Debug, Clone)]
pub struct ApplicationEmail {
    pub recipient: String,
    pub subject: String,
    pub cover_letter: String,
    pub applicant_name: String,
    pub position: String,
    pub company_name: String,
    pub attachments: Vec<MailAttachment>,
}

pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    address: String,
}

impl Mailer {
    pub fn new(config: &MailConfig) -> Result<Self, MailError> {
        let credentials = Credentials::new(config.address.clone(), config.password.clone());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_server)?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self {
            transport,
            address: config.address.clone(),
        })
    }

    /// Can this credential authenticate? Exposed independently of sending.
    pub async fn test_connection(&self) -> bool {
        match self.transport.test_connection().await {
            Ok(ok) => ok,
            Err(e) => {
                warn!("SMTP connection test failed: {e}");
                false
            }
        }
    }

    /// Dispatches a full application email (body plus attachments).
    /// Returns false on any failure.
    pub async fn send_application(&self, email: ApplicationEmail) -> bool {
        let message = match build_application_message(&self.address, &email) {
            Ok(message) => message,
            Err(e) => {
                warn!("failed to build application email: {e}");
                return false;
            }
        };

        match self.transport.send(message).await {
            Ok(_) => {
                info!(
                    "application email sent to {} for {} at {}",
                    email.recipient, email.position, email.company_name
                );
                true
            }
            Err(e) => {
                warn!("failed to send application email: {e}");
                false
            }
        }
    }

    /// Plain-text email without attachments.
    pub async fn send_simple(&self, recipient: &str, subject: &str, body: &str) -> bool {
        let message = match build_simple_message(&self.address, recipient, subject, body) {
            Ok(message) => message,
            Err(e) => {
                warn!("failed to build email: {e}");
                return false;
            }
        };

        match self.transport.send(message).await {
            Ok(_) => true,
            Err(e) => {
                warn!("failed to send email: {e}");
                false
            }
        }
    }
}

fn build_application_message(from: &str, email: &ApplicationEmail) -> Result<Message, MailError> {
    let body = application_body(
        &email.cover_letter,
        &email.applicant_name,
        &email.position,
        &email.company_name,
    );

    let mut multipart = MultiPart::mixed().singlepart(SinglePart::plain(body));
    for attachment in &email.attachments {
        multipart = multipart.singlepart(
            Attachment::new(attachment.file_name.clone()).body(
                attachment.content.clone(),
                ContentType::parse("application/octet-stream")?,
            ),
        );
    }

    Ok(Message::builder()
        .from(from.parse::<Mailbox>()?)
        .to(email.recipient.parse::<Mailbox>()?)
        .subject(email.subject.clone())
        .multipart(multipart)?)
}

fn build_simple_message(
    from: &str,
    recipient: &str,
    subject: &str,
    body: &str,
) -> Result<Message, MailError> {
    Ok(Message::builder()
        .from(from.parse::<Mailbox>()?)
        .to(recipient.parse::<Mailbox>()?)
        .subject(subject.to_string())
        .singlepart(SinglePart::plain(body.to_string()))?)
}

/// Wraps the cover letter in the application email template, substituting the
/// identity placeholders the composer leaves in the letter.
fn application_body(
    cover_letter: &str,
    applicant_name: &str,
    position: &str,
    company_name: &str,
) -> String {
    let personalized = cover_letter
        .replace("[Your Name]", applicant_name)
        .replace("[Company Name]", company_name)
        .replace("[Position]", position);

    format!(
        "Dear Hiring Manager,\n\n\
        I hope this email finds you well. I am writing to express my strong interest \
        in the {position} position at {company_name}.\n\n\
        {personalized}\n\n\
        I have attached my resume for your review. I would welcome the opportunity to \
        discuss how my background and enthusiasm can contribute to your team.\n\n\
        Thank you for your time and consideration. I look forward to hearing from you.\n\n\
        Best regards,\n\
        {applicant_name}\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_email(attachments: Vec<MailAttachment>) -> ApplicationEmail {
        ApplicationEmail {
            recipient: "hr@acme.example".to_string(),
            subject: "Application for Engineer Position".to_string(),
            cover_letter: "Dear Hiring Manager,\n\nSincerely,\n[Your Name]".to_string(),
            applicant_name: "Jane Doe".to_string(),
            position: "Engineer".to_string(),
            company_name: "Acme".to_string(),
            attachments,
        }
    }

    #[test]
    fn test_application_body_substitutes_placeholders() {
        let body = application_body("Greetings from [Your Name]", "Jane Doe", "Engineer", "Acme");
        assert!(body.contains("Greetings from Jane Doe"));
        assert!(!body.contains("[Your Name]"));
        assert!(body.contains("the Engineer position at Acme"));
    }

    #[test]
    fn test_message_with_attachment_carries_disposition_header() {
        let email = make_email(vec![MailAttachment {
            file_name: "resume.pdf".to_string(),
            content: vec![1, 2, 3, 4],
        }]);
        let message = build_application_message("jane@example.com", &email).unwrap();
        let rendered = String::from_utf8(message.formatted()).unwrap();
        assert!(rendered.contains("Content-Disposition: attachment"));
        assert!(rendered.contains("resume.pdf"));
        assert!(rendered.contains("base64"));
    }

    #[test]
    fn test_message_without_attachments_builds() {
        let message = build_application_message("jane@example.com", &make_email(vec![])).unwrap();
        let rendered = String::from_utf8(message.formatted()).unwrap();
        assert!(rendered.contains("Subject: Application for Engineer Position"));
    }

    #[test]
    fn test_invalid_recipient_is_a_mail_error() {
        let mut email = make_email(vec![]);
        email.recipient = "not an address".to_string();
        let result = build_application_message("jane@example.com", &email);
        assert!(matches!(result, Err(MailError::Address(_))));
    }

    /// An unreachable endpoint yields boolean failure, never a panic or error
    /// escaping the mailer boundary.
    #[tokio::test]
    async fn test_unreachable_server_reports_false() {
        let mailer = Mailer::new(&MailConfig {
            address: "jane@example.com".to_string(),
            password: "wrong".to_string(),
            smtp_server: "127.0.0.1".to_string(),
            smtp_port: 1,
        })
        .unwrap();

        assert!(!mailer.test_connection().await);
        assert!(!mailer.send_application(make_email(vec![])).await);
        assert!(!mailer.send_simple("hr@acme.example", "Hi", "Body").await);
    }
}
