use async_trait::async_trait;
use lettre::{
    message::header::ContentType, transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::core::config::MailConfig;

use super::{MailError, Notifier, OutgoingEmail};

/// Sends notification emails through a STARTTLS SMTP relay
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpNotifier {
    pub fn new(config: MailConfig) -> Result<Self, MailError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port);

        if let (Some(user), Some(pass)) = (config.smtp_user, config.smtp_password) {
            builder = builder.credentials(Credentials::new(user, pass));
        }

        tracing::info!(
            "SMTP notifier configured for {}:{}",
            config.smtp_host,
            config.smtp_port
        );

        Ok(Self {
            transport: builder.build(),
            from_address: config.from_address,
        })
    }

    fn build_message(&self, email: &OutgoingEmail) -> Result<Message, MailError> {
        Message::builder()
            .from(self.from_address.parse()?)
            .to(email.to.parse()?)
            .subject(email.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(email.body.clone())
            .map_err(|e| MailError::Build(e.to_string()))
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        let message = self.build_message(&email)?;
        self.transport.send(message).await?;

        tracing::info!(to = %email.to, subject = %email.subject, "Notification email sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notifier() -> SmtpNotifier {
        SmtpNotifier::new(MailConfig {
            smtp_host: "localhost".to_string(),
            smtp_port: 2525,
            from_address: "noreply@ecoai.local".to_string(),
            smtp_user: None,
            smtp_password: None,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_build_message_rejects_bad_recipient() {
        let email = OutgoingEmail {
            to: "not-an-email".to_string(),
            subject: "Subject".to_string(),
            body: "Body".to_string(),
        };
        assert!(matches!(
            notifier().build_message(&email),
            Err(MailError::Address(_))
        ));
    }

    #[tokio::test]
    async fn test_build_message_plain_text() {
        let email = OutgoingEmail {
            to: "authority@city.gov".to_string(),
            subject: "Report #7".to_string(),
            body: "Details".to_string(),
        };
        let message = notifier().build_message(&email).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("To: authority@city.gov"));
        assert!(raw.contains("Subject: Report #7"));
        assert!(raw.contains("text/plain"));
    }
}
