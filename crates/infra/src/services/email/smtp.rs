use super::IEmailSender;
use crate::config::Config;
use anyhow::Context;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use revisit_domain::Email;

/// Production email sender that delivers through an SMTP relay
pub struct SmtpEmailSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpEmailSender {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let from = config
            .email_sender_address
            .parse::<Mailbox>()
            .context("EMAIL_SENDER_ADDRESS is not a valid mailbox")?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .context("SMTP relay could not be configured")?;
        if let (Some(username), Some(password)) = (&config.smtp_username, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait::async_trait]
impl IEmailSender for SmtpEmailSender {
    async fn send(&self, to: &Email, subject: &str, body: &str) -> anyhow::Result<()> {
        let to = to
            .as_str()
            .parse::<Mailbox>()
            .context("Recipient is not a valid mailbox")?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(body.to_string())
            .context("Unable to build email message")?;

        self.transport
            .send(message)
            .await
            .context("SMTP delivery failed")?;

        Ok(())
    }
}
