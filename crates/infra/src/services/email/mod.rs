mod smtp;
mod template;

use revisit_domain::Email;
use std::sync::Mutex;

pub use smtp::SmtpEmailSender;
pub use template::{
    render_device_auth_email, render_review_email, DEVICE_AUTH_EMAIL_SUBJECT, REVIEW_EMAIL_SUBJECT,
};

/// Outgoing mail transport. Production uses [`SmtpEmailSender`], tests
/// use [`InMemoryEmailSender`].
#[async_trait::async_trait]
pub trait IEmailSender: Send + Sync {
    async fn send(&self, to: &Email, subject: &str, body: &str) -> anyhow::Result<()>;
}

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub to: Email,
    pub subject: String,
    pub body: String,
}

/// Email sender double that records every send and can be told to
/// reject given recipients.
pub struct InMemoryEmailSender {
    sent: Mutex<Vec<SentEmail>>,
    rejected_recipients: Mutex<Vec<Email>>,
}

impl InMemoryEmailSender {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            rejected_recipients: Mutex::new(Vec::new()),
        }
    }

    /// All sends accepted so far, in order
    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }

    /// Make every future send to this recipient fail
    pub fn reject_recipient(&self, to: &Email) {
        self.rejected_recipients.lock().unwrap().push(to.clone());
    }
}

impl Default for InMemoryEmailSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IEmailSender for InMemoryEmailSender {
    async fn send(&self, to: &Email, subject: &str, body: &str) -> anyhow::Result<()> {
        if self.rejected_recipients.lock().unwrap().contains(to) {
            return Err(anyhow::anyhow!(
                "Recipient: {} rejected the delivery",
                to.to_masked_value()
            ));
        }
        self.sent.lock().unwrap().push(SentEmail {
            to: to.clone(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn it_records_sends_and_rejects_configured_recipients() {
        let sender = InMemoryEmailSender::new();
        let accepted: Email = "alice@example.com".parse().unwrap();
        let rejected: Email = "bob@example.com".parse().unwrap();
        sender.reject_recipient(&rejected);

        assert!(sender.send(&accepted, "Hello", "World").await.is_ok());
        assert!(sender.send(&rejected, "Hello", "World").await.is_err());

        let sent = sender.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, accepted);
        assert_eq!(sent[0].subject, "Hello");
    }
}
