mod email;

pub use email::{
    render_device_auth_email, render_review_email, IEmailSender, InMemoryEmailSender, SentEmail,
    SmtpEmailSender, DEVICE_AUTH_EMAIL_SUBJECT, REVIEW_EMAIL_SUBJECT,
};
