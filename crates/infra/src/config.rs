use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Hostname of the SMTP relay used for outgoing mail
    pub smtp_host: String,
    /// Credentials for the SMTP relay. Mail is sent unauthenticated
    /// when they are absent, which is only useful against a local relay.
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    /// The `From` address on outgoing mail
    pub email_sender_address: String,
    /// Public base url of this service, used to build the device
    /// activation link in the auth email
    pub api_base_url: String,
    /// Upper bound in seconds for a single outgoing mail delivery.
    /// A send that exceeds it counts as failed for that run.
    pub mail_send_timeout_secs: u64,
}

impl Config {
    pub fn new() -> Self {
        let default_port = "5000";
        let port = std::env::var("PORT").unwrap_or(default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                default_port.parse::<usize>().unwrap()
            }
        };

        let smtp_host = match std::env::var("SMTP_HOST") {
            Ok(host) => host,
            Err(_) => {
                info!("Did not find SMTP_HOST environment variable. Falling back to localhost.");
                "localhost".into()
            }
        };
        let smtp_username = std::env::var("SMTP_USERNAME").ok();
        let smtp_password = std::env::var("SMTP_PASSWORD").ok();
        if smtp_username.is_some() != smtp_password.is_some() {
            warn!("Only one of SMTP_USERNAME and SMTP_PASSWORD is set. Mail will be sent unauthenticated.");
        }

        let email_sender_address = match std::env::var("EMAIL_SENDER_ADDRESS") {
            Ok(address) => address,
            Err(_) => {
                let address = "Revisit <noreply@revisit.localhost>";
                info!(
                    "Did not find EMAIL_SENDER_ADDRESS environment variable. Falling back to: {}",
                    address
                );
                address.into()
            }
        };

        let api_base_url = std::env::var("API_BASE_URL")
            .unwrap_or_else(|_| format!("http://localhost:{}", port));

        let default_mail_send_timeout_secs = 10;
        let mail_send_timeout_secs = match std::env::var("MAIL_SEND_TIMEOUT_SECS") {
            Ok(timeout) => timeout.parse::<u64>().unwrap_or_else(|_| {
                warn!(
                    "The given MAIL_SEND_TIMEOUT_SECS: {} is not valid, falling back to the default: {}.",
                    timeout, default_mail_send_timeout_secs
                );
                default_mail_send_timeout_secs
            }),
            Err(_) => default_mail_send_timeout_secs,
        };

        Self {
            port,
            smtp_host,
            smtp_username,
            smtp_password,
            email_sender_address,
            api_base_url,
            mail_send_timeout_secs,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
