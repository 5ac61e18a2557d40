use crate::shared::entity::{Entity, ID};
use serde::{de::Visitor, Deserialize, Serialize};
use std::{cmp::min, fmt::Display, str::FromStr};
use thiserror::Error;

/// A `Member` is the owner of `Review`s and the recipient of the
/// review reminder emails. A `Member` is identified by its email
/// address and can have multiple registered `Device`s.
#[derive(Debug, Clone)]
pub struct Member {
    pub id: ID,
    pub email: Email,
}

impl Member {
    pub fn new(email: Email) -> Self {
        Self {
            id: Default::default(),
            email,
        }
    }
}

impl Entity for Member {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// A validated email address.
///
/// Logs should never contain the full address, use
/// [`Email::to_masked_value`] there instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

#[derive(Error, Debug)]
pub enum InvalidEmailError {
    #[error("Email: {0} is malformed")]
    Malformed(String),
}

impl Email {
    pub fn new(value: &str) -> Result<Self, InvalidEmailError> {
        if !Self::is_valid(value) {
            return Err(InvalidEmailError::Malformed(value.to_string()));
        }
        Ok(Self(value.to_string()))
    }

    fn is_valid(value: &str) -> bool {
        if value.chars().any(char::is_whitespace) {
            return false;
        }
        let parts = value.split('@').collect::<Vec<_>>();
        if parts.len() != 2 {
            return false;
        }
        let (local, domain) = (parts[0], parts[1]);
        if local.is_empty() || domain.is_empty() {
            return false;
        }
        let domain_labels = domain.split('.').collect::<Vec<_>>();
        domain_labels.len() >= 2 && domain_labels.iter().all(|label| !label.is_empty())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Masks the local part so the address is safe to log.
    /// `johndoe@example.com` becomes `joh****@example.com`.
    pub fn to_masked_value(&self) -> String {
        // Constructor guarantees exactly one '@'
        let at = self.0.find('@').unwrap_or(0);
        let (local, domain) = self.0.split_at(at);

        let masked_local = if local.len() <= 2 {
            format!("{}*", &local[..1])
        } else {
            let visible_len = min(3, local.len() / 2);
            format!(
                "{}{}",
                &local[..visible_len],
                "*".repeat(local.len() - visible_len)
            )
        };

        format!("{}{}", masked_local, domain)
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Email {
    type Err = InvalidEmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for Email {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Email {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct EmailVisitor;

        impl<'de> Visitor<'de> for EmailVisitor {
            type Value = Email;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("A valid email address")
            }

            fn visit_str<E>(self, value: &str) -> Result<Email, E>
            where
                E: serde::de::Error,
            {
                value
                    .parse::<Email>()
                    .map_err(|_| E::custom(format!("Malformed email: {}", value)))
            }
        }

        deserializer.deserialize_str(EmailVisitor)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_accepts_valid_emails() {
        let valid_emails = vec![
            "user@example.com",
            "first.last@example.co.uk",
            "a@b.io",
            "user+tag@example.com",
        ];

        for email in &valid_emails {
            assert!(Email::new(email).is_ok());
        }
    }

    #[test]
    fn it_rejects_invalid_emails() {
        let invalid_emails = vec![
            "",
            "no-at-sign",
            "@example.com",
            "user@",
            "user@nodot",
            "user@bad..com",
            "user name@example.com",
            "user@example@com",
        ];

        for email in &invalid_emails {
            assert!(Email::new(email).is_err());
        }
    }

    #[test]
    fn it_masks_local_part() {
        let cases = vec![
            ("johndoe@example.com", "joh****@example.com"),
            ("abcd@example.com", "ab**@example.com"),
            ("ab@example.com", "a*@example.com"),
            ("a@b.io", "a*@b.io"),
        ];

        for (email, masked) in cases {
            let email = Email::new(email).unwrap();
            assert_eq!(email.to_masked_value(), masked);
        }
    }
}
