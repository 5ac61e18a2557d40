use crate::shared::entity::{Entity, ID};
use serde::{de::Visitor, Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// A `Review` is a URL that a `Member` saved for spaced-repetition
/// review. It is immutable after creation; the reminder schedule for it
/// is tracked by its `ReviewCycle`s.
#[derive(Debug, Clone)]
pub struct Review {
    pub id: ID,
    pub member_id: ID,
    pub url: ReviewUrl,
    /// Creation timestamp in millis
    pub created: i64,
}

impl Review {
    pub fn new(member_id: ID, url: ReviewUrl, created: i64) -> Self {
        Self {
            id: Default::default(),
            member_id,
            url,
            created,
        }
    }
}

impl Entity for Review {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// The target URL of a `Review`. Only absolute http(s) URLs are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReviewUrl(String);

#[derive(Error, Debug)]
pub enum InvalidReviewUrlError {
    #[error("Review url: {0} is malformed")]
    Malformed(String),
}

impl ReviewUrl {
    pub fn new(value: &str) -> Result<Self, InvalidReviewUrlError> {
        let allowed_schemes = ["https", "http"];
        match url::Url::parse(value) {
            Ok(parsed_url) if allowed_schemes.contains(&parsed_url.scheme()) => {
                Ok(Self(value.to_string()))
            }
            _ => Err(InvalidReviewUrlError::Malformed(value.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ReviewUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ReviewUrl {
    type Err = InvalidReviewUrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ReviewUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ReviewUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct ReviewUrlVisitor;

        impl<'de> Visitor<'de> for ReviewUrlVisitor {
            type Value = ReviewUrl;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("A valid absolute http(s) url")
            }

            fn visit_str<E>(self, value: &str) -> Result<ReviewUrl, E>
            where
                E: serde::de::Error,
            {
                value
                    .parse::<ReviewUrl>()
                    .map_err(|_| E::custom(format!("Malformed url: {}", value)))
            }
        }

        deserializer.deserialize_str(ReviewUrlVisitor)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_accepts_valid_urls() {
        let valid_urls = vec![
            "https://example.com/article",
            "http://example.com",
            "https://example.com/path?query=1#fragment",
        ];

        for url in &valid_urls {
            assert!(ReviewUrl::new(url).is_ok());
        }
    }

    #[test]
    fn it_rejects_invalid_urls() {
        let invalid_urls = vec![
            "",
            "not a url",
            "example.com/missing-scheme",
            "ftp://example.com/file",
            "javascript:alert(1)",
        ];

        for url in &invalid_urls {
            assert!(ReviewUrl::new(url).is_err());
        }
    }
}
