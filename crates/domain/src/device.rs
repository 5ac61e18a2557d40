use crate::shared::entity::{Entity, ID};
use chrono::{Duration, NaiveDateTime};
use revisit_utils::create_random_secret;
use serde::{de::Visitor, Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

const DEVICE_IDENTIFIER_LEN: usize = 32;

/// How long a new `Device` can wait for its owner to click the
/// activation link before the link expires.
pub const ACTIVATION_WINDOW_MINUTES: i64 = 5;

/// A `Device` is a browser installation registered by a `Member`. The
/// owner proves control of the email address by following an emailed
/// activation link, after which the device can register `Review`s.
#[derive(Debug, Clone)]
pub struct Device {
    pub id: ID,
    pub member_id: ID,
    pub identifier: DeviceIdentifier,
    pub active: bool,
    pub activation_expires_at: NaiveDateTime,
}

#[derive(Error, Debug, PartialEq)]
pub enum DeviceActivationError {
    #[error("Device is already activated")]
    AlreadyActive,
    #[error("The activation window for this device has expired")]
    Expired,
}

impl Device {
    pub fn new(member_id: ID, now: NaiveDateTime) -> Self {
        Self {
            id: Default::default(),
            member_id,
            identifier: DeviceIdentifier::create(),
            active: false,
            activation_expires_at: now + Duration::minutes(ACTIVATION_WINDOW_MINUTES),
        }
    }

    pub fn activate(&mut self, now: NaiveDateTime) -> Result<(), DeviceActivationError> {
        if self.active {
            return Err(DeviceActivationError::AlreadyActive);
        }
        if now > self.activation_expires_at {
            return Err(DeviceActivationError::Expired);
        }
        self.active = true;
        Ok(())
    }
}

impl Entity for Device {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// Opaque identifier handed out to a `Device` at registration and sent
/// back by the client in the `X-Device-Id` header.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceIdentifier(String);

#[derive(Error, Debug)]
pub enum InvalidDeviceIdentifierError {
    #[error("Device identifier cannot be empty")]
    Empty,
}

impl DeviceIdentifier {
    pub fn create() -> Self {
        Self(create_random_secret(DEVICE_IDENTIFIER_LEN))
    }

    pub fn new(value: &str) -> Result<Self, InvalidDeviceIdentifierError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(InvalidDeviceIdentifierError::Empty);
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for DeviceIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DeviceIdentifier {
    type Err = InvalidDeviceIdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for DeviceIdentifier {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DeviceIdentifier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct DeviceIdentifierVisitor;

        impl<'de> Visitor<'de> for DeviceIdentifierVisitor {
            type Value = DeviceIdentifier;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("A non-empty device identifier")
            }

            fn visit_str<E>(self, value: &str) -> Result<DeviceIdentifier, E>
            where
                E: serde::de::Error,
            {
                value
                    .parse::<DeviceIdentifier>()
                    .map_err(|e| E::custom(format!("{}", e)))
            }
        }

        deserializer.deserialize_str(DeviceIdentifierVisitor)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn it_creates_inactive_device_with_activation_window() {
        let device = Device::new(Default::default(), now());
        assert!(!device.active);
        assert_eq!(
            device.activation_expires_at,
            now() + Duration::minutes(ACTIVATION_WINDOW_MINUTES)
        );
    }

    #[test]
    fn it_activates_within_window() {
        let mut device = Device::new(Default::default(), now());
        let res = device.activate(now() + Duration::minutes(3));
        assert!(res.is_ok());
        assert!(device.active);
    }

    #[test]
    fn it_rejects_activation_after_window() {
        let mut device = Device::new(Default::default(), now());
        let res = device.activate(now() + Duration::minutes(6));
        assert_eq!(res.unwrap_err(), DeviceActivationError::Expired);
        assert!(!device.active);
    }

    #[test]
    fn it_rejects_double_activation() {
        let mut device = Device::new(Default::default(), now());
        device.activate(now()).unwrap();
        let res = device.activate(now());
        assert_eq!(res.unwrap_err(), DeviceActivationError::AlreadyActive);
    }

    #[test]
    fn it_rejects_empty_identifier() {
        assert!(DeviceIdentifier::new("").is_err());
        assert!(DeviceIdentifier::new("   ").is_err());
    }
}
