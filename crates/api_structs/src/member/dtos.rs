use chrono::NaiveDateTime;
use revisit_domain::{Device, DeviceIdentifier, Email, Member, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MemberDTO {
    pub id: ID,
    pub email: Email,
}

impl MemberDTO {
    pub fn new(member: Member) -> Self {
        Self {
            id: member.id,
            email: member.email,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDTO {
    pub id: ID,
    pub identifier: DeviceIdentifier,
    pub active: bool,
    pub activation_expires_at: NaiveDateTime,
}

impl DeviceDTO {
    pub fn new(device: Device) -> Self {
        Self {
            id: device.id,
            identifier: device.identifier,
            active: device.active,
            activation_expires_at: device.activation_expires_at,
        }
    }
}
