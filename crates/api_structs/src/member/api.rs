use crate::dtos::{DeviceDTO, MemberDTO};
use revisit_domain::{Device, Email, Member};
use serde::{Deserialize, Serialize};

pub mod create_member {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub email: Email,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub member: MemberDTO,
        pub device: DeviceDTO,
    }

    impl APIResponse {
        pub fn new(member: Member, device: Device) -> Self {
            Self {
                member: MemberDTO::new(member),
                device: DeviceDTO::new(device),
            }
        }
    }
}

pub mod auth_device {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        pub email: Email,
        pub identifier: String,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub device: DeviceDTO,
    }

    impl APIResponse {
        pub fn new(device: Device) -> Self {
            Self {
                device: DeviceDTO::new(device),
            }
        }
    }
}

pub mod delete_device {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub identifier: Option<String>,
        pub target_identifier: String,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub device: DeviceDTO,
    }

    impl APIResponse {
        pub fn new(device: Device) -> Self {
            Self {
                device: DeviceDTO::new(device),
            }
        }
    }
}

pub mod get_member_devices {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub devices: Vec<DeviceDTO>,
    }

    impl APIResponse {
        pub fn new(devices: Vec<Device>) -> Self {
            Self {
                devices: devices.into_iter().map(DeviceDTO::new).collect(),
            }
        }
    }
}
