use super::IDeviceRepo;
use crate::repos::shared::{inmemory_repo::*, Collection};
use revisit_domain::{Device, DeviceIdentifier, ID};

pub struct InMemoryDeviceRepo {
    devices: Collection<Device>,
}

impl InMemoryDeviceRepo {
    pub fn new(devices: Collection<Device>) -> Self {
        Self { devices }
    }
}

#[async_trait::async_trait]
impl IDeviceRepo for InMemoryDeviceRepo {
    async fn insert(&self, device: &Device) -> anyhow::Result<()> {
        insert(device, &self.devices);
        Ok(())
    }

    async fn save(&self, device: &Device) -> anyhow::Result<()> {
        save(device, &self.devices);
        Ok(())
    }

    async fn find(&self, device_id: &ID) -> Option<Device> {
        find(device_id, &self.devices)
    }

    async fn find_by_identifier(&self, identifier: &DeviceIdentifier) -> Option<Device> {
        find_by(&self.devices, |device| device.identifier == *identifier)
            .into_iter()
            .next()
    }

    async fn find_by_member(&self, member_id: &ID) -> Vec<Device> {
        find_by(&self.devices, |device| device.member_id == *member_id)
    }

    async fn delete(&self, device_id: &ID) -> anyhow::Result<()> {
        delete(device_id, &self.devices);
        Ok(())
    }
}
