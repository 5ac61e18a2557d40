mod inmemory;
mod postgres;

use revisit_domain::{Device, DeviceIdentifier, ID};

pub use inmemory::InMemoryDeviceRepo;
pub use postgres::PostgresDeviceRepo;

#[async_trait::async_trait]
pub trait IDeviceRepo: Send + Sync {
    async fn insert(&self, device: &Device) -> anyhow::Result<()>;
    async fn save(&self, device: &Device) -> anyhow::Result<()>;
    async fn find(&self, device_id: &ID) -> Option<Device>;
    async fn find_by_identifier(&self, identifier: &DeviceIdentifier) -> Option<Device>;
    async fn find_by_member(&self, member_id: &ID) -> Vec<Device>;
    async fn delete(&self, device_id: &ID) -> anyhow::Result<()>;
}

#[cfg(test)]
mod test {
    use crate::repos::Repos;
    use chrono::NaiveDate;
    use revisit_domain::{Device, Member};

    #[tokio::test]
    async fn insert_save_and_find() {
        let repos = Repos::create_inmemory();
        let member = Member::new("alice@example.com".parse().unwrap());
        repos.members.insert(&member).await.unwrap();

        let now = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let mut device = Device::new(member.id.clone(), now);
        assert!(repos.devices.insert(&device).await.is_ok());

        let res = repos
            .devices
            .find_by_identifier(&device.identifier)
            .await
            .unwrap();
        assert_eq!(res.id, device.id);
        assert!(!res.active);

        device.activate(now).unwrap();
        assert!(repos.devices.save(&device).await.is_ok());
        let res = repos.devices.find(&device.id).await.unwrap();
        assert!(res.active);

        let devices = repos.devices.find_by_member(&member.id).await;
        assert_eq!(devices.len(), 1);

        assert!(repos.devices.delete(&device.id).await.is_ok());
        assert!(repos.devices.find(&device.id).await.is_none());
        assert!(repos.devices.find_by_member(&member.id).await.is_empty());
    }
}
