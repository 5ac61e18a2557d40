use super::IDeviceRepo;
use chrono::NaiveDateTime;
use revisit_domain::{Device, DeviceIdentifier, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use std::convert::{TryFrom, TryInto};

pub struct PostgresDeviceRepo {
    pool: PgPool,
}

impl PostgresDeviceRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct DeviceRaw {
    device_uid: Uuid,
    member_uid: Uuid,
    identifier: String,
    active: bool,
    activation_expires_at: NaiveDateTime,
}

impl TryFrom<DeviceRaw> for Device {
    type Error = anyhow::Error;

    fn try_from(raw: DeviceRaw) -> anyhow::Result<Self> {
        Ok(Self {
            id: raw.device_uid.into(),
            member_id: raw.member_uid.into(),
            identifier: raw.identifier.parse()?,
            active: raw.active,
            activation_expires_at: raw.activation_expires_at,
        })
    }
}

#[async_trait::async_trait]
impl IDeviceRepo for PostgresDeviceRepo {
    async fn insert(&self, device: &Device) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO devices(device_uid, member_uid, identifier, active, activation_expires_at)
            VALUES($1, $2, $3, $4, $5)
            "#,
        )
        .bind(device.id.inner_ref())
        .bind(device.member_id.inner_ref())
        .bind(device.identifier.as_str())
        .bind(device.active)
        .bind(device.activation_expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, device: &Device) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE devices
            SET active = $2,
            activation_expires_at = $3
            WHERE device_uid = $1
            "#,
        )
        .bind(device.id.inner_ref())
        .bind(device.active)
        .bind(device.activation_expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, device_id: &ID) -> Option<Device> {
        sqlx::query_as::<_, DeviceRaw>(
            r#"
            SELECT * FROM devices
            WHERE device_uid = $1
            "#,
        )
        .bind(device_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        .ok()
        .and_then(|device| device.try_into().ok())
    }

    async fn find_by_identifier(&self, identifier: &DeviceIdentifier) -> Option<Device> {
        sqlx::query_as::<_, DeviceRaw>(
            r#"
            SELECT * FROM devices
            WHERE identifier = $1
            "#,
        )
        .bind(identifier.as_str())
        .fetch_one(&self.pool)
        .await
        .ok()
        .and_then(|device| device.try_into().ok())
    }

    async fn find_by_member(&self, member_id: &ID) -> Vec<Device> {
        sqlx::query_as::<_, DeviceRaw>(
            r#"
            SELECT * FROM devices
            WHERE member_uid = $1
            "#,
        )
        .bind(member_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .filter_map(|device| device.try_into().ok())
        .collect()
    }

    async fn delete(&self, device_id: &ID) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            DELETE FROM devices
            WHERE device_uid = $1
            "#,
        )
        .bind(device_id.inner_ref())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
