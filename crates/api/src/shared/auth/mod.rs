use crate::error::RevisitError;
use actix_web::HttpRequest;
use revisit_domain::{Device, DeviceIdentifier, Member};
use revisit_infra::RevisitContext;

pub const DEVICE_ID_HEADER: &str = "X-Device-Id";

/// The device identifier from the `X-Device-Id` header, if any
pub fn get_device_identifier(req: &HttpRequest) -> Option<DeviceIdentifier> {
    req.headers()
        .get(DEVICE_ID_HEADER)
        .and_then(|header| header.to_str().ok())
        .and_then(|value| value.parse().ok())
}

/// Looks up the device behind an identifier and verifies that it has
/// completed email activation. Routes that register or list data for a
/// member only trust active devices.
pub async fn resolve_active_device(
    identifier: &DeviceIdentifier,
    ctx: &RevisitContext,
) -> Result<(Device, Member), RevisitError> {
    let device = ctx
        .repos
        .devices
        .find_by_identifier(identifier)
        .await
        .ok_or_else(|| RevisitError::Unauthorized("Unknown device identifier".into()))?;

    if !device.active {
        return Err(RevisitError::Unauthorized(
            "Device has not completed email authentication".into(),
        ));
    }

    let member = ctx
        .repos
        .members
        .find(&device.member_id)
        .await
        .ok_or(RevisitError::InternalError)?;

    Ok((device, member))
}

pub async fn protect_device_route(
    req: &HttpRequest,
    ctx: &RevisitContext,
) -> Result<(Device, Member), RevisitError> {
    let identifier = get_device_identifier(req).ok_or_else(|| {
        RevisitError::Unauthorized(format!("Missing or malformed `{}` header", DEVICE_ID_HEADER))
    })?;
    resolve_active_device(&identifier, ctx).await
}

#[cfg(test)]
mod test {
    use super::*;
    use actix_web::test::TestRequest;
    use revisit_domain::Device;

    async fn setup_member_with_device(ctx: &RevisitContext, active: bool) -> (Device, Member) {
        let member = Member::new("alice@example.com".parse().unwrap());
        ctx.repos.members.insert(&member).await.unwrap();
        let mut device = Device::new(member.id.clone(), ctx.sys.get_datetime());
        if active {
            device.activate(ctx.sys.get_datetime()).unwrap();
        }
        ctx.repos.devices.insert(&device).await.unwrap();
        (device, member)
    }

    #[actix_web::main]
    #[test]
    async fn it_accepts_active_device_header() {
        let ctx = RevisitContext::create_inmemory();
        let (device, member) = setup_member_with_device(&ctx, true).await;

        let req = TestRequest::default()
            .insert_header((DEVICE_ID_HEADER, device.identifier.as_str()))
            .to_http_request();

        let res = protect_device_route(&req, &ctx).await;
        let (found_device, found_member) = res.unwrap();
        assert_eq!(found_device.id, device.id);
        assert_eq!(found_member.id, member.id);
    }

    #[actix_web::main]
    #[test]
    async fn it_rejects_missing_header() {
        let ctx = RevisitContext::create_inmemory();
        setup_member_with_device(&ctx, true).await;

        let req = TestRequest::default().to_http_request();
        assert!(protect_device_route(&req, &ctx).await.is_err());
    }

    #[actix_web::main]
    #[test]
    async fn it_rejects_inactive_device() {
        let ctx = RevisitContext::create_inmemory();
        let (device, _) = setup_member_with_device(&ctx, false).await;

        let req = TestRequest::default()
            .insert_header((DEVICE_ID_HEADER, device.identifier.as_str()))
            .to_http_request();
        assert!(protect_device_route(&req, &ctx).await.is_err());
    }

    #[actix_web::main]
    #[test]
    async fn it_rejects_unknown_identifier() {
        let ctx = RevisitContext::create_inmemory();

        let req = TestRequest::default()
            .insert_header((DEVICE_ID_HEADER, "some-unknown-identifier"))
            .to_http_request();
        assert!(protect_device_route(&req, &ctx).await.is_err());
    }
}
