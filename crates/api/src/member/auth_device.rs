use crate::{
    error::RevisitError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use revisit_api_structs::auth_device::{APIResponse, QueryParams};
use revisit_domain::{Device, DeviceActivationError, Email};
use revisit_infra::RevisitContext;

pub async fn auth_device_controller(
    query: web::Query<QueryParams>,
    ctx: web::Data<RevisitContext>,
) -> Result<HttpResponse, RevisitError> {
    let usecase = AuthDeviceUseCase {
        email: query.0.email,
        identifier: query.0.identifier,
    };

    execute(usecase, &ctx)
        .await
        .map(|usecase_res| HttpResponse::Ok().json(APIResponse::new(usecase_res.device)))
        .map_err(RevisitError::from)
}

#[derive(Debug)]
pub struct AuthDeviceUseCase {
    pub email: Email,
    pub identifier: String,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub device: Device,
}

#[derive(Debug)]
pub enum UseCaseError {
    MemberNotFound(Email),
    DeviceNotFound,
    AlreadyActive,
    ActivationExpired,
    StorageError,
}

impl From<UseCaseError> for RevisitError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::MemberNotFound(email) => Self::NotFound(format!(
                "A member with email: {}, was not found.",
                email.to_masked_value()
            )),
            UseCaseError::DeviceNotFound => {
                Self::NotFound("A device with the given identifier was not found.".into())
            }
            UseCaseError::AlreadyActive => {
                Self::Conflict("The device is already activated.".into())
            }
            UseCaseError::ActivationExpired => {
                Self::Unauthorized("The activation window for this device has expired.".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for AuthDeviceUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "AuthDevice";

    async fn execute(&mut self, ctx: &RevisitContext) -> Result<Self::Response, Self::Error> {
        let member = ctx
            .repos
            .members
            .find_by_email(&self.email)
            .await
            .ok_or_else(|| UseCaseError::MemberNotFound(self.email.clone()))?;

        let identifier = self
            .identifier
            .parse()
            .map_err(|_| UseCaseError::DeviceNotFound)?;
        let mut device = match ctx.repos.devices.find_by_identifier(&identifier).await {
            Some(device) if device.member_id == member.id => device,
            _ => return Err(UseCaseError::DeviceNotFound),
        };

        device
            .activate(ctx.sys.get_datetime())
            .map_err(|e| match e {
                DeviceActivationError::AlreadyActive => UseCaseError::AlreadyActive,
                DeviceActivationError::Expired => UseCaseError::ActivationExpired,
            })?;

        ctx.repos
            .devices
            .save(&device)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(UseCaseRes { device })
    }
}
