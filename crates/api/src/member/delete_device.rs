use crate::{
    error::RevisitError,
    shared::{
        auth::{get_device_identifier, resolve_active_device, DEVICE_ID_HEADER},
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use revisit_api_structs::delete_device::{APIResponse, RequestBody};
use revisit_domain::{Device, Member};
use revisit_infra::RevisitContext;

pub async fn delete_device_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<RevisitContext>,
) -> Result<HttpResponse, RevisitError> {
    let body = body.0;
    let identifier = match get_device_identifier(&http_req) {
        Some(identifier) => identifier,
        None => body
            .identifier
            .as_deref()
            .and_then(|value| value.parse().ok())
            .ok_or_else(|| {
                RevisitError::Unauthorized(format!(
                    "Missing or malformed `{}` header",
                    DEVICE_ID_HEADER
                ))
            })?,
    };
    let (_, member) = resolve_active_device(&identifier, &ctx).await?;

    let usecase = DeleteDeviceUseCase {
        member,
        target_identifier: body.target_identifier,
    };
    execute(usecase, &ctx)
        .await
        .map(|usecase_res| HttpResponse::Ok().json(APIResponse::new(usecase_res.device)))
        .map_err(RevisitError::from)
}

#[derive(Debug)]
pub struct DeleteDeviceUseCase {
    pub member: Member,
    pub target_identifier: String,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub device: Device,
}

#[derive(Debug)]
pub enum UseCaseError {
    DeviceNotFound,
    NotDeviceOwner,
    StorageError,
}

impl From<UseCaseError> for RevisitError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::DeviceNotFound => {
                Self::NotFound("A device with the given identifier was not found.".into())
            }
            UseCaseError::NotDeviceOwner => {
                Self::BadClientData("The device belongs to another member.".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteDeviceUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteDevice";

    async fn execute(&mut self, ctx: &RevisitContext) -> Result<Self::Response, Self::Error> {
        let identifier = self
            .target_identifier
            .parse()
            .map_err(|_| UseCaseError::DeviceNotFound)?;
        let device = ctx
            .repos
            .devices
            .find_by_identifier(&identifier)
            .await
            .ok_or(UseCaseError::DeviceNotFound)?;

        if device.member_id != self.member.id {
            return Err(UseCaseError::NotDeviceOwner);
        }

        ctx.repos
            .devices
            .delete(&device.id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(UseCaseRes { device })
    }
}
