use crate::{
    error::RevisitError,
    shared::{
        auth::protect_device_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use revisit_api_structs::get_member_devices::APIResponse;
use revisit_domain::{Device, ID};
use revisit_infra::RevisitContext;

pub async fn get_member_devices_controller(
    http_req: HttpRequest,
    ctx: web::Data<RevisitContext>,
) -> Result<HttpResponse, RevisitError> {
    let (_, member) = protect_device_route(&http_req, &ctx).await?;

    let usecase = GetMemberDevicesUseCase {
        member_id: member.id,
    };
    execute(usecase, &ctx)
        .await
        .map(|usecase_res| HttpResponse::Ok().json(APIResponse::new(usecase_res.devices)))
        .map_err(RevisitError::from)
}

#[derive(Debug)]
pub struct GetMemberDevicesUseCase {
    pub member_id: ID,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub devices: Vec<Device>,
}

#[derive(Debug)]
pub enum UseCaseError {}

impl From<UseCaseError> for RevisitError {
    fn from(_: UseCaseError) -> Self {
        Self::InternalError
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetMemberDevicesUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "GetMemberDevices";

    async fn execute(&mut self, ctx: &RevisitContext) -> Result<Self::Response, Self::Error> {
        let devices = ctx.repos.devices.find_by_member(&self.member_id).await;
        Ok(UseCaseRes { devices })
    }
}
