use super::subscribers::SendAuthEmailOnDeviceCreated;
use crate::{
    error::RevisitError,
    shared::usecase::{execute, Subscriber, UseCase},
};
use actix_web::{web, HttpResponse};
use revisit_api_structs::create_member::{APIResponse, RequestBody};
use revisit_domain::{Device, Email, Member};
use revisit_infra::RevisitContext;

pub async fn create_member_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<RevisitContext>,
) -> Result<HttpResponse, RevisitError> {
    let usecase = CreateMemberUseCase {
        email: body.0.email,
    };

    execute(usecase, &ctx)
        .await
        .map(|usecase_res| {
            HttpResponse::Created().json(APIResponse::new(usecase_res.member, usecase_res.device))
        })
        .map_err(RevisitError::from)
}

#[derive(Debug)]
pub struct CreateMemberUseCase {
    pub email: Email,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub member: Member,
    pub device: Device,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for RevisitError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateMemberUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateMember";

    async fn execute(&mut self, ctx: &RevisitContext) -> Result<Self::Response, Self::Error> {
        // Registering an already known email only adds a new device
        let member = match ctx.repos.members.find_by_email(&self.email).await {
            Some(member) => member,
            None => {
                let member = Member::new(self.email.clone());
                ctx.repos
                    .members
                    .insert(&member)
                    .await
                    .map_err(|_| UseCaseError::StorageError)?;
                member
            }
        };

        let device = Device::new(member.id.clone(), ctx.sys.get_datetime());
        ctx.repos
            .devices
            .insert(&device)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(UseCaseRes { member, device })
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(SendAuthEmailOnDeviceCreated)]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use revisit_infra::{InMemoryEmailSender, DEVICE_AUTH_EMAIL_SUBJECT};
    use std::sync::Arc;

    #[actix_web::main]
    #[test]
    async fn it_creates_member_with_inactive_device() {
        let ctx = RevisitContext::create_inmemory();
        let email: Email = "alice@example.com".parse().unwrap();

        let usecase = CreateMemberUseCase {
            email: email.clone(),
        };
        let res = execute(usecase, &ctx).await.unwrap();

        assert_eq!(res.member.email, email);
        assert!(!res.device.active);
        assert!(ctx
            .repos
            .devices
            .find_by_identifier(&res.device.identifier)
            .await
            .is_some());
    }

    #[actix_web::main]
    #[test]
    async fn it_reuses_member_for_known_email() {
        let ctx = RevisitContext::create_inmemory();
        let email: Email = "alice@example.com".parse().unwrap();

        let first = execute(
            CreateMemberUseCase {
                email: email.clone(),
            },
            &ctx,
        )
        .await
        .unwrap();
        let second = execute(CreateMemberUseCase { email }, &ctx)
            .await
            .unwrap();

        assert_eq!(first.member.id, second.member.id);
        assert_ne!(first.device.identifier, second.device.identifier);
        let devices = ctx.repos.devices.find_by_member(&first.member.id).await;
        assert_eq!(devices.len(), 2);
    }

    #[actix_web::main]
    #[test]
    async fn it_sends_the_auth_email() {
        let email_sender = Arc::new(InMemoryEmailSender::new());
        let ctx = RevisitContext::create_inmemory_with_email(email_sender.clone());
        let email: Email = "alice@example.com".parse().unwrap();

        let res = execute(
            CreateMemberUseCase {
                email: email.clone(),
            },
            &ctx,
        )
        .await
        .unwrap();

        let sent = email_sender.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, email);
        assert_eq!(sent[0].subject, DEVICE_AUTH_EMAIL_SUBJECT);
        assert!(sent[0].body.contains(res.device.identifier.as_str()));
    }
}
