use super::create_member::{CreateMemberUseCase, UseCaseRes};
use crate::shared::usecase::Subscriber;
use revisit_infra::{render_device_auth_email, RevisitContext, DEVICE_AUTH_EMAIL_SUBJECT};
use tracing::{error, info};

pub struct SendAuthEmailOnDeviceCreated;

#[async_trait::async_trait(?Send)]
impl Subscriber<CreateMemberUseCase> for SendAuthEmailOnDeviceCreated {
    async fn notify(&self, e: &UseCaseRes, ctx: &RevisitContext) {
        let auth_url = format!(
            "{}/api/v1/device/auth?email={}&identifier={}",
            ctx.config.api_base_url, e.member.email, e.device.identifier
        );
        let body = render_device_auth_email(&auth_url);

        // Sideeffect, a failed delivery just leaves this device unactivatable
        match ctx
            .email
            .send(&e.member.email, DEVICE_AUTH_EMAIL_SUBJECT, &body)
            .await
        {
            Ok(_) => info!(
                "Sent device auth email to: {}",
                e.member.email.to_masked_value()
            ),
            Err(err) => error!(
                "Unable to send device auth email to: {} Error: {:?}",
                e.member.email.to_masked_value(),
                err
            ),
        }
    }
}
