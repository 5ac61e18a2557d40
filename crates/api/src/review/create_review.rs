use crate::{
    error::RevisitError,
    shared::{
        auth::{get_device_identifier, resolve_active_device, DEVICE_ID_HEADER},
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use revisit_api_structs::create_review::{APIResponse, RequestBody};
use revisit_domain::{
    Member, NotificationHistory, NotificationStatus, Review, ReviewCycle, ReviewCycleInterval,
    ReviewUrl,
};
use revisit_infra::RevisitContext;

pub async fn create_review_controller(
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

    let usecase = CreateReviewUseCase {
        member,
        url: body.url,
    };
    execute(usecase, &ctx)
        .await
        .map(|usecase_res| {
            HttpResponse::Created().json(APIResponse::new(
                usecase_res.review.url.clone(),
                &usecase_res.cycles,
            ))
        })
        .map_err(RevisitError::from)
}

#[derive(Debug)]
pub struct CreateReviewUseCase {
    pub member: Member,
    pub url: String,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub review: Review,
    pub cycles: Vec<ReviewCycle>,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidUrl(String),
    StorageError,
}

impl From<UseCaseError> for RevisitError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidUrl(url) => Self::BadClientData(format!(
                "Invalid url provided: {}. It must be a valid absolute http(s) url.",
                url
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateReviewUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateReview";

    async fn execute(&mut self, ctx: &RevisitContext) -> Result<Self::Response, Self::Error> {
        let url: ReviewUrl = self
            .url
            .parse()
            .map_err(|_| UseCaseError::InvalidUrl(self.url.clone()))?;

        let now = ctx.sys.get_timestamp_millis();
        let review = Review::new(self.member.id.clone(), url, now);

        let anchor = ctx.sys.get_datetime().date();
        let cycles = ReviewCycleInterval::calculate_default(anchor)
            .into_iter()
            .map(|scheduled_at| ReviewCycle::new(review.id.clone(), scheduled_at))
            .collect::<Vec<_>>();
        let histories = cycles
            .iter()
            .map(|cycle| NotificationHistory::new(cycle.id.clone(), NotificationStatus::Pending, now))
            .collect::<Vec<_>>();

        // All or nothing, a partially scheduled review must never exist
        ctx.repos
            .reviews
            .insert_with_schedule(&review, &cycles, &histories)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(UseCaseRes { review, cycles })
    }
}
