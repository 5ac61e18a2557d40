use crate::{
    review::send_review_notifications::SendReviewNotificationsUseCase, shared::usecase::execute,
};
use actix_web::rt::time::sleep;
use chrono::Timelike;
use revisit_domain::delivery_time;
use revisit_infra::RevisitContext;
use std::time::Duration;

const SECS_PER_DAY: i64 = 24 * 60 * 60;

/// Seconds until the next daily delivery time (08:00 UTC). When called
/// exactly at delivery time it returns a full day, so a run that just
/// fired is not immediately repeated.
pub fn secs_until_next_delivery(now_millis: i64) -> u64 {
    let delivery_secs = delivery_time().num_seconds_from_midnight() as i64;
    let secs_into_day = (now_millis / 1000).rem_euclid(SECS_PER_DAY);
    if secs_into_day < delivery_secs {
        (delivery_secs - secs_into_day) as u64
    } else {
        (SECS_PER_DAY - secs_into_day + delivery_secs) as u64
    }
}

pub fn start_review_dispatch_job(ctx: RevisitContext) {
    actix_web::rt::spawn(async move {
        loop {
            let now = ctx.sys.get_timestamp_millis();
            let secs_to_next_run = secs_until_next_delivery(now);
            sleep(Duration::from_secs(secs_to_next_run)).await;

            let usecase = SendReviewNotificationsUseCase {};
            let _ = execute(usecase, &ctx).await;
        }
    });
}
